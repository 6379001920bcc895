pub use super::*;

use crate::function::tensor_extensions::TensorFloatExtension;

/// Mean squared error.
///
/// `mean((value - target)^2)`
pub fn l2_loss<B: Backend, const D: usize>(
    value: Tensor<B, D>,
    target: Tensor<B, D>,
) -> Result<Tensor<B, 1>, Error> {
    check_dims_same(value.dims(), target.dims())?;

    #[cfg(all(debug_assertions, not(test)))]
    log::debug!(
        target: "gausplat::supervision::loss",
        "l2_loss > dims {:?}",
        value.dims(),
    );

    Ok((value - target).powf_scalar(2.0).mean())
}

/// Mean squared error of the elements whose absolute error exceeds `margin`.
///
/// Elements within the margin are excluded from the mean,
/// so the loss is NaN if no element exceeds the margin.
pub fn margin_l2_loss<B: Backend, const D: usize>(
    value: Tensor<B, D>,
    target: Tensor<B, D>,
    margin: f64,
) -> Result<Tensor<B, 1>, Error> {
    Ok(margin_l2_loss_with_mask(value, target, margin)?.0)
}

/// [`margin_l2_loss`] along with the mask of `|value - target| > margin`.
pub fn margin_l2_loss_with_mask<B: Backend, const D: usize>(
    value: Tensor<B, D>,
    target: Tensor<B, D>,
    margin: f64,
) -> Result<(Tensor<B, 1>, Tensor<B, D, Bool>), Error> {
    check_dims_same(value.dims(), target.dims())?;

    #[cfg(all(debug_assertions, not(test)))]
    log::debug!(
        target: "gausplat::supervision::loss",
        "margin_l2_loss > dims {:?}, margin {margin}",
        value.dims(),
    );

    let error = value - target;
    let mask = error.to_owned().abs().greater_elem(margin);
    let loss = error.powf_scalar(2.0).mean_masked(mask.to_owned());

    Ok((loss, mask))
}
