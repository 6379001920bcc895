pub use super::*;

/// Mean absolute error.
///
/// `mean(|value - target|)`
pub fn l1_loss<B: Backend, const D: usize>(
    value: Tensor<B, D>,
    target: Tensor<B, D>,
) -> Result<Tensor<B, 1>, Error> {
    check_dims_same(value.dims(), target.dims())?;

    #[cfg(all(debug_assertions, not(test)))]
    log::debug!(
        target: "gausplat::supervision::loss",
        "l1_loss > dims {:?}",
        value.dims(),
    );

    Ok((value - target).abs().mean())
}

/// Mean absolute error weighted by the mask.
///
/// `sum(|(value - target) * mask|) / sum(mask)`
///
/// It is [`l1_loss`] if `mask` is `None`.
/// `mask` can be broadcast to the shape of `value`,
/// while `sum(mask)` is taken before broadcasting.
pub fn l1_loss_mask<B: Backend, const D: usize>(
    value: Tensor<B, D>,
    target: Tensor<B, D>,
    mask: Option<Tensor<B, D>>,
) -> Result<Tensor<B, 1>, Error> {
    let mask = match mask {
        Some(mask) => mask,
        None => return l1_loss(value, target),
    };

    let dims = value.dims();
    check_dims_same(dims, target.dims())?;
    check_dims_broadcastable(mask.dims(), dims)?;

    #[cfg(all(debug_assertions, not(test)))]
    log::debug!(
        target: "gausplat::supervision::loss",
        "l1_loss_mask > dims {:?}",
        dims,
    );

    let mask_sum = mask.to_owned().sum();
    let error_sum = (value - target).mul(mask.expand(dims)).abs().sum();

    Ok(error_sum.div(mask_sum))
}

#[cfg(test)]
mod tests {
    #[test]
    fn l1_loss() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        let value = Tensor::<B, 1>::from_data([1.0, 2.0, 3.0], device);
        let target = Tensor::<B, 1>::from_data([1.0, 2.0, 5.0], device);
        let output = super::l1_loss(value.to_owned(), target).unwrap();
        let target = Tensor::<B, 1>::from_data([2.0 / 3.0], device);
        output
            .into_data()
            .assert_approx_eq(&target.into_data(), 6);

        let output = super::l1_loss(value.to_owned(), value).unwrap();
        assert_eq!(output.into_scalar(), 0.0);
    }

    #[test]
    fn l1_loss_mismatched() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        let value = Tensor::<B, 2>::zeros([2, 3], device);
        let target = Tensor::<B, 2>::zeros([3, 2], device);
        let error = super::l1_loss(value, target).unwrap_err();
        assert!(matches!(error, Error::MismatchedTensorShape(..)), "{error}");
    }

    #[test]
    fn l1_loss_mask() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        let value = Tensor::<B, 2>::from_data([[1.0, 4.0], [2.0, -3.0]], device);
        let target = Tensor::<B, 2>::from_data([[0.0, 0.0], [0.0, 0.0]], device);

        let output =
            super::l1_loss_mask(value.to_owned(), target.to_owned(), None).unwrap();
        assert_eq!(output.into_scalar(), 2.5);

        let mask = Tensor::<B, 2>::from_data([[1.0, 0.0], [1.0, 1.0]], device);
        let output = super::l1_loss_mask(
            value.to_owned(),
            target.to_owned(),
            Some(mask),
        )
        .unwrap();
        assert_eq!(output.into_scalar(), 2.0);

        let mask = Tensor::<B, 2>::from_data([[0.5, 0.5], [0.0, 1.0]], device);
        let output = super::l1_loss_mask(
            value.to_owned(),
            target.to_owned(),
            Some(mask),
        )
        .unwrap();
        assert_eq!(output.into_scalar(), 2.75);

        // The mask is summed before broadcasting
        let mask = Tensor::<B, 2>::from_data([[1.0, 0.0]], device);
        let output = super::l1_loss_mask(
            value.to_owned(),
            target.to_owned(),
            Some(mask),
        )
        .unwrap();
        assert_eq!(output.into_scalar(), 3.0);

        let mask = Tensor::<B, 2>::zeros([2, 2], device);
        let output =
            super::l1_loss_mask(value.to_owned(), target, Some(mask)).unwrap();
        assert!(output.into_scalar().is_nan());

        let mask = Tensor::<B, 2>::ones([3, 2], device);
        let error = super::l1_loss_mask(
            value.to_owned(),
            value.zeros_like(),
            Some(mask),
        )
        .unwrap_err();
        assert!(matches!(error, Error::MismatchedTensorShape(..)), "{error}");
    }
}
