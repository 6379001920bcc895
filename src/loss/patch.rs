//! Patch-normalized losses.

pub use super::*;

use crate::{
    function::tensor_extensions::TensorFloatExtension,
    preset::loss::PATCH_NORM_STD_EPSILON,
};

/// Split the input into non-overlapping square patches.
///
/// ## Arguments
///
/// * `input` - `[N, C, H, W]`
/// * `patch_size` - `P`
///
/// ## Returns
///
/// `[N * (H / P) * (W / P) * C, P * P]`, ordered by sample, patch row,
/// patch column and then channel.
/// The trailing rows and columns that cannot fill a patch are dropped.
pub fn patchify<B: Backend>(
    input: Tensor<B, 4>,
    patch_size: usize,
) -> Result<Tensor<B, 2>, Error> {
    let [batch_size, channel_count, height, width] = input.dims();
    if patch_size == 0 || patch_size > height || patch_size > width {
        return Err(Error::Validation(
            format!("patch_size ({patch_size})"),
            format!("in the range of 1 to {}", height.min(width)),
        ));
    }

    let patch_count_y = height / patch_size;
    let patch_count_x = width / patch_size;
    let patches = input
        .narrow(2, 0, patch_count_y * patch_size)
        .narrow(3, 0, patch_count_x * patch_size)
        .reshape([
            batch_size,
            channel_count,
            patch_count_y,
            patch_size,
            patch_count_x,
            patch_size,
        ])
        .permute([0, 2, 4, 1, 3, 5])
        .reshape([
            batch_size * patch_count_y * patch_count_x * channel_count,
            patch_size * patch_size,
        ]);

    Ok(patches)
}

/// Normalize every row of the input.
///
/// `(input - mean) / (std + 1e-2 * std(input.flatten()))`
///
/// `mean` and `std` default to the mean and the unbiased standard deviation
/// of each row. They should be broadcastable to the input.
pub fn normalize<B: Backend>(
    input: Tensor<B, 2>,
    mean: Option<Tensor<B, 2>>,
    std: Option<Tensor<B, 2>>,
) -> Result<Tensor<B, 2>, Error> {
    let dims = input.dims();
    let mean = mean.unwrap_or_else(|| input.to_owned().mean_dim(1));
    let std = std.unwrap_or_else(|| input.to_owned().std_dim(1));
    check_dims_broadcastable(mean.dims(), dims)?;
    check_dims_broadcastable(std.dims(), dims)?;

    // [1, 1]
    let std_epsilon = input
        .to_owned()
        .flatten::<1>(0, 1)
        .std_dim(0)
        .mul_scalar(PATCH_NORM_STD_EPSILON)
        .reshape([1, 1]);
    let std = std.expand(dims) + std_epsilon.expand(dims);

    Ok((input - mean.expand(dims)).div(std))
}

/// Margin L2 loss between the normalized patches.
///
/// ## Arguments
///
/// * `value` - `[N, C, H, W]`
/// * `target` - `[N, C, H, W]`
/// * `patch_size` - See [`patchify`].
/// * `margin` - See [`margin_l2_loss`].
pub fn patch_norm_mse_loss<B: Backend>(
    value: Tensor<B, 4>,
    target: Tensor<B, 4>,
    patch_size: usize,
    margin: f64,
) -> Result<Tensor<B, 1>, Error> {
    Ok(patch_norm_mse_loss_with_mask(value, target, patch_size, margin)?.0)
}

/// [`patch_norm_mse_loss`] along with the mask of the patch elements.
///
/// The mask is `[N * (H / P) * (W / P) * C, P * P]`.
pub fn patch_norm_mse_loss_with_mask<B: Backend>(
    value: Tensor<B, 4>,
    target: Tensor<B, 4>,
    patch_size: usize,
    margin: f64,
) -> Result<(Tensor<B, 1>, Tensor<B, 2, Bool>), Error> {
    check_dims_same(value.dims(), target.dims())?;

    #[cfg(all(debug_assertions, not(test)))]
    log::debug!(
        target: "gausplat::supervision::loss",
        "patch_norm_mse_loss > dims {:?}, patch_size {patch_size}",
        value.dims(),
    );

    let value = normalize(patchify(value, patch_size)?, None, None)?;
    let target = normalize(patchify(target, patch_size)?, None, None)?;

    margin_l2_loss_with_mask(value, target, margin)
}
