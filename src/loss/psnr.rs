pub use super::*;

use std::f64::consts::LN_10;

/// Peak signal-to-noise ratio in decibels for a peak value of 1.
///
/// `-10 * log10(mean((value - target)^2))`
pub fn psnr<B: Backend, const D: usize>(
    value: Tensor<B, D>,
    target: Tensor<B, D>,
) -> Result<Tensor<B, 1>, Error> {
    Ok(l2_loss(value, target)?.log().div_scalar(LN_10).mul_scalar(-10.0))
}
