//! Structural similarity.

pub use super::*;
pub use burn::config::Config;

use crate::preset::loss::{SSIM_C1, SSIM_C2, SSIM_SIGMA, SSIM_WINDOW_SIZE};
use burn::tensor::{module::conv2d, ops::ConvOptions, TensorData};

/// The configuration for [`Ssim`].
#[derive(Config, Copy, Debug)]
pub struct SsimConfig {
    /// The standard deviation of the Gaussian window.
    #[config(default = "SSIM_SIGMA")]
    pub sigma: f64,
    /// The side length of the Gaussian window.
    ///
    /// The SSIM map keeps the input size only if it is odd.
    #[config(default = "SSIM_WINDOW_SIZE")]
    pub window_size: usize,
}

/// Single-scale SSIM with a Gaussian window.
#[derive(Clone, Debug)]
pub struct Ssim<B: Backend> {
    /// `[C, 1, S, S]`
    pub window: Tensor<B, 4>,
}

impl SsimConfig {
    /// Initialize the window for `channel_count` channels on the device.
    pub fn init<B: Backend>(
        &self,
        channel_count: usize,
        device: &B::Device,
    ) -> Result<Ssim<B>, Error> {
        if self.window_size == 0 {
            return Err(Error::Validation(
                "window_size (0)".into(),
                "positive".into(),
            ));
        }

        let window = create_window_with_sigma(
            self.window_size,
            self.sigma,
            channel_count,
            device,
        );

        Ok(Ssim { window })
    }
}

impl Default for SsimConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Ssim<B> {
    /// Evaluate the SSIM between two images.
    ///
    /// ## Arguments
    ///
    /// * `value` - `[N, C, H, W]`
    /// * `target` - `[N, C, H, W]`
    /// * `mask` - Broadcastable to `[N, C, H, W]`. Both images become
    ///   `image * mask + (1 - mask)` before the evaluation.
    /// * `size_average` - Whether to average over every sample.
    ///
    /// ## Returns
    ///
    /// `[1]` if `size_average` is `true`, otherwise `[N]`.
    pub fn evaluate(
        &self,
        value: Tensor<B, 4>,
        target: Tensor<B, 4>,
        mask: Option<Tensor<B, 4>>,
        size_average: bool,
    ) -> Result<Tensor<B, 1>, Error> {
        let dims = value.dims();
        check_dims_same(dims, target.dims())?;

        let [channel_count, _, window_size, _] = self.window.dims();
        if dims[1] != channel_count {
            return Err(Error::MismatchedTensorShape(
                dims.to_vec(),
                self.window.dims().to_vec(),
            ));
        }

        #[cfg(all(debug_assertions, not(test)))]
        log::debug!(
            target: "gausplat::supervision::loss",
            "ssim > dims {dims:?}, window_size {window_size}",
        );

        let (image_1, image_2) = match mask {
            Some(mask) => {
                check_dims_broadcastable(mask.dims(), dims)?;
                let mask = mask.expand(dims);
                let mask_inverse = mask.to_owned().neg().add_scalar(1.0);
                (
                    value * mask.to_owned() + mask_inverse.to_owned(),
                    target * mask + mask_inverse,
                )
            },
            None => (value, target),
        };

        let padding = window_size / 2;
        let options =
            ConvOptions::new([1, 1], [padding, padding], [1, 1], channel_count);
        let filter = |input: Tensor<B, 4>| {
            conv2d(input, self.window.to_owned(), None, options.to_owned())
        };

        let mu_1 = filter(image_1.to_owned());
        let mu_2 = filter(image_2.to_owned());
        let mu_1_sq = mu_1.to_owned() * mu_1.to_owned();
        let mu_2_sq = mu_2.to_owned() * mu_2.to_owned();
        let mu_12 = mu_1 * mu_2;

        // E[XY] - E[X]E[Y]
        let sigma_1_sq =
            filter(image_1.to_owned() * image_1.to_owned()) - mu_1_sq.to_owned();
        let sigma_2_sq =
            filter(image_2.to_owned() * image_2.to_owned()) - mu_2_sq.to_owned();
        let sigma_12 = filter(image_1 * image_2) - mu_12.to_owned();

        let ssim_map = (mu_12.mul_scalar(2.0).add_scalar(SSIM_C1)
            * sigma_12.mul_scalar(2.0).add_scalar(SSIM_C2))
            / ((mu_1_sq + mu_2_sq).add_scalar(SSIM_C1)
                * (sigma_1_sq + sigma_2_sq).add_scalar(SSIM_C2));

        let output = if size_average {
            ssim_map.mean()
        } else {
            ssim_map.flatten::<2>(1, 3).mean_dim(1).squeeze::<1>(1)
        };

        Ok(output)
    }
}

/// Single-scale SSIM with a Gaussian window of `sigma = 1.5`.
///
/// The window is rebuilt on every call.
/// See [`Ssim::evaluate`] for the arguments.
pub fn ssim<B: Backend>(
    value: Tensor<B, 4>,
    target: Tensor<B, 4>,
    mask: Option<Tensor<B, 4>>,
    window_size: usize,
    size_average: bool,
) -> Result<Tensor<B, 1>, Error> {
    let channel_count = value.dims()[1];

    SsimConfig::new()
        .with_window_size(window_size)
        .init(channel_count, &value.device())?
        .evaluate(value, target, mask, size_average)
}

/// A 1D Gaussian window normalized to sum to 1.
///
/// `g[x] = exp(-(x - S / 2)^2 / (2 * sigma^2))`
pub fn gaussian(
    window_size: usize,
    sigma: f64,
) -> Vec<f64> {
    let center = (window_size / 2) as f64;
    let window = (0..window_size)
        .map(|x| (-(x as f64 - center).powi(2) / (2.0 * sigma * sigma)).exp())
        .collect::<Vec<_>>();
    let window_sum = window.iter().sum::<f64>();

    window.into_iter().map(|w| w / window_sum).collect()
}

/// A 2D Gaussian window of `sigma = 1.5` for every channel.
///
/// The shape is `[C, 1, S, S]`.
pub fn create_window<B: Backend>(
    window_size: usize,
    channel_count: usize,
    device: &B::Device,
) -> Tensor<B, 4> {
    create_window_with_sigma(window_size, SSIM_SIGMA, channel_count, device)
}

fn create_window_with_sigma<B: Backend>(
    window_size: usize,
    sigma: f64,
    channel_count: usize,
    device: &B::Device,
) -> Tensor<B, 4> {
    let window_1d = gaussian(window_size, sigma);
    // [S * S] <- [S, 1] x [1, S]
    let window_2d = window_1d
        .iter()
        .flat_map(|y| window_1d.iter().map(move |x| (y * x) as f32))
        .collect::<Vec<_>>();

    Tensor::<B, 4>::from_data(
        TensorData::new(window_2d, [1, 1, window_size, window_size]),
        device,
    )
    .repeat_dim(0, channel_count)
}
