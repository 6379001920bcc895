/// The stabilizer of SSIM luminance term.
///
/// `(0.01 * L)^2` where the dynamic range `L` is 1.
pub const SSIM_C1: f64 = 0.01 * 0.01;

/// The stabilizer of SSIM contrast-structure term.
///
/// `(0.03 * L)^2` where the dynamic range `L` is 1.
pub const SSIM_C2: f64 = 0.03 * 0.03;

/// The standard deviation of the Gaussian window.
pub const SSIM_SIGMA: f64 = 1.5;

/// The side length of the Gaussian window.
pub const SSIM_WINDOW_SIZE: usize = 11;

/// The ratio of the global standard deviation added to every patch deviation.
pub const PATCH_NORM_STD_EPSILON: f64 = 1e-2;
