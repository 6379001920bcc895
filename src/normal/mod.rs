//! Depth-to-normal conversion.

pub use crate::view::View;
pub use burn::tensor::{backend::Backend, Tensor};

use crate::function::tensor_extensions::TensorFloatExtension;

/// Convert a depth map into a normal map in camera space.
///
/// ## Arguments
///
/// * `depth_map` - `[H, W]`
/// * `field_of_view_x` - The horizontal field of view in degrees.
/// * `field_of_view_y` - The vertical field of view in degrees.
/// * `image_width` - `I_x`, which derives `f_x`.
/// * `image_height` - `I_y`, which derives `f_y`.
///
/// ## Returns
///
/// `[H, W, 3]` unit vectors `(x, y, z)`.
pub fn depth_to_normal<B: Backend>(
    depth_map: Tensor<B, 2>,
    field_of_view_x: f64,
    field_of_view_y: f64,
    image_width: u32,
    image_height: u32,
) -> Tensor<B, 3> {
    let view = View::from_fov_degrees(
        field_of_view_x,
        field_of_view_y,
        image_width,
        image_height,
    );
    depth_to_normal_with_view(depth_map, &view)
}

/// Convert a depth map into a normal map in camera space using the view.
///
/// `depth_map` is `[H, W]` and the output is `[H, W, 3]`.
pub fn depth_to_normal_with_view<B: Backend>(
    depth_map: Tensor<B, 2>,
    view: &View,
) -> Tensor<B, 3> {
    #[cfg(all(debug_assertions, not(test)))]
    log::debug!(
        target: "gausplat::supervision::normal",
        "depth_to_normal > dims {:?}",
        depth_map.dims(),
    );

    let focal_length_x = view.focal_length_x();
    let focal_length_y = view.focal_length_y();

    // [H, W]
    let depth_grad_x =
        depth_map.to_owned().gradient(1).div_scalar(focal_length_x);
    let depth_grad_y =
        depth_map.to_owned().gradient(0).div_scalar(focal_length_y);

    // [H, W, 3] <- (-dz / dx, -dz / dy, 1)
    let normals = Tensor::stack::<3>(
        vec![depth_grad_x.neg(), depth_grad_y.neg(), depth_map.ones_like()],
        2,
    );
    // [H, W, 3] <- [H, W, 1]
    let normals_norm = normals.to_owned().norm_l2_dim(2).expand(normals.dims());

    normals.div(normals_norm)
}

#[cfg(test)]
mod tests {
    #[test]
    fn depth_to_normal_constant() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        let depth_map = Tensor::<B, 2>::full([10, 10], 5.0, device);
        let target = Tensor::<B, 1>::from_data([0.0, 0.0, 1.0], device)
            .reshape([1, 1, 3])
            .repeat_dim(0, 10)
            .repeat_dim(1, 10);
        let output = depth_to_normal(depth_map, 90.0, 90.0, 10, 10);
        assert_eq!(output.dims(), [10, 10, 3]);
        output
            .into_data()
            .assert_approx_eq(&target.into_data(), 6);
    }

    #[test]
    fn depth_to_normal_slope() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        // z = x, so dz / dx = 1 and f_x = 10 / tan(45 deg) / 2 = 5
        let depth_map = Tensor::<B, 1, burn::tensor::Int>::arange(0..10, device)
            .float()
            .reshape([1, 10])
            .repeat_dim(0, 8);
        let normal = [-0.2, 0.0, 1.0].map(|c| c / 1.04_f32.sqrt());
        let target = Tensor::<B, 1>::from_data(normal, device)
            .reshape([1, 1, 3])
            .repeat_dim(0, 8)
            .repeat_dim(1, 10);
        let output = depth_to_normal(depth_map, 90.0, 90.0, 10, 8);
        output
            .into_data()
            .assert_approx_eq(&target.into_data(), 5);
    }

    #[test]
    fn depth_to_normal_unit_length() {
        use super::*;
        use burn::{backend::NdArray, tensor::Distribution};

        type B = NdArray<f32>;
        let device = &Default::default();

        let depth_map = Tensor::<B, 2>::random(
            [24, 32],
            Distribution::Uniform(0.5, 20.0),
            device,
        );
        let view = View::from_fov_degrees(70.0, 55.0, 32, 24);
        let output = depth_to_normal_with_view(depth_map, &view);
        let target = Tensor::<B, 3>::ones([24, 32, 1], device);
        output
            .norm_l2_dim(2)
            .into_data()
            .assert_approx_eq(&target.into_data(), 5);
    }

    #[test]
    fn depth_to_normal_points_against_slope() {
        use super::*;
        use burn::backend::NdArray;

        type B = NdArray<f32>;
        let device = &Default::default();

        // Depth grows downwards
        let depth_map = Tensor::<B, 2>::from_data(
            [[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]],
            device,
        );
        let output = depth_to_normal(depth_map, 60.0, 60.0, 2, 3)
            .into_data()
            .to_vec::<f32>()
            .unwrap();
        for normal in output.chunks(3) {
            assert_eq!(normal[0], 0.0);
            assert!(normal[1] < 0.0, "{normal:?}");
            assert!(normal[2] > 0.0, "{normal:?}");
        }
    }
}
