//! Pinhole camera views.

/// Focal length in pixels from the field of view in radians.
///
/// `f = I / tan(Fov / 2) / 2`
#[inline]
pub fn fov2focal(
    field_of_view: f64,
    pixels: u32,
) -> f64 {
    pixels as f64 / (field_of_view / 2.0).tan() / 2.0
}

/// Field of view in radians from the focal length in pixels.
///
/// `Fov = atan(I / f / 2) * 2`
#[inline]
pub fn focal2fov(
    focal_length: f64,
    pixels: u32,
) -> f64 {
    (pixels as f64 / focal_length / 2.0).atan() * 2.0
}

/// A pinhole camera view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct View {
    /// The horizontal field of view in radians.
    pub field_of_view_x: f64,
    /// The vertical field of view in radians.
    pub field_of_view_y: f64,
    /// Image height.
    pub image_height: u32,
    /// Image width.
    pub image_width: u32,
}

impl View {
    /// Build a view from the fields of view in degrees.
    pub fn from_fov_degrees(
        field_of_view_x: f64,
        field_of_view_y: f64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        Self {
            field_of_view_x: field_of_view_x.to_radians(),
            field_of_view_y: field_of_view_y.to_radians(),
            image_height,
            image_width,
        }
    }

    /// Build a view from the focal lengths in pixels.
    pub fn from_focal_lengths(
        focal_length_x: f64,
        focal_length_y: f64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        Self {
            field_of_view_x: focal2fov(focal_length_x, image_width),
            field_of_view_y: focal2fov(focal_length_y, image_height),
            image_height,
            image_width,
        }
    }

    /// `f_x <- I_x / tan(Fov_x / 2) / 2`
    #[inline]
    pub fn focal_length_x(&self) -> f64 {
        fov2focal(self.field_of_view_x, self.image_width)
    }

    /// `f_y <- I_y / tan(Fov_y / 2) / 2`
    #[inline]
    pub fn focal_length_y(&self) -> f64 {
        fov2focal(self.field_of_view_y, self.image_height)
    }
}
