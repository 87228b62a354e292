//! Image drivers.
//!
//! Each driver computes pixel colours in parallel with rayon and then
//! writes them into an [`Image`] on the calling thread.

use rayon::prelude::*;
use umbra_core::{ColorEncoding, Image};
use umbra_math::{IVec2, UVec2, Vec3};

use crate::camera::{Camera, CameraSample};

/// Linear RGB color.
pub type Color = Vec3;

/// Evaluate `shade` for every pixel centre, row-major from the top row.
fn shade_pixels<F>(resolution: UVec2, shade: F) -> Vec<Color>
where
    F: Fn(u32, u32) -> Color + Sync,
{
    (0..resolution.y)
        .into_par_iter()
        .flat_map_iter(|y| {
            let shade = &shade;
            (0..resolution.x).map(move |x| shade(x, y))
        })
        .collect()
}

/// Store row-major colours into a fresh image.
fn fill_image(
    resolution: UVec2,
    encoding: Box<dyn ColorEncoding>,
    colors: &[Color],
) -> Image<3> {
    let mut image = Image::<3>::with_boxed_encoding(resolution, encoding);
    let width = resolution.x.max(1) as usize;
    for (i, color) in colors.iter().enumerate() {
        let p = IVec2::new((i % width) as i32, (i / width) as i32);
        image.set_color(p, *color);
    }
    image
}

/// Red/green ramp over the image: pixel (x, y) gets
/// `((x + 0.5) / width, (y + 0.5) / height, 0)`.
pub fn render_gradient(resolution: UVec2, encoding: Box<dyn ColorEncoding>) -> Image<3> {
    let (w, h) = (resolution.x as f32, resolution.y as f32);
    let colors = shade_pixels(resolution, |x, y| {
        Color::new((x as f32 + 0.5) / w, (y as f32 + 0.5) / h, 0.0)
    });
    fill_image(resolution, encoding, &colors)
}

/// Map a unit direction into [0, 1]^3 for display.
#[inline]
pub fn direction_to_color(direction: Vec3) -> Color {
    0.5 * direction + Vec3::splat(0.5)
}

/// Visualise camera ray directions, one ray through each pixel centre.
///
/// Pixels for which the camera produces no ray stay black.
pub fn render_ray_directions(
    camera: &dyn Camera,
    resolution: UVec2,
    encoding: Box<dyn ColorEncoding>,
) -> Image<3> {
    let colors = shade_pixels(resolution, |x, y| {
        camera
            .generate_ray(CameraSample::pixel_center(x, y))
            .map_or(Color::ZERO, |ray| direction_to_color(ray.direction()))
    });
    fill_image(resolution, encoding, &colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use umbra_core::{LinearEncoding, SrgbEncoding};
    use umbra_math::{Ray, Transform};

    #[test]
    fn test_gradient_values() {
        let image = render_gradient(UVec2::new(4, 2), Box::new(LinearEncoding));

        assert_eq!(image.dimensions(), UVec2::new(4, 2));
        assert_eq!(image.get_color(IVec2::new(0, 0)), Color::new(0.125, 0.25, 0.0));
        assert_eq!(image.get_color(IVec2::new(3, 1)), Color::new(0.875, 0.75, 0.0));
        assert_eq!(image.get_color(IVec2::new(2, 0)), Color::new(0.625, 0.25, 0.0));
    }

    #[test]
    fn test_gradient_keeps_encoding() {
        let image = render_gradient(UVec2::new(1, 1), Box::new(SrgbEncoding));
        // 0.5 linear -> 186 with gamma 2.2
        assert_eq!(image.to_bytes(), vec![186, 186, 0]);
    }

    #[test]
    fn test_direction_to_color() {
        assert_eq!(direction_to_color(Vec3::Z), Color::new(0.5, 0.5, 1.0));
        assert_eq!(direction_to_color(Vec3::NEG_X), Color::new(0.0, 0.5, 0.5));
    }

    #[test]
    fn test_ray_directions_image() {
        let resolution = UVec2::new(16, 12);
        let camera = PerspectiveCamera::new(resolution, 45.0, Transform::default());
        let image = render_ray_directions(&camera, resolution, Box::new(LinearEncoding));

        for (x, y) in [(0, 0), (7, 5), (15, 11)] {
            let expected = direction_to_color(
                camera
                    .generate_ray(CameraSample::pixel_center(x, y))
                    .unwrap()
                    .direction(),
            );
            let actual = image.get_color(IVec2::new(x as i32, y as i32));
            assert!((actual - expected).length() < 1e-6);
        }

        // Top-left looks toward -x, -y
        let corner = image.get_color(IVec2::new(0, 0));
        assert!(corner.x < 0.5 && corner.y < 0.5 && corner.z > 0.5);
    }

    struct NoRays;

    impl Camera for NoRays {
        fn generate_ray(&self, _sample: CameraSample) -> Option<Ray> {
            None
        }
    }

    #[test]
    fn test_missing_rays_stay_black() {
        let image = render_ray_directions(&NoRays, UVec2::new(3, 3), Box::new(LinearEncoding));
        assert!(image.to_bytes().iter().all(|&b| b == 0));
    }
}
