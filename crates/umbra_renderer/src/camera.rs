//! Camera models for ray generation.

use umbra_math::{Ray, Transform, UVec2, Vec2, Vec3};

/// Near clip plane of the perspective projection.
pub const NEAR_PLANE: f32 = 0.05;
/// Far clip plane of the perspective projection.
pub const FAR_PLANE: f32 = 1024.0;

/// Input to ray generation: a continuous position in raster space.
///
/// `pixel` may carry sub-pixel offsets; (0, 0) is the top-left corner of the
/// image and (width, height) the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraSample {
    pub pixel: Vec2,
}

impl CameraSample {
    pub fn new(pixel: Vec2) -> Self {
        Self { pixel }
    }

    /// Sample at the centre of pixel `(x, y)`.
    pub fn pixel_center(x: u32, y: u32) -> Self {
        Self::new(Vec2::new(x as f32 + 0.5, y as f32 + 0.5))
    }
}

/// Anything that turns raster samples into world-space rays.
///
/// Implementations are immutable after construction and shared read-only
/// across render threads.
pub trait Camera: Send + Sync {
    /// World-space ray through `sample`, or `None` if this camera rejects it
    /// (e.g. a lens sample outside the aperture).
    fn generate_ray(&self, sample: CameraSample) -> Option<Ray>;
}

/// Pinhole camera with a symmetric perspective projection.
///
/// Camera space looks down +Z; `camera_to_world` places it in the scene.
#[derive(Debug, Clone, Copy)]
pub struct PerspectiveCamera {
    resolution: UVec2,
    fov_degrees: f32,
    projection: Transform,
    camera_to_world: Transform,
}

impl PerspectiveCamera {
    /// Create a camera for an image of `resolution` with a field of view of
    /// `fov_degrees`.
    pub fn new(resolution: UVec2, fov_degrees: f32, camera_to_world: Transform) -> Self {
        log::debug!(
            "Perspective camera {}x{}, fov {} deg",
            resolution.x,
            resolution.y,
            fov_degrees
        );
        Self {
            resolution,
            fov_degrees,
            projection: Transform::perspective(fov_degrees, NEAR_PLANE, FAR_PLANE),
            camera_to_world,
        }
    }

    pub fn resolution(&self) -> UVec2 {
        self.resolution
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Camera-to-NDC projection.
    pub fn projection(&self) -> &Transform {
        &self.projection
    }

    pub fn camera_to_world(&self) -> &Transform {
        &self.camera_to_world
    }
}

impl Camera for PerspectiveCamera {
    fn generate_ray(&self, sample: CameraSample) -> Option<Ray> {
        // Raster -> [0,1]^2 screen space on the far plane
        let screen = Vec3::new(
            sample.pixel.x / self.resolution.x as f32,
            sample.pixel.y / self.resolution.y as f32,
            1.0,
        );
        let ndc = 2.0 * screen - Vec3::ONE;

        let point_on_far_plane = self.projection.apply_inverse_point(ndc);
        let origin = Vec3::ZERO;
        let direction = (point_on_far_plane - origin).normalize();

        Some(self.camera_to_world.apply_ray(&Ray::new(origin, direction)))
    }
}
