//! Shape trait for ray-surface intersection.
//!
//! Concrete shapes (spheres, triangles, ...) plug in here; the ray is the only
//! contract they share with the camera.

use umbra_math::{Ray, Vec3};

/// Where a ray met a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeIntersection {
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at the intersection
    pub normal: Vec3,
    /// Ray parameter of the intersection
    pub t: f32,
}

/// Trait for objects that can be intersected by rays.
pub trait Shape: Send + Sync {
    /// Closest intersection with `t` in `(0, t_max)`, if any.
    fn intersect(&self, ray: &Ray, t_max: f32) -> Option<ShapeIntersection>;

    /// Whether any intersection exists before `t_max`.
    fn intersects(&self, ray: &Ray, t_max: f32) -> bool {
        self.intersect(ray, t_max).is_some()
    }
}
