//! Umbra renderer - camera ray generation and image drivers.
//!
//! Cameras turn raster samples into world-space rays through the transform
//! engine in `umbra_math`; the drivers evaluate those rays per pixel in
//! parallel and hand the result to `umbra_core` images.

mod camera;
mod config;
mod renderer;
mod shape;

pub use camera::{Camera, CameraSample, PerspectiveCamera, FAR_PLANE, NEAR_PLANE};
pub use config::{ConfigError, ConfigResult, RenderConfig};
pub use renderer::{direction_to_color, render_gradient, render_ray_directions, Color};
pub use shape::{Shape, ShapeIntersection};

/// Re-export common types from the lower crates
pub use umbra_core::{ColorEncoding, Image, ImageError, LinearEncoding, SrgbEncoding};
pub use umbra_math::{Ray, Transform, UVec2, Vec2, Vec3};
