// Re-export glam for convenience
pub use glam::*;

// Umbra math types
mod compensated;
mod error;
mod matrix;
mod ray;
mod transform;

pub use compensated::{
    difference_of_products, inner_product, sum_of_products, two_product, two_sum,
    CompensatedFloat,
};
pub use error::{MathError, MathResult};
pub use matrix::{Matrix, Matrix3, Matrix4};
pub use ray::Ray;
pub use transform::Transform;
