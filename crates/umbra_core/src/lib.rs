//! Umbra Core - image storage and output.
//!
//! This crate provides:
//!
//! - **Color encodings**: `ColorEncoding` with `LinearEncoding` and `SrgbEncoding`
//! - **Image buffers**: `Image<C>`, a 1-4 channel pixel grid that writes PNG files
//!
//! # Example
//!
//! ```ignore
//! use umbra_core::{Image, SrgbEncoding};
//! use umbra_math::{IVec2, UVec2};
//!
//! let mut image = Image::<3>::new(UVec2::new(800, 600), SrgbEncoding);
//! image.set_pixel(IVec2::new(10, 20), [1.0, 0.5, 0.0]);
//! image.write_png("output.png")?;
//! ```

pub mod buffer;
pub mod encoding;

// Re-export commonly used types
pub use buffer::{Image, ImageError, ImageResult};
pub use encoding::{linear_to_srgb, srgb_to_linear, ColorEncoding, LinearEncoding, SrgbEncoding};
