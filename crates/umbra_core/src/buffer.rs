//! Channel-parameterized image buffer with PNG output.
//!
//! Pixels are stored as linear `f32`, row-major, `C` channels per pixel. The
//! image's color encoding is only applied when the buffer is written out.

use std::path::Path;

use image::{ColorType, ImageFormat};
use thiserror::Error;
use umbra_math::{IVec2, UVec2, Vec3};

use crate::encoding::ColorEncoding;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Unsupported channel count for PNG output: {0}")]
    UnsupportedChannelCount(usize),
}

pub type ImageResult<T> = Result<T, ImageError>;

/// A 2D grid of pixels with `C` channels each.
///
/// Reads and writes outside `[0, resolution)` are ignored: writes do nothing
/// and reads return zero.
pub struct Image<const C: usize> {
    resolution: UVec2,
    contents: Vec<f32>,
    encoding: Box<dyn ColorEncoding>,
}

impl<const C: usize> Image<C> {
    /// Create a black image that will be written with `encoding`.
    pub fn new(resolution: UVec2, encoding: impl ColorEncoding + 'static) -> Self {
        Self::with_boxed_encoding(resolution, Box::new(encoding))
    }

    /// Create a black image from an already boxed encoding.
    pub fn with_boxed_encoding(resolution: UVec2, encoding: Box<dyn ColorEncoding>) -> Self {
        let len = resolution.x as usize * resolution.y as usize * C;
        Self {
            resolution,
            contents: vec![0.0; len],
            encoding,
        }
    }

    pub fn width(&self) -> u32 {
        self.resolution.x
    }

    pub fn height(&self) -> u32 {
        self.resolution.y
    }

    pub fn dimensions(&self) -> UVec2 {
        self.resolution
    }

    pub fn encoding(&self) -> &dyn ColorEncoding {
        self.encoding.as_ref()
    }

    /// Offset of the first channel of pixel `p`, if it is inside the image.
    fn offset(&self, p: IVec2) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x as u32 >= self.resolution.x || p.y as u32 >= self.resolution.y
        {
            return None;
        }
        Some((p.y as usize * self.resolution.x as usize + p.x as usize) * C)
    }

    /// Set channel `c` of pixel `p`.
    pub fn set_channel(&mut self, p: IVec2, c: usize, value: f32) {
        if c >= C {
            return;
        }
        if let Some(offset) = self.offset(p) {
            self.contents[offset + c] = value;
        }
    }

    /// Channel `c` of pixel `p`, or 0 outside the image.
    pub fn get_channel(&self, p: IVec2, c: usize) -> f32 {
        if c >= C {
            return 0.0;
        }
        self.offset(p).map_or(0.0, |offset| self.contents[offset + c])
    }

    /// Set every channel of pixel `p`.
    pub fn set_pixel(&mut self, p: IVec2, values: [f32; C]) {
        if let Some(offset) = self.offset(p) {
            self.contents[offset..offset + C].copy_from_slice(&values);
        }
    }

    /// All channels of pixel `p`, or zeros outside the image.
    pub fn get_pixel(&self, p: IVec2) -> [f32; C] {
        let mut pixel = [0.0; C];
        if let Some(offset) = self.offset(p) {
            pixel.copy_from_slice(&self.contents[offset..offset + C]);
        }
        pixel
    }

    /// Encode every pixel to 8 bits, row-major, top row first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.contents.len()];
        self.encoding.encode_floats(&self.contents, &mut bytes);
        bytes
    }

    /// Write the image as a PNG file.
    ///
    /// Rows are flipped on the way out, so row 0 of the buffer becomes the
    /// bottom row of the file.
    pub fn write_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        let color_type = match C {
            1 => ColorType::L8,
            2 => ColorType::La8,
            3 => ColorType::Rgb8,
            4 => ColorType::Rgba8,
            n => return Err(ImageError::UnsupportedChannelCount(n)),
        };

        let path = path.as_ref();
        let (width, height) = (self.resolution.x, self.resolution.y);
        let row_len = width as usize * C;

        let mut data = vec![0u8; self.contents.len()];
        for (y, src) in self.contents.chunks_exact(row_len.max(1)).enumerate() {
            let dst_row = height as usize - 1 - y;
            let dst = &mut data[dst_row * row_len..(dst_row + 1) * row_len];
            self.encoding.encode_floats(src, dst);
        }

        image::save_buffer_with_format(path, &data, width, height, color_type, ImageFormat::Png)?;

        log::info!("Wrote {} ({}x{}, {} channels)", path.display(), width, height, C);
        Ok(())
    }
}

impl Image<3> {
    /// Set an RGB pixel from a vector.
    pub fn set_color(&mut self, p: IVec2, color: Vec3) {
        self.set_pixel(p, color.to_array());
    }

    /// RGB pixel as a vector.
    pub fn get_color(&self, p: IVec2) -> Vec3 {
        Vec3::from_array(self.get_pixel(p))
    }
}
