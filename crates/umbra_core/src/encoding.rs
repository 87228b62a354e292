//! Color encodings used when converting between stored linear values and
//! 8-bit output.

/// Apply the display gamma (2.2) to a linear value.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    linear.powf(1.0 / 2.2)
}

/// Undo the display gamma (2.2).
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    srgb.powf(2.2)
}

/// Strategy for mapping between linear radiance values and encoded values.
///
/// An image owns exactly one encoding, fixed when the image is created.
pub trait ColorEncoding: Send + Sync {
    /// Encoded value to linear.
    fn to_linear(&self, encoded: f32) -> f32 {
        encoded
    }

    /// Linear value to encoded.
    fn from_linear(&self, linear: f32) -> f32 {
        linear
    }

    /// Decode 8-bit values into linear floats.
    fn decode_bytes(&self, input: &[u8], output: &mut [f32]) {
        for (out, &byte) in output.iter_mut().zip(input) {
            *out = self.to_linear(byte as f32 / 255.0);
        }
    }

    /// Encode linear floats to 8-bit values, rounding and clamping to [0, 255].
    fn encode_floats(&self, input: &[f32], output: &mut [u8]) {
        for (out, &value) in output.iter_mut().zip(input) {
            *out = (self.from_linear(value) * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Values are stored and written as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearEncoding;

impl ColorEncoding for LinearEncoding {}

/// Gamma 2.2 approximation of sRGB.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrgbEncoding;

impl ColorEncoding for SrgbEncoding {
    fn to_linear(&self, encoded: f32) -> f32 {
        srgb_to_linear(encoded)
    }

    fn from_linear(&self, linear: f32) -> f32 {
        linear_to_srgb(linear)
    }
}
