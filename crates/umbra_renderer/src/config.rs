//! JSON render configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use umbra_core::{ColorEncoding, LinearEncoding, SrgbEncoding};
use umbra_math::{Transform, UVec2, Vec3};

use crate::camera::PerspectiveCamera;

/// Errors that can occur while loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Render settings.
///
/// Every field is optional in JSON; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Camera position
    pub eye: [f32; 3],
    /// Point the camera looks at
    pub target: [f32; 3],
    /// Up hint for the camera basis
    pub up: [f32; 3],
    /// Write 8-bit output with gamma 2.2 instead of linear
    pub srgb: bool,
    /// Where the gradient image goes
    pub gradient_output: PathBuf,
    /// Where the ray-direction image goes, if anywhere
    pub rays_output: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_degrees: 45.0,
            eye: [0.0, 0.0, 0.0],
            target: [0.0, 0.0, 1.0],
            up: [0.0, 1.0, 0.0],
            srgb: true,
            gradient_output: PathBuf::from("output.png"),
            rays_output: Some(PathBuf::from("rays.png")),
        }
    }
}

impl RenderConfig {
    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce an image.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn resolution(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    /// Camera-to-world transform from `eye`, `target` and `up`.
    pub fn camera_transform(&self) -> Transform {
        Transform::look_at(
            Vec3::from_array(self.eye),
            Vec3::from_array(self.target),
            Vec3::from_array(self.up),
        )
    }

    pub fn camera(&self) -> PerspectiveCamera {
        PerspectiveCamera::new(self.resolution(), self.fov_degrees, self.camera_transform())
    }

    /// Output encoding for written images.
    pub fn encoding(&self) -> Box<dyn ColorEncoding> {
        if self.srgb {
            Box::new(SrgbEncoding)
        } else {
            Box::new(LinearEncoding)
        }
    }
}
