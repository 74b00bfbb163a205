//! PNG encoder: `image` for the header, `base64` for the payload.

use super::backend::{Dimensions, EncodeError, ImageEncoder};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fs;
use std::path::Path;

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

pub struct PngEncoder;

impl PngEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PngEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageEncoder for PngEncoder {
    fn stats(&self, path: &Path) -> Result<Dimensions, EncodeError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| match e {
            image::ImageError::IoError(io) => EncodeError::Io(io),
            other => EncodeError::Malformed(format!("{}: {other}", path.display())),
        })?;
        Ok(Dimensions {
            width: f64::from(width),
            height: f64::from(height),
        })
    }

    fn encode(&self, path: &Path) -> Result<String, EncodeError> {
        let bytes = fs::read(path)?;
        Ok(png_data_uri(&bytes))
    }
}

pub fn png_data_uri(bytes: &[u8]) -> String {
    format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(bytes))
}
