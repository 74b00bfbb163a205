//! Encoder trait and shared types.
//!
//! The [`ImageEncoder`] trait defines the two operations every encoder must
//! support: `stats` (intrinsic dimensions) and `encode` (a ready-to-embed
//! `data:` URI). [`EncoderSet`] holds one encoder per supported extension and
//! is what the directory encoder dispatches through.

use crate::naming::IconKind;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed image: {0}")]
    Malformed(String),
}

/// Intrinsic pixel size of an icon.
///
/// SVG sizes may be fractional, so both fields are `f64`. Whole numbers
/// display without a decimal part (`20`, not `20.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Trait for icon encoders.
pub trait ImageEncoder {
    /// Get the icon's intrinsic dimensions.
    fn stats(&self, path: &Path) -> Result<Dimensions, EncodeError>;

    /// Encode the file as a `data:` URI.
    fn encode(&self, path: &Path) -> Result<String, EncodeError>;
}

/// One encoder per supported extension.
pub struct EncoderSet {
    svg: Box<dyn ImageEncoder>,
    png: Box<dyn ImageEncoder>,
}

impl EncoderSet {
    pub fn new(svg: Box<dyn ImageEncoder>, png: Box<dyn ImageEncoder>) -> Self {
        Self { svg, png }
    }

    /// The production encoders: [`SvgEncoder`](super::SvgEncoder) and
    /// [`PngEncoder`](super::PngEncoder).
    pub fn builtin() -> Self {
        Self::new(
            Box::new(super::svg::SvgEncoder::new()),
            Box::new(super::png::PngEncoder::new()),
        )
    }

    pub fn get(&self, kind: IconKind) -> &dyn ImageEncoder {
        match kind {
            IconKind::Svg => self.svg.as_ref(),
            IconKind::Png => self.png.as_ref(),
        }
    }

    /// Look up the encoder for a path by its extension.
    ///
    /// Returns `None` when no encoder is registered for the extension.
    pub fn for_path(&self, path: &Path) -> Option<&dyn ImageEncoder> {
        IconKind::from_path(path).map(|kind| self.get(kind))
    }
}

impl Default for EncoderSet {
    fn default() -> Self {
        Self::builtin()
    }
}
