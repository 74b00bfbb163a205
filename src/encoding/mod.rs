//! Image encoders: turn one icon file into dimensions and a `data:` URI.
//!
//! | Format | Dimensions | Data URI |
//! |---|---|---|
//! | **SVG** | root `<svg>` `width`/`height`, else `viewBox` (`quick-xml`) | percent-encoded markup |
//! | **PNG** | `image::image_dimensions` | base64 of the file bytes |
//!
//! The module is split into:
//! - **Backend**: [`ImageEncoder`] trait, [`Dimensions`], [`EncoderSet`]
//! - **SVG**: [`SvgEncoder`]
//! - **PNG**: [`PngEncoder`]

pub mod backend;
pub mod png;
pub mod svg;

pub use backend::{Dimensions, EncodeError, EncoderSet, ImageEncoder};
pub use png::PngEncoder;
pub use svg::SvgEncoder;
