//! Shared test utilities for the iconsass test suite.
//!
//! Provides fixture writers (real SVG and PNG files) and lookups over
//! generated stylesheets.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_svg(tmp.path(), "home", 20, 20);
//! write_png(tmp.path(), "home", 20, 20);
//!
//! // ... encode ...
//! assert_eq!(count_branches(&css, "home"), 1);
//! ```

use crate::encoding::Dimensions;
use crate::types::{DataUris, Icon};
use std::path::{Path, PathBuf};

// =========================================================================
// Fixture files
// =========================================================================

/// Write `<dir>/<name>.svg` with the given size. Returns its path.
pub fn write_svg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(format!("{name}.svg"));
    let source = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}px\" height=\"{height}px\" viewBox=\"0 0 {width} {height}\">\n\
         \t<rect width=\"{width}\" height=\"{height}\" fill=\"#000\"/>\n\
         </svg>\n"
    );
    std::fs::write(&path, source).unwrap();
    path
}

/// Write `<dir>/<name>.png`, a solid image of the given size. Returns its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(format!("{name}.png"));
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255]));
    img.save(&path).unwrap();
    path
}

// =========================================================================
// In-memory records
// =========================================================================

/// A 20×20 icon with recognizable placeholder URIs.
pub fn sample_icon(name: &str) -> Icon {
    Icon {
        name: name.to_string(),
        source: PathBuf::from(format!("icons/{name}.png")),
        dimensions: Dimensions {
            width: 20.0,
            height: 20.0,
        },
        datauri: DataUris {
            svg: format!("data:image/svg+xml;{name}"),
            png: format!("data:image/png;{name}"),
            png_path: format!("/{name}.png"),
        },
    }
}

// =========================================================================
// Stylesheet lookups
// =========================================================================

/// Number of `@if $icon == "<name>"` branches in a stylesheet.
pub fn count_branches(css: &str, name: &str) -> usize {
    css.matches(&format!("@if $icon == \"{name}\" {{")).count()
}
