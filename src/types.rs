//! Icon records shared by the directory encoder, the formatters, and the
//! CLI output.

use crate::encoding::Dimensions;
use serde::Serialize;
use std::path::PathBuf;

/// The three images embedded for an icon, one per fallback tier.
///
/// Field names serialize as `datasvg`/`datapng`/`png`, the names templates
/// use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataUris {
    /// SVG data URI for SVG-capable browsers.
    #[serde(rename = "datasvg")]
    pub svg: String,
    /// PNG data URI for `.no-svg` browsers, or the public path when the
    /// PNG is not inlined.
    #[serde(rename = "datapng")]
    pub png: String,
    /// Public URL of the PNG file for `.no-js`/`.ie6`/`.ie7` browsers.
    #[serde(rename = "png")]
    pub png_path: String,
}

/// A fully resolved icon, ready to be formatted.
#[derive(Debug, Clone)]
pub struct Icon {
    /// Logical name (file stem).
    pub name: String,
    /// Input file the icon was discovered from.
    pub source: PathBuf,
    pub dimensions: Dimensions,
    pub datauri: DataUris,
}

/// Outcome of a successful encoding run.
#[derive(Debug, Default)]
pub struct EncodeReport {
    /// Every icon resolved from the input directory, in processing order.
    pub icons: Vec<Icon>,
    /// Number of `@if` branches written to the mixin.
    pub mixin_branches: usize,
    /// Number of class rules written.
    pub classes: usize,
    /// Names whose repeated occurrences were left out of the mixin.
    pub skipped_duplicates: Vec<String>,
}
