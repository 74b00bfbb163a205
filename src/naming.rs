//! Icon file naming: supported extensions and logical names.
//!
//! An icon's logical name is its file stem. It is the identifier used in
//! `@if $icon == "<name>"` branches and in `<prefix><name>` class selectors,
//! and it pairs an SVG with its PNG fallback:
//! - `home.svg` → kind=Svg, name="home"
//! - `home.png` → kind=Png, name="home"
//! - `arrow-left.SVG` → kind=Svg, name="arrow-left"
//! - `notes.txt` → not an icon

use std::path::Path;

/// Supported icon formats, keyed by file extension (ASCII case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Svg,
    Png,
}

impl IconKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("svg") {
            Some(IconKind::Svg)
        } else if ext.eq_ignore_ascii_case("png") {
            Some(IconKind::Png)
        } else {
            None
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical lowercase extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            IconKind::Svg => "svg",
            IconKind::Png => "png",
        }
    }
}

/// Result of parsing an icon file name like `home.svg`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIcon {
    pub kind: IconKind,
    /// Logical name: the file stem.
    pub name: String,
}

/// Parse an icon file name. Returns `None` for unsupported extensions, for
/// names with an empty stem (`.svg`), and for stems that are not valid UTF-8
/// (they cannot name a selector).
pub fn parse_icon_name(path: &Path) -> Option<ParsedIcon> {
    let kind = IconKind::from_path(path)?;
    let name = path.file_stem()?.to_str()?.to_string();
    if name.is_empty() {
        return None;
    }
    Some(ParsedIcon { kind, name })
}

/// File name of the `kind` variant of the icon called `name`.
pub fn icon_file_name(name: &str, kind: IconKind) -> String {
    format!("{name}.{}", kind.extension())
}
