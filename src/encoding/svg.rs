//! SVG encoder.
//!
//! Dimensions come from the root `<svg>` element: the `width` and `height`
//! attributes when they are plain or `px` lengths, otherwise the size part of
//! `viewBox`. The data URI embeds the markup percent-encoded rather than as
//! base64, which keeps it smaller and gzip-friendly.

use super::backend::{Dimensions, EncodeError, ImageEncoder};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs;
use std::path::Path;

const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;charset=US-ASCII,";

pub struct SvgEncoder;

impl SvgEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageEncoder for SvgEncoder {
    fn stats(&self, path: &Path) -> Result<Dimensions, EncodeError> {
        let source = fs::read_to_string(path)?;
        svg_dimensions(&source)
            .map_err(|e| EncodeError::Malformed(format!("{}: {e}", path.display())))
    }

    fn encode(&self, path: &Path) -> Result<String, EncodeError> {
        let source = fs::read_to_string(path)?;
        Ok(svg_data_uri(&source))
    }
}

/// Attributes of the root `<svg>` element that size it.
#[derive(Debug, Default)]
struct RootSize {
    width: Option<String>,
    height: Option<String>,
    view_box: Option<String>,
}

fn read_root_size(source: &str) -> Result<RootSize, String> {
    let mut reader = Reader::from_str(source);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() != b"svg" {
                    return Err("root element is not <svg>".to_string());
                }
                let mut size = RootSize::default();
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| e.to_string())?;
                    let value = attr
                        .unescape_value()
                        .map_err(|e| e.to_string())?
                        .into_owned();
                    match attr.key.as_ref() {
                        b"width" => size.width = Some(value),
                        b"height" => size.height = Some(value),
                        b"viewBox" => size.view_box = Some(value),
                        _ => {}
                    }
                }
                return Ok(size);
            }
            Ok(Event::Eof) => return Err("no <svg> element found".to_string()),
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
    }
}

/// Parse a length attribute. Only unitless and `px` values are absolute;
/// anything else (`%`, `em`, ...) yields `None`.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|n| is_size(*n))
}

fn is_size(n: f64) -> bool {
    n.is_finite() && n >= 0.0
}

/// Parse `viewBox="min-x min-y width height"` into `(width, height)`.
fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [_, _, w, h] if is_size(*w) && is_size(*h) => Some((*w, *h)),
        _ => None,
    }
}

/// Resolve the intrinsic size of an SVG document.
pub fn svg_dimensions(source: &str) -> Result<Dimensions, String> {
    let size = read_root_size(source)?;
    let view_box = size.view_box.as_deref().and_then(parse_view_box);

    let width = size
        .width
        .as_deref()
        .and_then(parse_length)
        .or(view_box.map(|(w, _)| w));
    let height = size
        .height
        .as_deref()
        .and_then(parse_length)
        .or(view_box.map(|(_, h)| h));

    match (width, height) {
        (Some(width), Some(height)) => Ok(Dimensions { width, height }),
        _ => Err("<svg> has no usable width/height or viewBox".to_string()),
    }
}

/// Drop `<!-- ... -->` comments. An unterminated comment runs to the end.
fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(start) = rest.find("<!--") {
        result.push_str(&rest[..start]);
        match rest[start + 4..].find("-->") {
            Some(end) => rest = &rest[start + 4 + end + 3..],
            None => return result,
        }
    }
    result.push_str(rest);
    result
}

/// Build the `data:` URI for an SVG document.
///
/// Line breaks and comments are removed and tabs become spaces before the
/// markup is percent-encoded.
pub fn svg_data_uri(source: &str) -> String {
    let flattened: String = strip_comments(source)
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .map(|c| if c == '\t' { ' ' } else { c })
        .collect();
    format!("{SVG_DATA_URI_PREFIX}{}", urlencoding::encode(&flattened))
}
