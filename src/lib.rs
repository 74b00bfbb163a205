//! # iconsass
//!
//! Encodes a directory of SVG and PNG icons into a Sass stylesheet. Every icon
//! is embedded as a data URI, and the consuming stylesheet picks icons by
//! name through a `grunticon` mixin:
//!
//! ```scss
//! .logo {
//!     @include grunticon("home", center center, true);
//! }
//! ```
//!
//! # Pipeline
//!
//! ```text
//! icons/      list (flat, .svg/.png)  →  Vec<IconFile>
//! IconFile    resolve                 →  Icon (dimensions + data URIs)
//! Icon        format                  →  mixin branch + class rule
//!             append                  →  icons.scss
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`directory`] | `DirectoryEncoder`: orchestrates listing, resolution, both passes, and writing |
//! | [`scan`] | Flat listing of supported icon files |
//! | [`naming`] | Extension → [`naming::IconKind`], file stem → logical name |
//! | [`encoding`] | `ImageEncoder` trait with SVG and PNG implementations |
//! | [`styles`] | `StyleFormatter` strategy: built-in fragments or a handlebars template |
//! | [`selectors`] | Custom selector expansion, including the `"*"` wildcard |
//! | [`config`] | `iconsass.toml` loading, merging, and validation |
//! | [`types`] | Icon records shared across modules |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Three Fallback Tiers
//!
//! Each icon is emitted three times: an SVG data URI, a PNG data URI under
//! `.no-svg`, and a plain PNG URL under `.no-js`, `.ie6` and `.ie7`. The
//! ancestor classes are set by a feature-detection script on the page, so the
//! stylesheet itself needs no media queries or hacks.
//!
//! ## Resolve Once, Format Twice
//!
//! The mixin and the class rules are written in two passes, but every file is
//! read and encoded only once. The collected [`types::Icon`] records feed both
//! passes.
//!
//! ## Explicit Duplicate Policy
//!
//! `home.svg` and `home.png` share the logical name `home`. Class rules must be
//! unique, so the class pass always rejects such pairs. The mixin follows the
//! configurable [`config::DuplicatePolicy`] (skip, allow, or error).
//!
//! ## Append As You Go
//!
//! The output file is truncated at the start and each fragment is appended as
//! soon as it is formatted. A failed run leaves a partial file behind; only a
//! clean run produces a complete stylesheet.

pub mod config;
pub mod directory;
pub mod encoding;
pub mod naming;
pub mod output;
pub mod scan;
pub mod selectors;
pub mod styles;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
