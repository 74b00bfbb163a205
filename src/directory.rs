//! Directory encoding: icons in, stylesheet out.
//!
//! [`DirectoryEncoder::encode`] turns a flat directory of SVG/PNG icons into
//! a stylesheet with one `grunticon` mixin and, optionally, one class rule
//! per icon:
//!
//! ```text
//! icons/home.svg ─┐                      ┌─ @mixin grunticon(...) {
//! icons/home.png ─┤  resolve (once) ──►  │     @if $icon == "home" {...}
//! icons/menu.png ─┘  Vec<Icon>           │     @if $icon == "menu" {...}
//!                                        │  }
//!                                        └─ .i--home:before{...}   (classes)
//! ```
//!
//! ## Resolution
//!
//! Each input file is resolved into an [`Icon`]: dimensions from the file's
//! own encoder, and three images for the fallback tiers. For an icon `N`:
//!
//! - **SVG**: `<temp>/N.svg`, else the file itself if it is an SVG, else
//!   `<input>/N.svg`
//! - **PNG**: the file itself if it is a PNG, else `<input>/N.png`
//! - **Public PNG path**: `pngpath` + the PNG's file name as it is on disk
//!
//! Companion lookups accept any extension case (`N.SVG`), preferring the
//! lowercase name.
//!
//! ## Writing
//!
//! The output file is deleted, then appended to fragment by fragment as
//! icons are resolved. A failure aborts the run and leaves the fragments
//! written so far on disk.
//!
//! ## Duplicate Names
//!
//! Two files with the same stem (`home.svg` + `home.png`) are the same
//! logical icon. The mixin pass applies [`DuplicatePolicy`]; the class pass
//! checks every name before writing its first rule and fails on any repeat.

use crate::config::{DuplicatePolicy, EncoderConfig, EncodingOptions, PngOptions};
use crate::encoding::{Dimensions, EncodeError, EncoderSet};
use crate::naming::{IconKind, icon_file_name};
use crate::scan::{self, IconFile};
use crate::selectors::expand_selectors;
use crate::styles::{
    BuiltinFormatter, FormatError, IconStyles, MIXIN_END, MIXIN_START, StyleContext,
    StyleFormatter, TemplateFormatter,
};
use crate::types::{DataUris, EncodeReport, Icon};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoder does not recognize file type: {0}")]
    UnsupportedType(PathBuf),
    #[error("Two files with the same name: `{0}` exist in the input directory")]
    DuplicateName(String),
    #[error("No {kind} found for icon `{name}` (looked for {path})")]
    MissingCompanion {
        name: String,
        kind: &'static str,
        path: PathBuf,
    },
    #[error("Failed to encode {path}: {source}")]
    Encoder {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
    #[error("Failed to format icon `{name}`: {source}")]
    Format {
        name: String,
        #[source]
        source: FormatError,
    },
}

/// Encodes one input directory into one stylesheet.
pub struct DirectoryEncoder {
    input: PathBuf,
    output: PathBuf,
    png_options: PngOptions,
    options: EncodingOptions,
    tmp: PathBuf,
    generate_classes: bool,
    encoders: EncoderSet,
    formatter: Box<dyn StyleFormatter>,
}

impl DirectoryEncoder {
    /// Assemble an encoder. No I/O happens here.
    ///
    /// Uses the built-in image encoders and the built-in formatter; see
    /// [`with_encoders`](Self::with_encoders) and
    /// [`with_formatter`](Self::with_formatter).
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        png_options: PngOptions,
        options: EncodingOptions,
        tmp: impl Into<PathBuf>,
        generate_classes: bool,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            png_options,
            options,
            tmp: tmp.into(),
            generate_classes,
            encoders: EncoderSet::builtin(),
            formatter: Box::new(BuiltinFormatter),
        }
    }

    /// Build an encoder from a loaded config. Loads the class template when
    /// `css.template` is set.
    pub fn from_config(config: &EncoderConfig) -> Result<Self, FormatError> {
        let encoder = Self::new(
            &config.input,
            &config.output,
            config.png.clone(),
            config.css.clone(),
            config.effective_temp_dir(),
            config.generate_classes,
        );
        match &config.css.template {
            Some(path) => {
                debug!("Using class template {}", path.display());
                Ok(encoder.with_formatter(Box::new(TemplateFormatter::from_file(path)?)))
            }
            None => Ok(encoder),
        }
    }

    pub fn with_encoders(mut self, encoders: EncoderSet) -> Self {
        self.encoders = encoders;
        self
    }

    pub fn with_formatter(mut self, formatter: Box<dyn StyleFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Run the whole pipeline, rewriting the output file.
    pub fn encode(&self) -> Result<EncodeReport, DirectoryError> {
        prepare_output(&self.output)?;
        let files = scan::list_icon_files(&self.input)?;
        info!(
            "Encoding {} icon files from {} into {}",
            files.len(),
            self.input.display(),
            self.output.display()
        );

        let mut out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output)?;
        let mut report = EncodeReport::default();

        // Mixin pass: resolve every icon once and write its branch
        out.write_all(MIXIN_START.as_bytes())?;
        let mut emitted = HashSet::new();
        let mut rendered: Vec<(Icon, IconStyles)> = Vec::with_capacity(files.len());
        for file in &files {
            let icon = self.resolve_icon(file)?;
            let styles = self.styles(&icon)?;
            if emitted.insert(icon.name.clone()) {
                write_fragment(&mut out, &styles.mixin_body)?;
                report.mixin_branches += 1;
            } else {
                match self.options.mixin_duplicates {
                    DuplicatePolicy::Skip => {
                        debug!("Skipping duplicate mixin branch for `{}`", icon.name);
                        report.skipped_duplicates.push(icon.name.clone());
                    }
                    DuplicatePolicy::Allow => {
                        write_fragment(&mut out, &styles.mixin_body)?;
                        report.mixin_branches += 1;
                    }
                    DuplicatePolicy::Error => {
                        return Err(DirectoryError::DuplicateName(icon.name));
                    }
                }
            }
            rendered.push((icon, styles));
        }
        out.write_all(MIXIN_END.as_bytes())?;
        info!("Wrote {} mixin branches", report.mixin_branches);

        // Class pass: opt-in to keep the stylesheet small
        if self.generate_classes {
            let mut seen = HashSet::new();
            for (icon, _) in &rendered {
                check_name(&mut seen, &icon.name)?;
            }
            for (_, styles) in &rendered {
                out.write_all(b"\n")?;
                out.write_all(styles.class.as_bytes())?;
                out.write_all(b"\n")?;
                report.classes += 1;
            }
            info!("Wrote {} class rules", report.classes);
        }

        report.icons = rendered.into_iter().map(|(icon, _)| icon).collect();
        Ok(report)
    }

    /// Resolve one input file into an icon record.
    pub fn resolve_icon(&self, file: &IconFile) -> Result<Icon, DirectoryError> {
        debug!("Resolving {}", file.path.display());
        let dimensions = self.stats(&file.path)?;
        let datauri = self.datauri(file)?;
        Ok(Icon {
            name: file.name.clone(),
            source: file.path.clone(),
            dimensions,
            datauri,
        })
    }

    /// Dimensions of a file, via the encoder registered for its extension.
    pub fn stats(&self, path: &Path) -> Result<Dimensions, DirectoryError> {
        let encoder = self
            .encoders
            .for_path(path)
            .ok_or_else(|| DirectoryError::UnsupportedType(path.to_path_buf()))?;
        encoder.stats(path).map_err(|source| DirectoryError::Encoder {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The three fallback images of the icon `file` belongs to.
    pub fn datauri(&self, file: &IconFile) -> Result<DataUris, DirectoryError> {
        let svg_path = self.svg_source(file)?;
        let png_path = self.png_source(file)?;
        let png_file_name = png_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| icon_file_name(&file.name, IconKind::Png));
        let public_png = self.options.public_png_url(&png_file_name);

        let svg = self.encode_with(IconKind::Svg, &svg_path)?;
        let png_uri = self.encode_with(IconKind::Png, &png_path)?;
        let png = if self.png_options.allows_inline(&png_uri) {
            png_uri
        } else {
            if !self.png_options.noencode {
                warn!(
                    "{} data URI is {} bytes (limit {}), referencing {} instead",
                    png_path.display(),
                    png_uri.len(),
                    self.png_options.max_datauri_length,
                    public_png
                );
            }
            public_png.clone()
        };

        Ok(DataUris {
            svg,
            png,
            png_path: public_png,
        })
    }

    /// Format an icon with the configured formatter.
    pub fn styles(&self, icon: &Icon) -> Result<IconStyles, DirectoryError> {
        let selectors = expand_selectors(&self.options.customselectors, &icon.name);
        self.formatter
            .format(&StyleContext {
                prefix: &self.options.prefix,
                icon,
                selectors: &selectors,
            })
            .map_err(|source| DirectoryError::Format {
                name: icon.name.clone(),
                source,
            })
    }

    fn encode_with(&self, kind: IconKind, path: &Path) -> Result<String, DirectoryError> {
        self.encoders
            .get(kind)
            .encode(path)
            .map_err(|source| DirectoryError::Encoder {
                path: path.to_path_buf(),
                source,
            })
    }

    fn svg_source(&self, file: &IconFile) -> Result<PathBuf, DirectoryError> {
        if let Some(in_tmp) = scan::find_icon_file(&self.tmp, &file.name, IconKind::Svg)? {
            return Ok(in_tmp);
        }
        if file.kind == IconKind::Svg {
            return Ok(file.path.clone());
        }
        if let Some(sibling) = scan::find_icon_file(&self.input, &file.name, IconKind::Svg)? {
            return Ok(sibling);
        }
        Err(DirectoryError::MissingCompanion {
            name: file.name.clone(),
            kind: "SVG",
            path: self.tmp.join(icon_file_name(&file.name, IconKind::Svg)),
        })
    }

    fn png_source(&self, file: &IconFile) -> Result<PathBuf, DirectoryError> {
        if file.kind == IconKind::Png {
            return Ok(file.path.clone());
        }
        if let Some(sibling) = scan::find_icon_file(&self.input, &file.name, IconKind::Png)? {
            return Ok(sibling);
        }
        Err(DirectoryError::MissingCompanion {
            name: file.name.clone(),
            kind: "PNG",
            path: self.input.join(icon_file_name(&file.name, IconKind::Png)),
        })
    }
}

/// Fail if `name` was already seen, otherwise record it.
pub fn check_name(seen: &mut HashSet<String>, name: &str) -> Result<(), DirectoryError> {
    if !seen.insert(name.to_string()) {
        return Err(DirectoryError::DuplicateName(name.to_string()));
    }
    Ok(())
}

/// Remove a previous output file and make sure its directory exists.
fn prepare_output(output: &Path) -> std::io::Result<()> {
    if output.exists() {
        fs::remove_file(output)?;
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn write_fragment(out: &mut File, fragment: &str) -> std::io::Result<()> {
    out.write_all(fragment.as_bytes())?;
    out.write_all(b"\n\n")
}
