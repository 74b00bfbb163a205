//! Encoder configuration.
//!
//! Handles loading, validating, and merging `iconsass.toml`. Stock defaults
//! are overridden by the config file, which is in turn overridden by CLI
//! flags. Every layer is sparse: it only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input = "icons"             # Directory of .svg/.png icons (not recursed)
//! output = "icons.scss"       # Generated stylesheet, rewritten on each run
//! # temp_dir = "tmp"          # Where companion SVGs of PNG icons live (default: input)
//! generate_classes = false    # Also emit one `<prefix><name>:before` rule per icon
//!
//! [css]
//! prefix = ".i--"             # Class prefix for generated rules
//! pngfolder = ""              # Public folder of the PNG fallbacks
//! # pngpath = "/img/icons"    # Public URL prefix of the PNG fallbacks (default: pngfolder)
//! # template = "icon.hbs"     # Handlebars template for class rules
//! mixin_duplicates = "skip"   # skip | allow | error
//!
//! [css.customselectors]
//! # "*" = [".icon-$1:hover"]  # Applied to every icon, `$1` (or NAME) = icon name
//! # home = [".nav .home"]
//!
//! [png]
//! noencode = false            # Reference PNGs by path instead of inlining them
//! max_datauri_length = 32768  # Longer PNG data URIs fall back to the path
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::selectors::CustomSelectorMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `iconsass.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    /// Directory of icons to encode.
    pub input: PathBuf,
    /// Stylesheet to write.
    pub output: PathBuf,
    /// Directory holding the companion SVG of each PNG icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
    /// Emit per-icon classes after the mixin.
    pub generate_classes: bool,
    /// Selector and path options for the generated styles.
    pub css: EncodingOptions,
    /// PNG inlining options.
    pub png: PngOptions,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("icons"),
            output: PathBuf::from("icons.scss"),
            temp_dir: None,
            generate_classes: false,
            css: EncodingOptions::default(),
            png: PngOptions::default(),
        }
    }
}

impl EncoderConfig {
    /// Temp directory for companion SVGs, defaulting to the input directory.
    pub fn effective_temp_dir(&self) -> &Path {
        self.temp_dir.as_deref().unwrap_or(&self.input)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.css.prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "css.prefix must not be empty".into(),
            ));
        }
        if self.png.max_datauri_length == 0 {
            return Err(ConfigError::Validation(
                "png.max_datauri_length must be non-zero".into(),
            ));
        }
        for (key, selectors) in &self.css.customselectors {
            if selectors.iter().any(|s| s.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "css.customselectors.\"{key}\" contains an empty selector"
                )));
            }
        }
        Ok(())
    }
}

/// How the mixin pass treats a second icon with an already-emitted name.
///
/// The class pass always rejects duplicates; the mixin pass follows this
/// policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep the first branch, ignore later icons with the same name.
    #[default]
    Skip,
    /// Emit a branch for every file, even when names repeat.
    Allow,
    /// Fail the run.
    Error,
}

/// Options that shape the generated styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingOptions {
    /// Class prefix, e.g. `.i--` → `.i--home:before`.
    pub prefix: String,
    /// Public folder of the PNG fallback assets.
    pub pngfolder: String,
    /// Public URL prefix of the PNG fallbacks. Defaults to `pngfolder`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pngpath: Option<String>,
    /// Extra selectors per icon name, `"*"` for all icons.
    pub customselectors: CustomSelectorMap,
    /// Handlebars template rendering the class rule of each icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Mixin-pass handling of repeated names.
    pub mixin_duplicates: DuplicatePolicy,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            prefix: ".i--".to_string(),
            pngfolder: String::new(),
            pngpath: None,
            customselectors: CustomSelectorMap::new(),
            template: None,
            mixin_duplicates: DuplicatePolicy::default(),
        }
    }
}

impl EncodingOptions {
    /// Public PNG prefix: `pngpath` if set and non-empty, else `pngfolder`.
    pub fn png_path(&self) -> &str {
        self.pngpath
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.pngfolder)
    }

    /// Public URL of the PNG fallback for `file_name`.
    ///
    /// - `""` + `home.png` → `/home.png`
    /// - `"img/"` + `home.png` → `img/home.png`
    /// - `"/img"` + `home.png` → `/img/home.png`
    pub fn public_png_url(&self, file_name: &str) -> String {
        let base = self.png_path();
        if base.is_empty() {
            format!("/{file_name}")
        } else if base.ends_with('/') {
            format!("{base}{file_name}")
        } else {
            format!("{base}/{file_name}")
        }
    }
}

/// PNG inlining options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PngOptions {
    /// Never inline PNGs; the `.no-svg` tier references the public path.
    pub noencode: bool,
    /// Data URIs longer than this fall back to the public path.
    /// 32768 is the data-URI limit of IE8, the oldest browser on that tier.
    pub max_datauri_length: usize,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            noencode: false,
            max_datauri_length: 32768,
        }
    }
}

impl PngOptions {
    /// Whether a PNG data URI of this length may be inlined.
    pub fn allows_inline(&self, datauri: &str) -> bool {
        !self.noencode && datauri.len() <= self.max_datauri_length
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer that the config file and CLI flags merge onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(EncoderConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<EncoderConfig, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: EncoderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, with `overrides` (typically CLI flags) on top.
///
/// A missing file means stock defaults.
pub fn load_config(
    path: &Path,
    overrides: Option<toml::Value>,
) -> Result<EncoderConfig, ConfigError> {
    let file = load_raw_config(path)?;
    resolve_config(stock_defaults_value(), file.into_iter().chain(overrides))
}

/// Returns a fully-commented stock `iconsass.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# iconsass configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
# Command-line flags override the values in this file.

# Directory of .svg/.png icons. Only the top level is read.
input = "icons"

# Stylesheet to generate. It is deleted and rewritten on every run.
output = "icons.scss"

# Directory holding the companion SVG of every PNG icon (name.png -> name.svg).
# Defaults to the input directory.
# temp_dir = "tmp"

# Emit a `<prefix><name>:before` rule per icon after the mixin.
generate_classes = false

# ---------------------------------------------------------------------------
# Generated styles
# ---------------------------------------------------------------------------
[css]
# Prefix of the generated class selectors.
prefix = ".i--"

# Public folder of the PNG fallbacks (used when pngpath is not set).
pngfolder = ""

# Public URL prefix of the PNG fallbacks used by .no-js/.ie6/.ie7 browsers.
# pngpath = "/img/icons"

# Handlebars template for the class rule of each icon. Variables: prefix,
# name, width, height, customselectors, datauri.datasvg, datauri.datapng,
# datauri.png.
# template = "icon.hbs"

# What the mixin does when two files share a name (e.g. home.svg + home.png):
#   "skip"  - keep the first, ignore the rest
#   "allow" - emit one @if branch per file
#   "error" - abort
# Class generation always rejects duplicate names.
mixin_duplicates = "skip"

# Extra selectors sharing an icon's class rule. The "*" entry applies to every
# icon; `$1` (or NAME) is replaced by the icon name.
[css.customselectors]
# "*" = [".icon-$1:hover"]
# home = [".nav .home"]

# ---------------------------------------------------------------------------
# PNG fallbacks
# ---------------------------------------------------------------------------
[png]
# Reference PNGs by public path instead of inlining them as data URIs.
noencode = false

# PNG data URIs longer than this are replaced by the public path.
max_datauri_length = 32768
"##
}
