//! Style-fragment formatting.
//!
//! Every icon produces two fragments:
//!
//! - a **mixin body**: one `@if $icon == "<name>"` branch of the `grunticon`
//!   mixin, selecting the icon's images at the use site;
//! - a **class fragment**: a `<prefix><name>:before` rule (plus any custom
//!   selectors) for markup that uses classes instead of the mixin.
//!
//! Both carry the three fallback tiers:
//!
//! | Tier | Selected by | Image |
//! |---|---|---|
//! | SVG | default | SVG data URI |
//! | No SVG | `.no-svg &` | PNG data URI |
//! | Legacy | `.no-js &`, `.ie6 &`, `.ie7 &` | public PNG path |
//!
//! Formatting is a strategy ([`StyleFormatter`]): [`BuiltinFormatter`] writes
//! the fragments directly, [`TemplateFormatter`] renders the class fragment
//! from a handlebars template. Formatters are pure string construction.

use crate::types::{DataUris, Icon};
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),
    #[error("Template render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Preamble of the generated mixin.
pub const MIXIN_START: &str =
    "@mixin grunticon($icon, $position: top left, $dimensions: false) {\n\n";

/// Closing line of the generated mixin.
pub const MIXIN_END: &str = "}\n";

/// What a formatter needs to know about one icon.
#[derive(Debug, Clone, Copy)]
pub struct StyleContext<'a> {
    pub prefix: &'a str,
    pub icon: &'a Icon,
    /// Custom selectors, already expanded for this icon.
    pub selectors: &'a [String],
}

/// The two fragments of one icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconStyles {
    pub mixin_body: String,
    pub class: String,
}

/// Strategy turning an icon into its style fragments.
pub trait StyleFormatter {
    fn format(&self, ctx: &StyleContext<'_>) -> Result<IconStyles, FormatError>;
}

/// The default formatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinFormatter;

impl StyleFormatter for BuiltinFormatter {
    fn format(&self, ctx: &StyleContext<'_>) -> Result<IconStyles, FormatError> {
        Ok(IconStyles {
            mixin_body: mixin_body(ctx.icon),
            class: class_rule(ctx.prefix, ctx.icon, ctx.selectors),
        })
    }
}

/// `.a,\n.b,\n`: each selector followed by a comma and newline.
fn selector_list(selectors: &[String]) -> String {
    selectors.iter().map(|s| format!("{s},\n")).collect()
}

/// The class rule of an icon.
pub fn class_rule(prefix: &str, icon: &Icon, selectors: &[String]) -> String {
    let DataUris { svg, png, png_path } = &icon.datauri;
    format!(
        "{selectors}{prefix}{name}:before{{\n\
         \tcontent:'';\n\
         \tbackground-image: url('{svg}');\n\
         \tbackground-repeat: no-repeat;\n\
         \theight:{height}px;\n\
         \twidth:{width}px;\n\
         \n\
         \t.no-svg &{{\n\
         \t\tbackground-image: url('{png}');\n\
         \t}}\n\
         \n\
         \t.no-js &,\n\
         \t.ie6 &,\n\
         \t.ie7 &{{\n\
         \t\tbackground-image: url('{png_path}');\n\
         \t}}\n\
         }}",
        selectors = selector_list(selectors),
        name = icon.name,
        height = icon.dimensions.height,
        width = icon.dimensions.width,
    )
}

/// The `@if` branch of an icon inside the mixin.
pub fn mixin_body(icon: &Icon) -> String {
    let DataUris { svg, png, png_path } = &icon.datauri;
    format!(
        "\t@if $icon == \"{name}\" {{\n\
         \n\
         \t\tbackground-image: url('{svg}');\n\
         \t\tbackground-position: $position;\n\
         \n\
         \t\t.no-svg &{{\n\
         \t\t\tbackground-image: url('{png}');\n\
         \t\t}}\n\
         \n\
         \t\t.no-js &,\n\
         \t\t.ie6 &,\n\
         \t\t.ie7 &{{\n\
         \t\t\tbackground-image: url('{png_path}');\n\
         \t\t}}\n\
         \n\
         \t\t@if $dimensions{{\n\
         \n\
         \t\t\theight:{height}px;\n\
         \t\t\twidth:{width}px;\n\
         \n\
         \t\t}}\n\
         \n\
         \t}}",
        name = icon.name,
        height = icon.dimensions.height,
        width = icon.dimensions.width,
    )
}

/// Data handed to class templates.
#[derive(Debug, Serialize)]
struct TemplateData<'a> {
    prefix: &'a str,
    name: &'a str,
    datauri: &'a DataUris,
    // Rendered as text so whole sizes print as `20`, not `20.0`
    width: String,
    height: String,
    customselectors: &'a [String],
}

const TEMPLATE_NAME: &str = "icon";

/// Renders the class fragment from a handlebars template; the mixin body is
/// always the built-in one.
///
/// Output is not HTML-escaped.
pub struct TemplateFormatter {
    registry: Handlebars<'static>,
}

impl TemplateFormatter {
    pub fn from_source(source: &str) -> Result<Self, FormatError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(Box::new)?;
        Ok(Self { registry })
    }

    pub fn from_file(path: &Path) -> Result<Self, FormatError> {
        let source = fs::read_to_string(path)?;
        Self::from_source(&source)
    }
}

impl StyleFormatter for TemplateFormatter {
    fn format(&self, ctx: &StyleContext<'_>) -> Result<IconStyles, FormatError> {
        let data = TemplateData {
            prefix: ctx.prefix,
            name: &ctx.icon.name,
            datauri: &ctx.icon.datauri,
            width: ctx.icon.dimensions.width.to_string(),
            height: ctx.icon.dimensions.height.to_string(),
            customselectors: ctx.selectors,
        };
        Ok(IconStyles {
            mixin_body: mixin_body(ctx.icon),
            class: self.registry.render(TEMPLATE_NAME, &data)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Dimensions;
    use std::path::PathBuf;

    fn icon(name: &str, width: f64, height: f64) -> Icon {
        Icon {
            name: name.to_string(),
            source: PathBuf::from(format!("icons/{name}.svg")),
            dimensions: Dimensions { width, height },
            datauri: DataUris {
                svg: format!("data:svg-{name}"),
                png: format!("data:png-{name}"),
                png_path: format!("/img/{name}.png"),
            },
        }
    }

    #[test]
    fn class_rule_without_selectors() {
        let rule = class_rule(".i--", &icon("home", 20.0, 20.0), &[]);
        let expected = ".i--home:before{\n\
            \tcontent:'';\n\
            \tbackground-image: url('data:svg-home');\n\
            \tbackground-repeat: no-repeat;\n\
            \theight:20px;\n\
            \twidth:20px;\n\
            \n\
            \t.no-svg &{\n\
            \t\tbackground-image: url('data:png-home');\n\
            \t}\n\
            \n\
            \t.no-js &,\n\
            \t.ie6 &,\n\
            \t.ie7 &{\n\
            \t\tbackground-image: url('/img/home.png');\n\
            \t}\n\
            }";
        assert_eq!(rule, expected);
    }

    #[test]
    fn class_rule_lists_custom_selectors_first() {
        let selectors = vec![".nav .home".to_string(), ".icon-home:hover".to_string()];
        let rule = class_rule(".i--", &icon("home", 20.0, 20.0), &selectors);
        assert!(rule.starts_with(".nav .home,\n.icon-home:hover,\n.i--home:before{\n"));
    }

    #[test]
    fn class_rule_uses_prefix_and_dimensions() {
        let rule = class_rule(".icon-", &icon("star", 16.0, 12.5), &[]);
        assert!(rule.starts_with(".icon-star:before{"));
        assert!(rule.contains("\theight:12.5px;\n\twidth:16px;\n"));
    }

    #[test]
    fn mixin_body_layout() {
        let body = mixin_body(&icon("home", 20.0, 24.0));
        let expected = "\t@if $icon == \"home\" {\n\
            \n\
            \t\tbackground-image: url('data:svg-home');\n\
            \t\tbackground-position: $position;\n\
            \n\
            \t\t.no-svg &{\n\
            \t\t\tbackground-image: url('data:png-home');\n\
            \t\t}\n\
            \n\
            \t\t.no-js &,\n\
            \t\t.ie6 &,\n\
            \t\t.ie7 &{\n\
            \t\t\tbackground-image: url('/img/home.png');\n\
            \t\t}\n\
            \n\
            \t\t@if $dimensions{\n\
            \n\
            \t\t\theight:24px;\n\
            \t\t\twidth:20px;\n\
            \n\
            \t\t}\n\
            \n\
            \t}";
        assert_eq!(body, expected);
    }

    #[test]
    fn builtin_formatter_produces_both_fragments() {
        let icon = icon("settings", 32.0, 32.0);
        let selectors = vec![".gear".to_string()];
        let styles = BuiltinFormatter
            .format(&StyleContext {
                prefix: ".i--",
                icon: &icon,
                selectors: &selectors,
            })
            .unwrap();
        assert_eq!(styles.mixin_body, mixin_body(&icon));
        assert_eq!(styles.class, class_rule(".i--", &icon, &selectors));
    }

    #[test]
    fn template_formatter_renders_class() {
        let formatter = TemplateFormatter::from_source(
            "{{#each customselectors}}{{this}}, {{/each}}{{prefix}}{{name}} { width: {{width}}px; background: url('{{datauri.datasvg}}'); fallback: url('{{datauri.png}}'); }",
        )
        .unwrap();
        let icon = icon("home", 20.0, 20.0);
        let selectors = vec![".a".to_string()];
        let styles = formatter
            .format(&StyleContext {
                prefix: ".i--",
                icon: &icon,
                selectors: &selectors,
            })
            .unwrap();
        assert_eq!(
            styles.class,
            ".a, .i--home { width: 20px; background: url('data:svg-home'); fallback: url('/img/home.png'); }"
        );
        assert_eq!(styles.mixin_body, mixin_body(&icon));
    }

    #[test]
    fn template_output_is_not_html_escaped() {
        let formatter = TemplateFormatter::from_source("{{prefix}}{{name}} > span").unwrap();
        let mut icon = icon("a&b", 1.0, 1.0);
        icon.datauri.svg = "data:image/svg+xml,%3Csvg%3E".into();
        let styles = formatter
            .format(&StyleContext {
                prefix: ".i--",
                icon: &icon,
                selectors: &[],
            })
            .unwrap();
        assert_eq!(styles.class, ".i--a&b > span");
    }

    #[test]
    fn invalid_template_is_error() {
        let result = TemplateFormatter::from_source("{{#each customselectors}}");
        assert!(matches!(result, Err(FormatError::Template(_))));
    }

    #[test]
    fn missing_template_file_is_io_error() {
        let result = TemplateFormatter::from_file(Path::new("/nonexistent/icon.hbs"));
        assert!(matches!(result, Err(FormatError::Io(_))));
    }
}
