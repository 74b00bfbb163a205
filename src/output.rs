//! CLI output formatting.
//!
//! Output is **icon-centric**: each line names an icon by its logical name
//! and size, with the file it came from as an indented `Source:` line.
//!
//! # Output Format
//!
//! ## Encode
//!
//! ```text
//! Icons
//! 001 home (20×20)
//!     Source: home.png
//! 002 settings (24×24)
//!     Source: settings.png
//!
//! Wrote 2 mixin branches, 2 classes → dist/icons.scss
//! ```
//!
//! ## Check
//!
//! ```text
//! Icons
//! 001 home
//!     Source: home.png
//!
//! Duplicate names
//! home
//!     Source: home.png
//!     Source: home.svg
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::encoding::Dimensions;
use crate::scan::{self, IconFile};
use crate::types::EncodeReport;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// `001 home (20×20)`
fn icon_header(index: usize, name: &str, dims: Option<Dimensions>) -> String {
    match dims {
        Some(d) => format!("{} {} ({}×{})", format_index(index), name, d.width, d.height),
        None => format!("{} {}", format_index(index), name),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Encode
// ============================================================================

pub fn format_encode_output(report: &EncodeReport, output: &Path) -> Vec<String> {
    let mut lines = vec!["Icons".to_string()];
    for (i, icon) in report.icons.iter().enumerate() {
        lines.push(icon_header(i + 1, &icon.name, Some(icon.dimensions)));
        lines.push(format!("{}Source: {}", indent(1), file_name(&icon.source)));
    }

    if !report.skipped_duplicates.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Skipped duplicate mixin branches: {}",
            report.skipped_duplicates.join(", ")
        ));
    }

    lines.push(String::new());
    let mut summary = format!(
        "Wrote {}",
        plural(report.mixin_branches, "mixin branch", "mixin branches")
    );
    if report.classes > 0 {
        summary.push_str(&format!(", {}", plural(report.classes, "class", "classes")));
    }
    summary.push_str(&format!(" → {}", output.display()));
    lines.push(summary);
    lines
}

pub fn print_encode_output(report: &EncodeReport, output: &Path) {
    for line in format_encode_output(report, output) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(files: &[IconFile]) -> Vec<String> {
    let mut lines = vec!["Icons".to_string()];
    let mut names: Vec<&str> = Vec::new();
    for file in files {
        if !names.contains(&file.name.as_str()) {
            names.push(&file.name);
            lines.push(icon_header(names.len(), &file.name, None));
        }
        lines.push(format!("{}Source: {}", indent(1), file.file_name()));
    }

    let duplicates = scan::duplicate_names(files);
    if !duplicates.is_empty() {
        lines.push(String::new());
        lines.push("Duplicate names".to_string());
        for (name, paths) in &duplicates {
            lines.push(name.clone());
            for path in paths {
                lines.push(format!("{}Source: {}", indent(1), file_name(path)));
            }
        }
    }
    lines
}

pub fn print_check_output(files: &[IconFile]) {
    for line in format_check_output(files) {
        println!("{}", line);
    }
}
