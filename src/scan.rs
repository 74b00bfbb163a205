//! Input directory listing.
//!
//! The input directory is flat: only its top level is read. Entries are kept
//! when they are regular files with an `.svg` or `.png` extension; anything
//! else (subdirectories, symlinks, `.DS_Store`, sources in other formats) is
//! ignored.
//!
//! ```text
//! icons/
//! ├── home.svg           # icon "home"
//! ├── home.png           # same logical name as home.svg
//! ├── settings.png       # icon "settings"
//! ├── README.md          # ignored
//! └── originals/         # ignored, not recursed
//! ```
//!
//! Files are returned sorted by file name so the generated stylesheet does
//! not depend on the platform's directory order.

use crate::naming::{IconKind, icon_file_name, parse_icon_name};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A supported file found in the input directory.
#[derive(Debug, Clone, PartialEq)]
pub struct IconFile {
    pub path: PathBuf,
    pub kind: IconKind,
    /// Logical name (file stem).
    pub name: String,
}

impl IconFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// List the supported icon files directly inside `dir`.
pub fn list_icon_files(dir: &Path) -> std::io::Result<Vec<IconFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // file_type() does not follow symlinks
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if let Some(parsed) = parse_icon_name(&path) {
            files.push(IconFile {
                path,
                kind: parsed.kind,
                name: parsed.name,
            });
        }
    }
    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

/// Find the `kind` file of the icon called `name` directly inside `dir`.
///
/// The lowercase file name (`home.svg`) is tried first; otherwise any file
/// whose extension matches case-insensitively (`home.SVG`) is accepted, so
/// the returned path always names the file as it exists on disk. A missing
/// `dir` finds nothing.
pub fn find_icon_file(
    dir: &Path,
    name: &str,
    kind: IconKind,
) -> std::io::Result<Option<PathBuf>> {
    let exact = dir.join(icon_file_name(name, kind));
    if exact.is_file() {
        return Ok(Some(exact));
    }
    if !dir.is_dir() {
        return Ok(None);
    }
    let found = list_icon_files(dir)?
        .into_iter()
        .find(|f| f.kind == kind && f.name == name)
        .map(|f| f.path);
    Ok(found)
}

/// Logical names shared by more than one file, with the files sharing them.
pub fn duplicate_names(files: &[IconFile]) -> BTreeMap<String, Vec<PathBuf>> {
    let mut by_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        by_name
            .entry(file.name.clone())
            .or_default()
            .push(file.path.clone());
    }
    by_name.retain(|_, paths| paths.len() > 1);
    by_name
}
