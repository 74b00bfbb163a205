//! Custom selector expansion.
//!
//! `customselectors` maps an icon name to extra selectors that should share
//! the icon's class rule. The `"*"` key holds patterns applied to every icon:
//! the icon name replaces every `$1` in the pattern, or the first `NAME`
//! when the pattern has no `$1`.
//!
//! ```toml
//! [css.customselectors]
//! "*" = [".icon-$1:hover"]
//! star = [".rating .filled"]
//! ```
//!
//! For `star` this yields `[".rating .filled", ".icon-star:hover"]`.

use std::collections::BTreeMap;

pub type CustomSelectorMap = BTreeMap<String, Vec<String>>;

/// Key whose patterns apply to every icon.
pub const WILDCARD: &str = "*";

/// Capture-group placeholder; every occurrence is substituted.
const GROUP_PLACEHOLDER: &str = "$1";

/// Literal placeholder; only its first occurrence is substituted.
const NAME_PLACEHOLDER: &str = "NAME";

/// Substitute `name` into a wildcard pattern.
pub fn apply_pattern(pattern: &str, name: &str) -> String {
    if pattern.contains(GROUP_PLACEHOLDER) {
        pattern.replace(GROUP_PLACEHOLDER, name)
    } else {
        pattern.replacen(NAME_PLACEHOLDER, name, 1)
    }
}

/// Compute the selectors for one icon: its own entries in order, followed by
/// the expanded wildcard patterns that are not already present.
///
/// The map itself is never modified.
pub fn expand_selectors(map: &CustomSelectorMap, name: &str) -> Vec<String> {
    let mut selectors = map.get(name).cloned().unwrap_or_default();
    if let Some(patterns) = map.get(WILDCARD) {
        for pattern in patterns {
            let selector = apply_pattern(pattern, name);
            if !selectors.contains(&selector) {
                selectors.push(selector);
            }
        }
    }
    selectors
}
