//! Attribute helpers for regex-matched tags.

use once_cell::sync::Lazy;
use regex::Regex;

static ATTRIBUTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("ATTRIBUTE_RE: hardcoded regex is valid")
});

/// Find an attribute value in the attribute text of a tag (everything between
/// the tag name and the closing `>`). Names compare case-insensitively.
pub fn tag_attribute(attrs: &str, name: &str) -> Option<String> {
    ATTRIBUTE_RE
        .captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2).or(caps.get(3)).or(caps.get(4)))
        .map(|value| value.as_str().to_string())
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}
