//! Pure transforms over permission description lists
//!
//! The validator never mutates its result set; filtering and sorting are
//! recomputed from scratch on every read, filter first, sort second.

use once_cell::sync::Lazy;
use regex::Regex;

/// Trailing `"prefix: Object.Field"` token at the end of a description
static PERMISSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":\s*(\S+)\.(\S+)$").expect("permission pattern is valid"));

/// Sort order for the displayed permission list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// A to Z
    #[default]
    Ascending,
    /// Z to A
    Descending,
}

/// Extract the object and field names from a permission description.
///
/// Descriptions end in `"<Context>: <Object>.<Field>"`. Extraction is
/// best-effort: a description that does not match yields a pair of empty
/// strings rather than an error.
#[must_use]
pub fn parse_permission(description: &str) -> (String, String) {
    match PERMISSION_PATTERN.captures(description) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (String::new(), String::new()),
    }
}

/// Case-insensitive substring filter, preserving input order.
///
/// The needle is trimmed first; an empty or all-whitespace needle keeps
/// every item.
#[must_use]
pub fn filter_by_text<'a>(items: &'a [String], needle: &str) -> Vec<&'a str> {
    let needle = needle.trim().to_lowercase();
    items
        .iter()
        .map(String::as_str)
        .filter(|item| needle.is_empty() || item.to_lowercase().contains(&needle))
        .collect()
}

/// Lexicographically sort permission descriptions without touching the input.
#[must_use]
pub fn sort_permissions<S: AsRef<str>>(items: &[S], direction: SortDirection) -> Vec<String> {
    let mut sorted: Vec<String> = items.iter().map(|s| s.as_ref().to_string()).collect();
    sorted.sort_by(|first, second| match direction {
        SortDirection::Ascending => first.cmp(second),
        SortDirection::Descending => second.cmp(first),
    });
    sorted
}
