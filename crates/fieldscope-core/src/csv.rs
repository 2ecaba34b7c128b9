//! CSV payload assembly for result export
//!
//! Matches the download the original widget produced: one header line joined
//! by commas, then one line per row with every cell double-quoted. Embedded
//! quotes, commas, and newlines are NOT escaped; descriptions come from the
//! controller and never contain them today. Kept as-is rather than silently
//! switching to RFC 4180 output (see DESIGN.md).

/// Placeholder used when no profile label is available for the filename
const FALLBACK_LABEL: &str = "Profile";

/// Build a CSV text payload from a header set and pre-extracted rows.
#[must_use]
pub fn build_csv(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut csv = headers.join(",");
    csv.push('\n');

    let body = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{cell}\""))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n");
    csv.push_str(&body);
    csv
}

/// Derive a download filename from the profile label.
///
/// Every character outside `[A-Za-z0-9_-]` becomes `_`; an absent or empty
/// label falls back to `"Profile"`.
#[must_use]
pub fn derive_filename(profile_label: Option<&str>, suffix: &str) -> String {
    let label = profile_label
        .filter(|label| !label.is_empty())
        .unwrap_or(FALLBACK_LABEL);
    let sanitized: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}_{suffix}")
}
