// crates/admdiv-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Łódź` -> `Lodz`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use admdiv_core::text::fold_key;
///
/// assert_eq!(fold_key("Łódź"), "lodz");
/// assert_eq!(fold_key("Baden-Württemberg"), "baden-wurttemberg");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Accent-insensitive and case-insensitive substring match.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_key(haystack).contains(&fold_key(needle))
}

/// Turns a display name into a file stem.
///
/// Keeps alphanumeric characters and whitespace (Unicode aware) and drops
/// trailing whitespace. Returns `None` when nothing usable remains.
pub fn file_stem_for(name: &str) -> Option<String> {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let trimmed = kept.trim_end();
    if trimmed.trim_start().is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses an optional text field into an `f64`.
///
/// Trims whitespace; returns `None` for missing, empty or unparsable input.
pub fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    s.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
