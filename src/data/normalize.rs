//! Column-name normalization shared by every loader.

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of spaces, slashes and hyphens collapse to a single underscore.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ /-]+").expect("separator pattern is a valid regex"));

/// Normalize one header: trim, lower-case, collapse separators to `_`.
///
/// ```
/// use mhdash::data::normalize::normalize_column;
///
/// assert_eq!(normalize_column("  Prevalence Rate "), "prevalence_rate");
/// assert_eq!(normalize_column("Nb of users / 100000"), "nb_of_users_100000");
/// ```
pub fn normalize_column(name: &str) -> String {
    // A UTF-8 byte order mark sticks to the first header of files exported from spreadsheets
    let trimmed = name.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    SEPARATORS
        .replace_all(&trimmed.to_lowercase(), "_")
        .into_owned()
}

/// Normalize a whole header row, keeping column order.
pub fn normalize_headers<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    headers.into_iter().map(normalize_column).collect()
}

/// True when `name` is already in normalized form.
pub fn is_normalized(name: &str) -> bool {
    name == name.trim()
        && !name.chars().any(|c| c.is_uppercase() || matches!(c, ' ' | '/' | '-'))
}
