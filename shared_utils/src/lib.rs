/// Page name used when the location path ends in a slash.
pub const DEFAULT_PAGE: &str = "index.html";

/// Normalizes a user-facing string for comparison: trims whitespace and
/// lower-cases it. `None` normalizes to the empty string.
#[must_use]
pub fn normalize(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_lowercase()
}

/// Returns the last segment of a URL path, lower-cased, falling back to
/// `default_page` when the path is empty or ends with `/`.
#[must_use]
pub fn last_path_segment(pathname: &str, default_page: &str) -> String {
    let segment = pathname.rsplit('/').next().unwrap_or_default();
    if segment.is_empty() {
        default_page.to_lowercase()
    } else {
        segment.to_lowercase()
    }
}

/// Escapes the characters that are significant inside HTML text and
/// attribute values.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
