//! Filesystem-safe names from free-text titles.

/// Maximum title length in characters, before the extension is appended.
pub const MAX_TITLE_CHARS: usize = 255;

/// Characters never allowed in a title-derived filename.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '\n', '\r', '\t'];

/// Sanitizes a free-text title for use as a filename stem.
///
/// - Replaces `< > : " / \ | ? *`, newline, carriage return and tab with `_`
/// - Trims surrounding whitespace
/// - Limits length to 255 characters
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    replaced.trim().chars().take(MAX_TITLE_CHARS).collect()
}

/// `sanitize_title` plus `extension`, or `None` when nothing usable remains.
pub fn title_to_filename(title: &str, extension: &str) -> Option<String> {
    let stem = sanitize_title(title);
    if stem.is_empty() {
        None
    } else {
        Some(format!("{stem}{extension}"))
    }
}
