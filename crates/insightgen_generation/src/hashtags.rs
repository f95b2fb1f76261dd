//! Hashtag append policy.

use insightgen_core::Platform;

const MARKER: char = '#';

/// Prefix `tag` with exactly one `#`.
///
/// ```
/// use insightgen_generation::normalize_hashtag;
///
/// assert_eq!(normalize_hashtag("rust"), "#rust");
/// assert_eq!(normalize_hashtag("#rust"), "#rust");
/// assert_eq!(normalize_hashtag("##rust"), "#rust");
/// ```
pub fn normalize_hashtag(tag: &str) -> String {
    format!("{}{}", MARKER, tag.trim().trim_start_matches(MARKER))
}

/// Append `hashtags` to `content` as a trailing line after a blank line.
///
/// Nothing is appended when `enabled` is false, when there are no non-empty
/// tags, or when `platform` is long-form. Duplicate tags appear once.
pub fn append_hashtags(
    content: &str,
    hashtags: &[String],
    enabled: bool,
    platform: Platform,
) -> String {
    if !enabled || platform.is_long_form() {
        return content.to_string();
    }

    let mut tags: Vec<String> = Vec::with_capacity(hashtags.len());
    for tag in hashtags.iter().map(|t| normalize_hashtag(t)) {
        if tag.len() > MARKER.len_utf8() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    if tags.is_empty() {
        return content.to_string();
    }
    format!("{}\n\n{}", content, tags.join(" "))
}
