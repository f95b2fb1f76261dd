//! Citation deduplication.

use std::collections::HashSet;

use insightgen_core::GroundingSource;
use insightgen_interface::Citation;

/// One source per distinct URI, in first-seen order.
///
/// Citations missing a title or a URI are dropped before deduplication.
///
/// # Examples
///
/// ```
/// use insightgen_generation::dedupe_sources;
/// use insightgen_interface::Citation;
///
/// let sources = dedupe_sources(&[
///     Citation::new("A", "https://a.example"),
///     Citation::new("A again", "https://a.example"),
///     Citation::new("B", "https://b.example"),
/// ]);
/// assert_eq!(sources.len(), 2);
/// assert_eq!(sources[0].title(), "A");
/// ```
pub fn dedupe_sources(candidates: &[Citation]) -> Vec<GroundingSource> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());

    candidates
        .iter()
        .filter_map(|c| match (c.title.as_deref(), c.uri.as_deref()) {
            (Some(title), Some(uri)) if !title.is_empty() && !uri.is_empty() => Some((title, uri)),
            _ => None,
        })
        .filter(|(_, uri)| seen.insert(*uri))
        .map(|(title, uri)| GroundingSource::new(title, uri))
        .collect()
}
