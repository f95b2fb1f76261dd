//! Recovery of structured fields from loosely structured model output.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

/// Research summary used when the model's JSON cannot be parsed.
pub const PARSE_ERROR_SUMMARY: &str = "Analysis complete (JSON parse error).";

const DEFAULT_ANGLE: &str = "General";

static FENCED_JSON: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```json\n([\s\S]*?)\n```").ok());

/// The four fields the prompt asks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    /// What the model reports it found
    pub research_summary: String,
    /// Angle the post takes
    pub content_angle: String,
    /// Post body, without hashtags
    pub post_content: String,
    /// Hashtags as returned
    pub hashtags: Vec<String>,
    /// True when the degraded path produced this value
    pub degraded: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireContent {
    #[serde(default)]
    research_summary: Option<String>,
    #[serde(default)]
    content_angle: Option<String>,
    post_content: String,
    #[serde(default)]
    hashtags: Vec<String>,
}

fn candidate(raw: &str) -> &str {
    if let Some(inner) = FENCED_JSON
        .as_ref()
        .and_then(|re| re.captures(raw))
        .and_then(|captures| captures.get(1))
    {
        return inner.as_str();
    }

    match (raw.find('{'), raw.rfind('}')) {
        (Some(open), Some(close)) if close > open => &raw[open..=close],
        _ => raw,
    }
}

fn degraded(raw: &str) -> ExtractedContent {
    ExtractedContent {
        research_summary: PARSE_ERROR_SUMMARY.to_string(),
        content_angle: DEFAULT_ANGLE.to_string(),
        post_content: raw.replace("```json", "").replace("```", ""),
        hashtags: Vec::new(),
        degraded: true,
    }
}

fn strip_emphasis(content: &mut ExtractedContent) {
    let strip = |s: &mut String| s.retain(|c| c != '*');
    strip(&mut content.research_summary);
    strip(&mut content.content_angle);
    strip(&mut content.post_content);
    content.hashtags.iter_mut().for_each(strip);
}

/// Extract the structured fields from `raw`. Never fails.
///
/// Tries a ```` ```json ```` fence, then the span from the first `{` to the
/// last `}`. If neither parses, the whole text becomes the post body with
/// fence markers removed. With `strip_emphasis`, `*` is removed from every
/// field on both paths.
///
/// # Examples
///
/// ```
/// use insightgen_generation::{PARSE_ERROR_SUMMARY, extract};
///
/// let ok = extract(r#"Sure! {"postContent": "Ship it", "hashtags": ["rust"]}"#, true);
/// assert_eq!(ok.post_content, "Ship it");
/// assert_eq!(ok.hashtags, vec!["rust".to_string()]);
///
/// let prose = extract("Just prose, no JSON here.", true);
/// assert_eq!(prose.research_summary, PARSE_ERROR_SUMMARY);
/// assert_eq!(prose.post_content, "Just prose, no JSON here.");
/// ```
pub fn extract(raw: &str, strip_emphasis_markers: bool) -> ExtractedContent {
    let source = if raw.trim().is_empty() { "{}" } else { raw };
    let json = candidate(source);

    let mut content = match serde_json::from_str::<WireContent>(json) {
        Ok(wire) => {
            debug!(hashtags = wire.hashtags.len(), "Parsed structured response");
            ExtractedContent {
                research_summary: wire.research_summary.unwrap_or_default(),
                content_angle: wire
                    .content_angle
                    .unwrap_or_else(|| DEFAULT_ANGLE.to_string()),
                post_content: wire.post_content,
                hashtags: wire.hashtags,
                degraded: false,
            }
        }
        Err(e) => {
            warn!(error = %e, raw_len = raw.len(), "Structured parse failed; using raw text");
            degraded(raw)
        }
    };

    if strip_emphasis_markers {
        strip_emphasis(&mut content);
    }
    content
}
