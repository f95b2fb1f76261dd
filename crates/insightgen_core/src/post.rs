//! The generated post artifact.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::{CharReport, Platform};

/// A web reference returned alongside grounded text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, Serialize, Deserialize)]
pub struct GroundingSource {
    /// Page title
    title: String,
    /// Canonical locator; unique within a post
    uri: String,
}

impl GroundingSource {
    /// Create a source.
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// A finished post: text, research trail, citations and optional image.
///
/// Created once per successful generation. Only the image and the content
/// may be replaced afterwards (image regeneration and rewrites).
#[derive(
    Debug, Clone, PartialEq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GeneratedPost {
    /// What the backend reports it found while researching
    research_summary: String,
    /// Angle the post takes
    content_angle: String,
    /// Final post text, hashtags appended per policy
    content: String,
    /// Hashtags as produced by the backend
    #[builder(default)]
    hashtags: Vec<String>,
    /// Deduplicated citations
    #[builder(default)]
    sources: Vec<GroundingSource>,
    /// Data URI or remote URL of the illustration
    #[builder(default)]
    #[serde(default)]
    image_url: Option<String>,
    /// When the post was generated
    #[builder(default = "Utc::now()")]
    timestamp: DateTime<Utc>,
}

impl GeneratedPost {
    /// Start building a post.
    pub fn builder() -> GeneratedPostBuilder {
        GeneratedPostBuilder::default()
    }

    /// Replace the illustration (image regeneration).
    pub fn set_image_url(&mut self, image_url: Option<String>) {
        self.image_url = image_url;
    }

    /// Replace the text (post-hoc rewrite).
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Character count of the content against `platform`.
    pub fn char_report(&self, platform: Platform) -> CharReport {
        CharReport::measure(&self.content, platform)
    }

    /// Citations as `title: uri` lines, for copying.
    pub fn sources_as_text(&self) -> String {
        self.sources
            .iter()
            .map(|s| format!("{}: {}", s.title, s.uri))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
