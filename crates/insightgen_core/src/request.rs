//! Generation request types.

use derive_getters::Getters;
use derive_setters::Setters;
use insightgen_error::ValidationError;
use serde::{Deserialize, Serialize};

use crate::Platform;

/// Topics offered in the topic picker, `Custom` excluded.
pub const PRESET_TOPICS: [&str; 6] = [
    "GenAI & Multimodal",
    "AI Engineering & Ops",
    "Agentic AI (Autonomous)",
    "RAG & Vector DBs",
    "LLM Architectures",
    "Emerging/Experimental",
];

/// What the post is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// A preset or free-text topic used as-is
    Named(String),
    /// Use the request's `custom_topic` text
    Custom,
}

impl Topic {
    /// Convenience constructor for a named topic.
    pub fn named(name: impl Into<String>) -> Self {
        Topic::Named(name.into())
    }
}

impl Default for Topic {
    fn default() -> Self {
        Topic::Named(PRESET_TOPICS[2].to_string())
    }
}

/// Voice of the generated post.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Tone {
    /// Deep dive, technical accuracy, "how-to"
    #[default]
    Educational,
    /// Future trends, big picture impact
    Visionary,
    /// Clean, business-focused, ROI-centric
    Professional,
    /// Challenging hype, hot takes
    Controversial,
    /// Excited about shipping code and products
    Enthusiastic,
    /// Cutting through marketing fluff
    Skeptical,
    /// Structured, educational patterns and productive workflows
    Architectural,
}

impl Tone {
    /// Persona label shown in the tone picker.
    pub const fn label(self) -> &'static str {
        match self {
            Tone::Educational => "Practitioner",
            Tone::Visionary => "Visionary",
            Tone::Professional => "Executive",
            Tone::Controversial => "Contrarian",
            Tone::Enthusiastic => "Builder",
            Tone::Skeptical => "Realist",
            Tone::Architectural => "System Design",
        }
    }

    /// One-line description shown under the label.
    pub const fn description(self) -> &'static str {
        match self {
            Tone::Educational => "Deep dive, technical accuracy, \"how-to\".",
            Tone::Visionary => "Future trends, big picture impact.",
            Tone::Professional => "Clean, business-focused, ROI-centric.",
            Tone::Controversial => "Challenging hype, \"hot takes\".",
            Tone::Enthusiastic => "Excited about shipping code/products.",
            Tone::Skeptical => "Cutting through marketing fluff.",
            Tone::Architectural => "Structured, educational patterns & productive workflows.",
        }
    }
}

/// Audience for a post-hoc rewrite.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Audience {
    /// Developers; precise engineering terminology
    Technical,
    /// Non-technical readers; analogies over mechanics
    General,
    /// Decision makers; ROI and strategy
    Executive,
    /// Architects; patterns and workflows
    #[strum(serialize = "System Design")]
    #[serde(rename = "System Design")]
    SystemDesign,
}

/// Optional content toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct OptionFlags {
    /// Use a few emojis (suppressed explicitly when off)
    pub emoji: bool,
    /// Append hashtags (suppressed explicitly when off)
    pub hashtags: bool,
    /// Include a direct call to action
    pub cta: bool,
    /// Before/after comparison structure
    pub comparison_format: bool,
    /// TL;DR section at the bottom
    pub tldr: bool,
    /// 6-12 month prediction section
    pub future_outlook: bool,
    /// Devil's advocate section
    pub counterpoint: bool,
    /// Three-step implementation plan
    pub implementation_steps: bool,
    /// Prompt chain example
    pub prompt_chain: bool,
}

impl Default for OptionFlags {
    fn default() -> Self {
        Self {
            emoji: true,
            hashtags: true,
            cta: false,
            comparison_format: false,
            tldr: false,
            future_outlook: false,
            counterpoint: false,
            implementation_steps: false,
            prompt_chain: false,
        }
    }
}

/// Everything needed to generate one post.
///
/// # Examples
///
/// ```
/// use insightgen_core::{GenerationRequest, Platform, Tone, Topic};
///
/// let request = GenerationRequest::builder()
///     .platform(Platform::X)
///     .topic(Topic::named("RAG & Vector DBs"))
///     .tone(Tone::Skeptical)
///     .build()
///     .expect("valid request");
///
/// assert_eq!(request.effective_topic(), "RAG & Vector DBs");
/// assert!(request.validate().is_ok());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerationRequest {
    /// Target platform
    #[builder(default)]
    platform: Platform,
    /// Topic selection
    #[builder(default)]
    topic: Topic,
    /// Free text used when `topic` is `Custom`
    #[builder(default)]
    #[serde(default)]
    custom_topic: Option<String>,
    /// Voice
    #[builder(default)]
    tone: Tone,
    /// Optional content toggles
    #[builder(default)]
    #[serde(default)]
    options: OptionFlags,
}

impl GenerationRequest {
    /// Start building a request.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// The topic text the prompt should use.
    ///
    /// For `Custom` this is the custom text, which may be empty if the request
    /// was never validated.
    pub fn effective_topic(&self) -> &str {
        match &self.topic {
            Topic::Named(name) => name,
            Topic::Custom => self.custom_topic.as_deref().unwrap_or(""),
        }
    }

    /// Reject a `Custom` topic whose custom text is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topic == Topic::Custom
            && self
                .custom_topic
                .as_deref()
                .is_none_or(|text| text.trim().is_empty())
        {
            return Err(ValidationError::new(
                "A custom topic was selected but no custom topic text was provided",
            ));
        }
        Ok(())
    }
}
