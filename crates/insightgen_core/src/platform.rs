//! Target platforms and their length constraints.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::AspectRatio;

/// Social platforms a post can be tailored for.
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
pub enum Platform {
    /// LinkedIn
    #[default]
    #[serde(rename = "LinkedIn")]
    #[strum(serialize = "LinkedIn")]
    LinkedIn,
    /// X, formerly Twitter
    #[serde(rename = "X (Twitter)")]
    #[strum(serialize = "X (Twitter)")]
    X,
    /// Instagram
    #[serde(rename = "Instagram")]
    #[strum(serialize = "Instagram")]
    Instagram,
    /// Facebook, the only platform with direct publishing
    #[serde(rename = "Facebook")]
    #[strum(serialize = "Facebook")]
    Facebook,
    /// Medium or any other long-form blog
    #[serde(rename = "Medium")]
    #[strum(serialize = "Medium")]
    Medium,
}

/// Static length profile for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize)]
pub struct PlatformSpec {
    /// Hard character maximum
    max_chars: usize,
    /// Target range believed to maximize engagement, inclusive
    sweet_spot: (usize, usize),
    /// Where the feed truncates the post behind "see more"
    cutoff: Option<usize>,
    /// Display label
    label: &'static str,
}

const LINKEDIN: PlatformSpec = PlatformSpec {
    max_chars: 3000,
    sweet_spot: (1000, 1500),
    cutoff: Some(140),
    label: "Professional Deep Dive",
};

const X: PlatformSpec = PlatformSpec {
    max_chars: 280,
    sweet_spot: (240, 259),
    cutoff: None,
    label: "Concise & Real-Time",
};

const FACEBOOK: PlatformSpec = PlatformSpec {
    max_chars: 63206,
    sweet_spot: (40, 80),
    cutoff: Some(400),
    label: "Relatable Storytelling",
};

const INSTAGRAM: PlatformSpec = PlatformSpec {
    max_chars: 2200,
    sweet_spot: (125, 150),
    cutoff: Some(125),
    label: "Visual Hook",
};

const MEDIUM: PlatformSpec = PlatformSpec {
    max_chars: 100_000,
    sweet_spot: (3000, 6000),
    cutoff: None,
    label: "Long-form Blog",
};

impl Platform {
    /// Length profile for this platform.
    pub fn spec(self) -> &'static PlatformSpec {
        match self {
            Platform::LinkedIn => &LINKEDIN,
            Platform::X => &X,
            Platform::Instagram => &INSTAGRAM,
            Platform::Facebook => &FACEBOOK,
            Platform::Medium => &MEDIUM,
        }
    }

    /// Label shown in platform pickers.
    pub const fn display_name(self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::X => "X (Twitter)",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Medium => "Medium / Blog",
        }
    }

    /// Long-form platforms manage tags out-of-band and never get a hashtag line.
    pub const fn is_long_form(self) -> bool {
        matches!(self, Platform::Medium)
    }

    /// Aspect ratio used for generated images unless overridden.
    pub const fn default_aspect_ratio(self) -> AspectRatio {
        match self {
            Platform::Instagram => AspectRatio::Square,
            Platform::Facebook => AspectRatio::Landscape,
            Platform::X | Platform::Medium | Platform::LinkedIn => AspectRatio::Widescreen,
        }
    }

    /// Where manual publishing sends the user after copying the text.
    pub const fn compose_url(self) -> &'static str {
        match self {
            Platform::LinkedIn => "https://www.linkedin.com/feed/?shareActive=true",
            Platform::X => "https://twitter.com/intent/tweet",
            Platform::Instagram => "https://www.instagram.com/",
            Platform::Facebook => "https://www.facebook.com/",
            Platform::Medium => "https://medium.com/new-story",
        }
    }
}

impl PlatformSpec {
    /// True when `text` fits under the hard maximum.
    pub fn within_limit(&self, text: &str) -> bool {
        text.chars().count() <= self.max_chars
    }

    /// True when `text` lands inside the sweet spot.
    pub fn in_sweet_spot(&self, text: &str) -> bool {
        let count = text.chars().count();
        count >= self.sweet_spot.0 && count <= self.sweet_spot.1
    }

    /// The part of `text` visible before the feed truncates it.
    pub fn preview<'a>(&self, text: &'a str) -> &'a str {
        match self.cutoff {
            Some(cutoff) => match text.char_indices().nth(cutoff) {
                Some((idx, _)) => &text[..idx],
                None => text,
            },
            None => text,
        }
    }
}

/// Character count of a post measured against its platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize)]
pub struct CharReport {
    /// Characters in the post
    count: usize,
    /// Platform hard maximum
    max_chars: usize,
    /// Platform sweet spot
    sweet_spot: (usize, usize),
    /// Count is within the hard maximum
    within_limit: bool,
    /// Count is within the sweet spot
    in_sweet_spot: bool,
}

impl CharReport {
    /// Measure `text` against `platform`.
    pub fn measure(text: &str, platform: Platform) -> Self {
        let spec = platform.spec();
        Self {
            count: text.chars().count(),
            max_chars: spec.max_chars,
            sweet_spot: spec.sweet_spot,
            within_limit: spec.within_limit(text),
            in_sweet_spot: spec.in_sweet_spot(text),
        }
    }
}
