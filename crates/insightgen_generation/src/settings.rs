//! Generation settings.

use derive_getters::Getters;
use insightgen_error::ConfigError;
use serde::{Deserialize, Serialize};

/// Allowed range for the grounded text call's sampling temperature.
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.7..=0.85;

fn default_temperature() -> f32 {
    0.85
}

fn default_rewrite_temperature() -> f32 {
    0.7
}

fn default_thinking_budget() -> u32 {
    8192
}

fn default_true() -> bool {
    true
}

/// Knobs for the generation pipeline.
///
/// Deserializes from the `[generation]` section of the configuration file;
/// every field has a default.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct GenerationSettings {
    /// Sampling temperature of the grounded text call
    #[serde(default = "default_temperature")]
    temperature: f32,
    /// Sampling temperature of rewrites
    #[serde(default = "default_rewrite_temperature")]
    rewrite_temperature: f32,
    /// Reasoning budget hint in tokens; `0` sends no hint
    #[serde(default = "default_thinking_budget")]
    thinking_budget: u32,
    /// Remove `*` from extracted fields and forbid it in the prompt
    #[serde(default = "default_true")]
    strip_emphasis: bool,
    /// Enable search grounding for the text call
    #[serde(default = "default_true")]
    search_enabled: bool,
    /// Text model override
    #[serde(default)]
    text_model: Option<String>,
    /// Rewrite model override
    #[serde(default)]
    rewrite_model: Option<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            rewrite_temperature: default_rewrite_temperature(),
            thinking_budget: default_thinking_budget(),
            strip_emphasis: true,
            search_enabled: true,
            text_model: None,
            rewrite_model: None,
        }
    }
}

impl GenerationSettings {
    /// Start building settings from the defaults.
    pub fn builder() -> GenerationSettingsBuilder {
        GenerationSettingsBuilder::default()
    }

    /// Reject a text temperature outside 0.7 to 0.85.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(ConfigError::new(format!(
                "generation.temperature must be between {} and {}, got {}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end(),
                self.temperature
            )));
        }
        if !(0.0..=2.0).contains(&self.rewrite_temperature) {
            return Err(ConfigError::new(format!(
                "generation.rewrite_temperature must be between 0 and 2, got {}",
                self.rewrite_temperature
            )));
        }
        Ok(())
    }

    /// The reasoning hint to send, if any.
    pub fn reasoning_budget(&self) -> Option<u32> {
        (self.thinking_budget > 0).then_some(self.thinking_budget)
    }
}
