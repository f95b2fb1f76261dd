//! Post generation pipeline for InsightGen.
//!
//! A [`GenerationOrchestrator`] turns a [`GenerationRequest`] into a
//! [`GeneratedPost`]:
//!
//! 1. [`build_prompt`] renders the platform strategy, research protocol,
//!    angle, option fragments and output contract
//! 2. the backend's grounded text call and image call run concurrently
//! 3. [`extract`] recovers the four structured fields, degrading instead of
//!    failing when the model breaks its JSON
//! 4. [`dedupe_sources`] keeps one citation per URI
//! 5. [`append_hashtags`] applies the hashtag policy
//!
//! [`GenerationRequest`]: insightgen_core::GenerationRequest
//! [`GeneratedPost`]: insightgen_core::GeneratedPost

#![warn(missing_docs)]

mod extraction;
mod hashtags;
mod image;
mod orchestrator;
mod prompt;
mod rewrite;
mod settings;
mod sources;

pub use extraction::{ExtractedContent, PARSE_ERROR_SUMMARY, extract};
pub use hashtags::{append_hashtags, normalize_hashtag};
pub use image::{ImageOptions, image_prompt};
pub use orchestrator::GenerationOrchestrator;
pub use prompt::{SYSTEM_INSTRUCTION, angle_instruction, build_prompt, platform_strategy};
pub use rewrite::{RewriteMode, audience_instruction, rewrite_prompt};
pub use settings::{GenerationSettings, GenerationSettingsBuilder};
pub use sources::dedupe_sources;
