//! Core data types for the InsightGen content generation library.
//!
//! This crate provides the foundation types shared by the generation
//! pipeline and the publishing layer: platforms and their length profiles,
//! requests, generated posts, images and publishing identities.

#![warn(missing_docs)]

mod media;
mod observability;
mod platform;
mod post;
mod publish;
mod request;

pub use media::{AspectRatio, ImageData, ImageStyle};
pub use observability::{LogFormat, init_tracing};
pub use platform::{CharReport, Platform, PlatformSpec};
pub use post::{GeneratedPost, GeneratedPostBuilder, GroundingSource};
pub use publish::{
    PublishCredentialConfig, PublishIdentity, PublishMode, PublishReceipt, PublishTarget,
};
pub use request::{
    Audience, GenerationRequest, GenerationRequestBuilder, OptionFlags, PRESET_TOPICS, Tone,
    Topic,
};
