//! Research-grounded social media post generation and publishing.
//!
//! InsightGen turns a topic, a tone and a target platform into a ready-to-post
//! draft: the text is written from live web research, citations are kept,
//! hashtags follow the platform's conventions and an illustration is
//! generated alongside. Finished posts can be published to a Facebook page
//! directly or handed back for manual sharing.
//!
//! This crate re-exports the workspace and adds layered configuration:
//!
//! ```no_run
//! use insightgen::{GenerationRequest, InsightgenConfig, Platform, Topic, init_tracing};
//!
//! # async fn run() -> insightgen::InsightgenResult<()> {
//! let config = InsightgenConfig::load()?;
//! init_tracing(*config.log_format());
//!
//! let orchestrator = config.orchestrator()?;
//! let request = GenerationRequest::builder()
//!     .platform(Platform::LinkedIn)
//!     .topic(Topic::named("RAG & Vector DBs"))
//!     .build()
//!     .map_err(|e| insightgen::ValidationError::new(e.to_string()))?;
//! let post = orchestrator.generate(&request).await?;
//! println!("{}", post.content());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod settings;
mod wiring;

pub use settings::{
    ConfigLoader, DEFAULT_CONFIG_FILE, ENV_PREFIX, FacebookSection, GeminiSection,
    InsightgenConfig,
};
pub use wiring::{FacebookSessionManager, GeminiOrchestrator};

pub use insightgen_core::{
    AspectRatio, Audience, CharReport, GeneratedPost, GenerationRequest, GroundingSource,
    ImageData, ImageStyle, LogFormat, OptionFlags, PRESET_TOPICS, Platform, PlatformSpec,
    PublishCredentialConfig, PublishIdentity, PublishMode, PublishReceipt, PublishTarget, Tone,
    Topic, init_tracing,
};
pub use insightgen_error::{
    ConfigError, CredentialError, CredentialErrorKind, GenerationError, GenerationErrorKind,
    InsightgenError, InsightgenErrorKind, InsightgenResult, LoginCancelledError, PublishError,
    PublishErrorKind, StoreError, StoreErrorKind, TierRequiredError, ValidationError,
};
pub use insightgen_generation::{
    GenerationOrchestrator, GenerationSettings, ImageOptions, RewriteMode, extract,
};
pub use insightgen_interface::{CredentialStore, GenerativeBackend, PublishPlatform};
pub use insightgen_models::GeminiClient;
pub use insightgen_social::{
    FileCredentialStore, GraphApiClient, GraphApiSettings, InMemoryCredentialStore,
    PublishAction, PublishDispatcher, PublishSessionManager, SessionState,
};
