//! Trait definitions for InsightGen.
//!
//! The generation pipeline and the publish state machine talk to the outside
//! world only through the traits in this crate:
//!
//! - [`GenerativeBackend`] for grounded text and image synthesis
//! - [`PublishPlatform`] for login, target listing and posting
//! - [`CredentialStore`] for the durable key-value settings

#![warn(missing_docs)]

mod backend;
mod platform;
mod store;

pub use backend::{
    Citation, GenerativeBackend, ImageRequest, ImageRequestBuilder, TextRequest,
    TextRequestBuilder, TextResponse,
};
pub use platform::{LoginToken, PublishPlatform};
pub use store::{CREDENTIAL_ID_KEY, CredentialStore, MANUAL_MODE_KEY};
