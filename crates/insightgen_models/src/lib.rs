//! Generative backend integrations for InsightGen.
//!
//! Currently a single backend: Google Gemini over its REST API, covering
//! search-grounded text generation and image generation.

#![warn(missing_docs)]

mod gemini;

pub use gemini::{
    DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient, classify_failure,
};
