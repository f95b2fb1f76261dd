//! Google Gemini REST backend.

mod client;
mod dto;
mod error;

pub use client::{DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, GeminiClient};
pub use error::classify_failure;
