//! Classification of Gemini failures into InsightGen error kinds.

use insightgen_error::{GenerationError, GenerationErrorKind, InsightgenError, TierRequiredError};

use super::dto::ErrorEnvelope;

/// Message fragments the backend uses for entitlement problems.
const TIER_MESSAGE_SIGNATURES: &[&str] = &["Requested entity was not found", "billing"];

/// Turn a non-success HTTP reply into an error.
///
/// Entitlement and quota signatures become [`TierRequiredError`]; everything
/// else becomes a [`GenerationError`] with the backend message verbatim.
///
/// # Examples
///
/// ```
/// use insightgen_models::classify_failure;
///
/// let body = r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#;
/// assert!(classify_failure(429, body).is_tier_required());
///
/// let body = r#"{"error":{"code":500,"message":"Internal error","status":"INTERNAL"}}"#;
/// assert!(!classify_failure(500, body).is_tier_required());
/// ```
#[track_caller]
pub fn classify_failure(status_code: u16, body: &str) -> InsightgenError {
    let (message, canonical_status) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.to_string(), None),
    };
    let canonical_status = canonical_status.as_deref().unwrap_or(body);

    let tier_required = (status_code == 403 && canonical_status.contains("PERMISSION_DENIED"))
        || (status_code == 429 && canonical_status.contains("RESOURCE_EXHAUSTED"))
        || TIER_MESSAGE_SIGNATURES
            .iter()
            .any(|signature| message.contains(signature));

    if tier_required {
        TierRequiredError::new(message).into()
    } else {
        GenerationError::new(GenerationErrorKind::HttpError {
            status_code,
            message,
        })
        .into()
    }
}
