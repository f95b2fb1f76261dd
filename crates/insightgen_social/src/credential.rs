//! Publish credential rules.

use insightgen_core::Platform;
use insightgen_error::{CredentialError, CredentialErrorKind};

/// Permissions requested at login: list managed pages, post to them, read
/// their engagement.
pub const PUBLISH_SCOPES: &[&str] = &[
    "pages_show_list",
    "pages_manage_posts",
    "pages_read_engagement",
];

/// Where manual mode sends the user after copying the post text.
pub const MANUAL_SHARE_URL: &str = Platform::Facebook.compose_url();

/// Trim `raw` and check that it is a numeric App ID.
///
/// Profile ids taken from a URL, e-mail addresses and page names are common
/// mistakes; all of them are rejected.
///
/// # Errors
///
/// Returns [`CredentialErrorKind::Missing`] for a blank value and
/// [`CredentialErrorKind::InvalidFormat`] for anything that is not all ASCII
/// digits.
///
/// # Examples
///
/// ```
/// use insightgen_social::validate_credential;
///
/// assert_eq!(validate_credential(" 123456789 \n").unwrap(), "123456789");
/// assert!(validate_credential("me@example.com").is_err());
/// ```
pub fn validate_credential(raw: &str) -> Result<String, CredentialError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CredentialError::new(CredentialErrorKind::Missing));
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(CredentialError::new(CredentialErrorKind::InvalidFormat(
            trimmed.to_string(),
        )));
    }
    Ok(trimmed.to_string())
}
