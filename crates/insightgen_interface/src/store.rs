//! Durable key-value settings store.

use insightgen_error::StoreError;

/// Key holding the publish application id.
pub const CREDENTIAL_ID_KEY: &str = "credential-id";

/// Key holding the manual-mode flag as `"true"` or `"false"`.
pub const MANUAL_MODE_KEY: &str = "manual-mode";

/// Durable string key-value store, read at session start and written only on
/// explicit user action.
pub trait CredentialStore: Send + Sync {
    /// Read `key`.
    ///
    /// # Errors
    ///
    /// Fails when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `key`.
    ///
    /// # Errors
    ///
    /// Fails when the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Fails when the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
