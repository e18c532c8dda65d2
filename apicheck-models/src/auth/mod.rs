//! Credential management for API keys.
//!
//! API keys live in the system keyring, with an environment variable
//! fallback for CI and container runs.
//!
//! # Example
//!
//! ```ignore
//! use apicheck_models::auth::CredentialStore;
//!
//! let store = CredentialStore::new("apicheck").with_env_fallback();
//!
//! // Store a key in the system keyring
//! store.set("anthropic", "sk-ant-...")?;
//!
//! // Retrieve it (checks keyring first, then ANTHROPIC_API_KEY)
//! let key = store.get("anthropic")?;
//! ```

use std::env;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::{Error, Result};

/// A secure API key that prevents accidental logging.
///
/// The key is wrapped in `SecretString`, so `Debug` never prints it and
/// the memory is zeroized on drop.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    /// Create a new API key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(SecretString::from(key.into()))
    }

    /// Expose the secret key value.
    ///
    /// Use sparingly - only when actually sending to an API.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

/// Get the environment variable name for a provider.
pub fn env_var_for_provider(provider: &str) -> Option<&'static str> {
    match provider {
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        _ => None,
    }
}

/// Credential storage with system keyring and environment fallback.
///
/// Lookups try the keyring first, then the provider's environment variable
/// when `env_fallback` is enabled. Writes always go to the keyring.
pub struct CredentialStore {
    service_name: String,
    env_fallback: bool,
}

impl CredentialStore {
    /// Create a new credential store for the given keyring service.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            env_fallback: false,
        }
    }

    /// Enable environment variable fallback.
    pub fn with_env_fallback(mut self) -> Self {
        self.env_fallback = true;
        self
    }

    /// Get an API key for a provider.
    ///
    /// # Errors
    ///
    /// Returns `Error::CredentialsNotFound` if no credentials are found.
    pub fn get(&self, provider: &str) -> Result<ApiKey> {
        if let Some(key) = self.get_from_keyring(provider) {
            debug!(provider, "retrieved API key from keyring");
            return Ok(key);
        }

        if self.env_fallback
            && let Some(key) = self.get_from_env(provider)
        {
            debug!(provider, "retrieved API key from environment");
            return Ok(key);
        }

        Err(Error::CredentialsNotFound(provider.to_string()))
    }

    /// Store an API key for a provider in the system keyring.
    ///
    /// # Errors
    ///
    /// Returns `Error::Keyring` if the keyring operation fails.
    pub fn set(&self, provider: &str, key: &str) -> Result<()> {
        let entry = self.keyring_entry(provider)?;
        entry
            .set_password(key)
            .map_err(|e| Error::Keyring(e.to_string()))?;
        debug!(provider, "stored API key in keyring");
        Ok(())
    }

    /// Delete an API key from the system keyring.
    ///
    /// # Errors
    ///
    /// Returns `Error::CredentialsNotFound` if nothing was stored, or
    /// `Error::Keyring` if the keyring operation fails.
    pub fn delete(&self, provider: &str) -> Result<()> {
        let entry = self.keyring_entry(provider)?;
        entry.delete_credential().map_err(|e| match e {
            keyring::Error::NoEntry => Error::CredentialsNotFound(provider.to_string()),
            _ => Error::Keyring(e.to_string()),
        })?;
        debug!(provider, "deleted API key from keyring");
        Ok(())
    }

    /// Get the source of a credential (keyring or env).
    pub fn credential_source(&self, provider: &str) -> Option<CredentialSource> {
        if self.get_from_keyring(provider).is_some() {
            Some(CredentialSource::Keyring)
        } else if self.env_fallback && self.get_from_env(provider).is_some() {
            Some(CredentialSource::Environment)
        } else {
            None
        }
    }

    fn keyring_entry(&self, provider: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service_name, provider).map_err(|e| Error::Keyring(e.to_string()))
    }

    fn get_from_keyring(&self, provider: &str) -> Option<ApiKey> {
        let entry = self.keyring_entry(provider).ok()?;
        entry.get_password().ok().map(ApiKey::new)
    }

    fn get_from_env(&self, provider: &str) -> Option<ApiKey> {
        let env_var = env_var_for_provider(provider)?;
        env::var(env_var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(ApiKey::new)
    }
}

/// Source of a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Stored in system keyring.
    Keyring,
    /// From environment variable.
    Environment,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Keyring => write!(f, "system keyring"),
            CredentialSource::Environment => write!(f, "environment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-ant-secret-12345");
        let debug = format!("{:?}", key);
        assert_eq!(debug, "ApiKey([REDACTED])");
        assert!(!debug.contains("sk-ant"));
    }

    #[test]
    fn api_key_exposes_value() {
        assert_eq!(ApiKey::new("my-key").expose_secret(), "my-key");
    }

    #[test]
    fn env_var_for_known_providers() {
        assert_eq!(env_var_for_provider("anthropic"), Some("ANTHROPIC_API_KEY"));
        assert_eq!(env_var_for_provider("unknown"), None);
    }

    #[test]
    fn credential_store_with_env_fallback() {
        let store = CredentialStore::new("test");
        assert!(!store.env_fallback);
        let store = store.with_env_fallback();
        assert!(store.env_fallback);
    }

    #[test]
    #[serial]
    fn credential_store_env_fallback_works() {
        // SAFETY: env-mutating tests are serialized
        unsafe { env::set_var("ANTHROPIC_API_KEY", "test-key-from-env") };

        let store = CredentialStore::new("apicheck-test-nonexistent").with_env_fallback();
        let result = store.get("anthropic");
        let source = store.credential_source("anthropic");

        // SAFETY: env-mutating tests are serialized
        unsafe { env::remove_var("ANTHROPIC_API_KEY") };

        assert_eq!(result.unwrap().expose_secret(), "test-key-from-env");
        assert_eq!(source, Some(CredentialSource::Environment));
    }

    #[test]
    #[serial]
    fn blank_env_value_is_not_a_credential() {
        // SAFETY: env-mutating tests are serialized
        unsafe { env::set_var("ANTHROPIC_API_KEY", "   ") };

        let store = CredentialStore::new("apicheck-test-nonexistent").with_env_fallback();
        let result = store.get("anthropic");

        // SAFETY: env-mutating tests are serialized
        unsafe { env::remove_var("ANTHROPIC_API_KEY") };

        assert!(matches!(result, Err(Error::CredentialsNotFound(_))));
    }

    #[test]
    fn credential_store_without_fallback_fails() {
        let store = CredentialStore::new("apicheck-test-nonexistent");
        let result = store.get("unknown-provider");
        assert!(matches!(result, Err(Error::CredentialsNotFound(p)) if p == "unknown-provider"));
    }

    #[test]
    #[serial]
    #[ignore = "requires a platform keystore"]
    fn keyring_set_get_delete_round_trip() {
        let store = CredentialStore::new("apicheck-test-round-trip");

        store.set("anthropic", "sk-ant-round-trip").unwrap();
        let stored = store.get("anthropic");
        let source = store.credential_source("anthropic");
        let deleted = store.delete("anthropic");
        let after_delete = store.get("anthropic");

        assert_eq!(stored.unwrap().expose_secret(), "sk-ant-round-trip");
        assert_eq!(source, Some(CredentialSource::Keyring));
        assert!(deleted.is_ok());
        assert!(matches!(after_delete, Err(Error::CredentialsNotFound(_))));
        assert!(matches!(
            store.delete("anthropic"),
            Err(Error::CredentialsNotFound(_))
        ));
    }
}
