pub mod auth;
pub mod check;
pub mod config;
pub mod demo;
pub mod validate;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use apicheck_core::{AssessorConfig, ResponseQualityChecker};
use apicheck_models::auth::CredentialStore;
use serde_json::Value;

use crate::config::CheckerConfig;

/// Keyring service name for stored credentials.
pub const KEYRING_SERVICE: &str = "apicheck";

/// Provider whose key the checker needs.
pub const PROVIDER: &str = "anthropic";

pub fn credential_store() -> CredentialStore {
    CredentialStore::new(KEYRING_SERVICE).with_env_fallback()
}

/// Read and parse a JSON document from disk.
pub fn read_json(path: &Path) -> Result<Value> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Build an Anthropic-backed checker. Fails up front when no key is configured.
pub fn build_checker(
    config: &CheckerConfig,
    assessment: AssessorConfig,
) -> Result<ResponseQualityChecker> {
    ResponseQualityChecker::from_credentials_with_endpoint(
        &credential_store(),
        assessment,
        &config.provider.base_url,
        Duration::from_secs(config.provider.timeout_seconds),
    )
    .context("set ANTHROPIC_API_KEY or run `apicheck auth set` to configure a key")
}
