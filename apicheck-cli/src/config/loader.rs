use super::types::{
    CheckerConfig, DEFAULT_TIMEOUT_SECONDS, ProviderConfig, RawAssessmentConfig, RawCheckerConfig,
    RawProviderConfig,
};
use anyhow::{Context, Result};
use apicheck_core::{AssessorConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use apicheck_models::providers::DEFAULT_BASE_URL;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<CheckerConfig> {
        Self::load_from(
            Self::user_config_path().as_deref(),
            &Self::project_config_path(),
        )
    }

    /// Load from explicit layer paths; missing files are skipped
    pub fn load_from(user_path: Option<&Path>, project_path: &Path) -> Result<CheckerConfig> {
        let mut raw = RawCheckerConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user_path
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_layer(user_path)?);
        }

        // Layer 2: Project config
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_layer(project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "apicheck").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with APICHECK_PROJECT_CONFIG_DIR env var (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("APICHECK_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".apicheck/config.toml")
        }
    }

    fn read_layer(path: &Path) -> Result<RawCheckerConfig> {
        debug!(path = %path.display(), "loading config layer");
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawCheckerConfig, overlay: RawCheckerConfig) -> RawCheckerConfig {
        RawCheckerConfig {
            assessment: RawAssessmentConfig {
                model: overlay.assessment.model.or(base.assessment.model),
                max_tokens: overlay.assessment.max_tokens.or(base.assessment.max_tokens),
            },
            provider: RawProviderConfig {
                base_url: overlay.provider.base_url.or(base.provider.base_url),
                timeout_seconds: overlay
                    .provider
                    .timeout_seconds
                    .or(base.provider.timeout_seconds),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawCheckerConfig) -> CheckerConfig {
        CheckerConfig {
            assessment: AssessorConfig {
                model: raw
                    .assessment
                    .model
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens: raw.assessment.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            },
            provider: ProviderConfig {
                base_url: raw
                    .provider
                    .base_url
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout_seconds: raw
                    .provider
                    .timeout_seconds
                    .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            },
        }
    }
}
