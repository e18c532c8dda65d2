use apicheck_core::AssessorConfig;
use apicheck_models::providers::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawCheckerConfig {
    #[serde(default)]
    pub assessment: RawAssessmentConfig,

    #[serde(default)]
    pub provider: RawProviderConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawAssessmentConfig {
    /// Model used for the quality assessment
    pub model: Option<String>,

    /// Output token budget for one assessment
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawProviderConfig {
    /// Anthropic API base URL
    pub base_url: Option<String>,

    /// Client-side request timeout
    pub timeout_seconds: Option<u64>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CheckerConfig {
    #[serde(default)]
    pub assessment: AssessorConfig,

    #[serde(default)]
    pub provider: ProviderConfig,
}

impl CheckerConfig {
    /// Assessment settings with command-line overrides applied.
    pub fn assessment_with(&self, model: Option<String>, max_tokens: Option<u32>) -> AssessorConfig {
        AssessorConfig {
            model: model.unwrap_or_else(|| self.assessment.model.clone()),
            max_tokens: max_tokens.unwrap_or(self.assessment.max_tokens),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Default client-side timeout for one assessment call
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
