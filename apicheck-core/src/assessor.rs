//! Model-backed semantic assessment.

use std::sync::Arc;

use apicheck_models::providers::{ChatRequest, Message, ModelProvider};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::parser::AssessmentParser;
use crate::prompt::PromptBuilder;
use crate::types::QualityAssessment;

/// Model used for assessments unless configured otherwise.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Output budget for a single assessment reply.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Settings for the backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessorConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl Default for AssessorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Runs one assessment round-trip: prompt, backend call, parse.
///
/// `assess` always returns an assessment. A failed backend call becomes
/// [`QualityAssessment::backend_failure`]; there is no retry.
pub struct QualityAssessor {
    provider: Arc<dyn ModelProvider>,
    config: AssessorConfig,
    prompts: PromptBuilder,
    parser: AssessmentParser,
}

impl QualityAssessor {
    pub fn new(provider: Arc<dyn ModelProvider>, config: AssessorConfig) -> Self {
        Self {
            provider,
            config,
            prompts: PromptBuilder,
            parser: AssessmentParser,
        }
    }

    pub fn config(&self) -> &AssessorConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn assess(&self, response: &Value, schema: &Value) -> QualityAssessment {
        let prompt = self.prompts.build(response, schema);
        debug!(
            provider = self.provider.name(),
            model = %self.config.model,
            prompt_len = prompt.len(),
            "requesting quality assessment"
        );

        let request = ChatRequest::new(&self.config.model, vec![Message::user(prompt)])
            .max_tokens(self.config.max_tokens);

        match self.provider.chat(request).await {
            Ok(reply) => self.parser.parse(&reply.text()),
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "quality assessment call failed");
                QualityAssessment::backend_failure(e)
            }
        }
    }
}
