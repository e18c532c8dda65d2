//! The two-phase check: structure first, then (only if valid) quality.

use std::sync::Arc;
use std::time::Duration;

use apicheck_models::auth::CredentialStore;
use apicheck_models::providers::{AnthropicProvider, ModelProvider};
use serde_json::Value;
use tracing::{debug, info};

use crate::assessor::{AssessorConfig, QualityAssessor};
use crate::error::CheckError;
use crate::types::{QualityAssessment, QualityReport, ValidationResult};
use crate::validation::StructureValidator;

/// Share of the overall score contributed by structure validation.
pub const STRUCTURE_WEIGHT: f64 = 0.3;

/// Share of the overall score contributed by the quality assessment.
pub const QUALITY_WEIGHT: f64 = 0.7;

/// Weighted blend of structure (100 or 0) and quality score.
///
/// Computed in f64 and truncated toward zero, so results agree exactly
/// with reports produced by earlier tooling using the same arithmetic.
pub fn overall_score(validation: &ValidationResult, quality: &QualityAssessment) -> u8 {
    let structure = if validation.is_valid { 100.0 } else { 0.0 };
    let blended = structure * STRUCTURE_WEIGHT + f64::from(quality.score) * QUALITY_WEIGHT;
    blended.clamp(0.0, 100.0) as u8
}

/// Validates API responses and assesses their quality.
///
/// Holds no per-request state; one checker can serve concurrent callers.
pub struct ResponseQualityChecker {
    validator: StructureValidator,
    assessor: QualityAssessor,
}

impl ResponseQualityChecker {
    /// Build a checker around any provider with the default model settings.
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::with_config(provider, AssessorConfig::default())
    }

    pub fn with_config(provider: Arc<dyn ModelProvider>, config: AssessorConfig) -> Self {
        Self {
            validator: StructureValidator,
            assessor: QualityAssessor::new(provider, config),
        }
    }

    /// Build a checker backed by Anthropic, using stored credentials.
    ///
    /// # Errors
    ///
    /// Fails when no API key can be found. A checker is never built without
    /// one.
    pub fn from_credentials(
        store: &CredentialStore,
        config: AssessorConfig,
    ) -> Result<Self, CheckError> {
        let provider = AnthropicProvider::from_store(store)?;
        Ok(Self::with_config(Arc::new(provider), config))
    }

    /// Like [`from_credentials`](Self::from_credentials), against a custom
    /// endpoint with a client-side timeout.
    pub fn from_credentials_with_endpoint(
        store: &CredentialStore,
        config: AssessorConfig,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, CheckError> {
        let provider = AnthropicProvider::from_store(store)?
            .with_base_url(base_url)
            .with_timeout(timeout)?;
        Ok(Self::with_config(Arc::new(provider), config))
    }

    pub fn assessor_config(&self) -> &AssessorConfig {
        self.assessor.config()
    }

    /// Phase one only: validate `response` against `schema`.
    pub fn validate_structure(&self, response: &Value, schema: &Value) -> ValidationResult {
        self.validator.validate(response, schema)
    }

    /// Phase two only: ask the backend for a semantic assessment.
    pub async fn assess_quality(&self, response: &Value, schema: &Value) -> QualityAssessment {
        self.assessor.assess(response, schema).await
    }

    /// Full check. Always yields a report.
    ///
    /// The backend is only called when the response is structurally valid.
    pub async fn check_response(&self, response: &Value, schema: &Value) -> QualityReport {
        let validation = self.validate_structure(response, schema);

        let quality = if validation.is_valid {
            self.assess_quality(response, schema).await
        } else {
            debug!("skipping quality assessment for structurally invalid response");
            QualityAssessment::structure_failed()
        };

        let report = QualityReport::new(validation, quality);
        info!(
            valid = report.validation.is_valid,
            quality_score = report.quality.score,
            overall_score = report.overall_score,
            "response check complete"
        );
        report
    }

    /// Consistency across several responses from one endpoint.
    ///
    /// Permanently unavailable: always returns
    /// [`CheckError::NotImplemented`] and never calls the backend.
    pub async fn check_consistency(
        &self,
        _responses: &[Value],
        _schema: &Value,
    ) -> Result<QualityAssessment, CheckError> {
        Err(CheckError::NotImplemented("batch consistency checking"))
    }
}
