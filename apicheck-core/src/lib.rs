//! Two-phase quality checks for API responses.
//!
//! A check first validates a response against its JSON Schema, then, if the
//! structure holds, asks a model provider for a semantic review (missing
//! business fields, inappropriate values, fields that contradict each
//! other). Both phases are folded into one [`QualityReport`].
//!
//! # Architecture
//!
//! ```text
//! ResponseQualityChecker::check_response
//!     │
//!     ├─ StructureValidator ──── invalid ──► QualityAssessment::structure_failed()
//!     │        │ valid
//!     │        ▼
//!     ├─ QualityAssessor
//!     │     ├─ PromptBuilder
//!     │     ├─ dyn ModelProvider ── error ──► QualityAssessment::backend_failure()
//!     │     └─ AssessmentParser ─── bad reply ──► QualityAssessment::unparseable()
//!     │
//!     └─ overall_score = 30% structure + 70% quality
//! ```
//!
//! Every per-request failure is absorbed into the report. Only building a
//! checker without credentials fails, and [`ResponseQualityChecker::check_consistency`]
//! always returns [`CheckError::NotImplemented`].

mod assessor;
mod checker;
mod error;
mod format;
mod parser;
mod prompt;
mod types;
mod validation;

pub use assessor::{AssessorConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, QualityAssessor};
pub use checker::{QUALITY_WEIGHT, ResponseQualityChecker, STRUCTURE_WEIGHT, overall_score};
pub use error::CheckError;
pub use format::summarize;
pub use parser::{AssessmentParser, ParseError};
pub use prompt::{ASSESSMENT_CONTRACT_VERSION, PromptBuilder};
pub use types::{
    QualityAssessment, QualityGrade, QualityIssue, QualityReport, Severity, ValidationResult,
};
pub use validation::StructureValidator;

pub use apicheck_models as models;
