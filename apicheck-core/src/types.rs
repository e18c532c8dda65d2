//! Report data model.
//!
//! All records are plain values, built fresh for every check and never
//! mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome of schema validation.
///
/// `is_valid` holds exactly when `errors` is empty. Warnings never affect
/// validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no errors or warnings.
    pub fn passed() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// A failing result carrying a single error message.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }
}

/// How serious a quality issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Lowercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// A single problem found during the semantic assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub description: String,
    /// Response field the issue refers to, if any.
    #[serde(default)]
    pub field: Option<String>,
}

impl QualityIssue {
    pub fn new(severity: Severity, description: impl Into<String>) -> Self {
        Self {
            severity,
            description: description.into(),
            field: None,
        }
    }

    pub fn critical(description: impl Into<String>) -> Self {
        Self::new(Severity::Critical, description)
    }

    pub fn warning(description: impl Into<String>) -> Self {
        Self::new(Severity::Warning, description)
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::new(Severity::Info, description)
    }

    /// Attach the field this issue refers to.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Semantic assessment of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Quality score, 0 to 100.
    pub score: u8,
    pub issues: Vec<QualityIssue>,
    pub explanation: String,
    pub recommendations: Vec<String>,
}

impl QualityAssessment {
    /// The assessment used when the backend call itself failed.
    ///
    /// Score 0 means "no assessment happened".
    pub fn backend_failure(detail: impl fmt::Display) -> Self {
        Self {
            score: 0,
            issues: vec![QualityIssue::critical(format!(
                "Assessment failed: {detail}"
            ))],
            explanation: "Unable to complete quality assessment".to_string(),
            recommendations: vec!["Verify API connectivity and try again".to_string()],
        }
    }

    /// The assessment used when the backend replied but the reply could not
    /// be read.
    ///
    /// Score 50 means "indeterminate", distinct from a backend failure.
    pub fn unparseable(detail: impl fmt::Display) -> Self {
        Self {
            score: 50,
            issues: vec![QualityIssue::warning(format!(
                "Could not parse assessment: {detail}"
            ))],
            explanation: "Assessment completed but response format was unexpected".to_string(),
            recommendations: vec!["Review raw assessment output".to_string()],
        }
    }

    /// The placeholder used when structure validation already failed and the
    /// backend was never consulted.
    pub fn structure_failed() -> Self {
        Self {
            score: 0,
            issues: vec![QualityIssue::critical("Structure validation failed")],
            explanation: "Response does not meet basic structure requirements".to_string(),
            recommendations: vec![
                "Fix schema validation errors before quality assessment".to_string(),
            ],
        }
    }

    /// Number of issues at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }

    pub fn has_critical(&self) -> bool {
        self.count(Severity::Critical) > 0
    }

    pub fn grade(&self) -> QualityGrade {
        QualityGrade::from_score(self.score)
    }
}

/// Coarse reading of a quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityGrade {
    Poor,
    Acceptable,
    Good,
    Excellent,
}

impl QualityGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => QualityGrade::Excellent,
            75..=89 => QualityGrade::Good,
            60..=74 => QualityGrade::Acceptable,
            _ => QualityGrade::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityGrade::Excellent => "EXCELLENT",
            QualityGrade::Good => "GOOD",
            QualityGrade::Acceptable => "ACCEPTABLE",
            QualityGrade::Poor => "POOR",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QualityGrade::Excellent => "Production-ready",
            QualityGrade::Good => "Minor issues to address",
            QualityGrade::Acceptable => "Several issues to fix",
            QualityGrade::Poor => "Significant problems detected",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.description())
    }
}

/// Combined result of a full check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    pub validation: ValidationResult,
    pub quality: QualityAssessment,
    /// Weighted blend of structure and quality, see [`crate::overall_score`].
    pub overall_score: u8,
}

impl QualityReport {
    /// Compose a report, deriving `overall_score` from the two parts.
    pub fn new(validation: ValidationResult, quality: QualityAssessment) -> Self {
        let overall_score = crate::checker::overall_score(&validation, &quality);
        Self {
            validation,
            quality,
            overall_score,
        }
    }
}
