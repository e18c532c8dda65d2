//! Reading the backend's reply back into a [`QualityAssessment`].
//!
//! The reply is untrusted text. Parsing trims it, removes a surrounding
//! markdown fence if present, decodes the JSON object described by
//! [`crate::PromptBuilder`], then normalizes the values. Any failure yields
//! [`QualityAssessment::unparseable`].

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::prompt::ASSESSMENT_CONTRACT_VERSION;
use crate::types::{QualityAssessment, QualityIssue, Severity};

/// Why a reply could not be turned into an assessment.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Not JSON, not an object, or a required key is missing or mistyped.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The score is a number serde_json cannot represent as f64.
    #[error("score is not a representable number: {0}")]
    Score(String),
}

/// Reply shape, version [`ASSESSMENT_CONTRACT_VERSION`].
#[derive(Debug, Deserialize)]
struct RawAssessment {
    score: serde_json::Number,
    explanation: String,
    #[serde(default)]
    issues: Option<Vec<RawIssue>>,
    #[serde(default)]
    recommendations: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    severity: String,
    description: String,
    #[serde(default)]
    field: Option<String>,
}

impl RawIssue {
    fn into_issue(self) -> QualityIssue {
        let (severity, description) = match self.severity.parse::<Severity>() {
            Ok(severity) => (severity, self.description),
            Err(_) => {
                debug!(severity = %self.severity, "coercing unrecognized severity to info");
                (
                    Severity::Info,
                    format!(
                        "{} (reported severity: \"{}\")",
                        self.description, self.severity
                    ),
                )
            }
        };

        QualityIssue {
            severity,
            description,
            field: self.field.filter(|f| !f.trim().is_empty()),
        }
    }
}

/// Parses backend replies. Never fails; see the module docs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssessmentParser;

impl AssessmentParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a reply, falling back to an indeterminate (score 50) assessment.
    pub fn parse(&self, text: &str) -> QualityAssessment {
        match self.try_parse(text) {
            Ok(assessment) => assessment,
            Err(e) => {
                warn!(error = %e, reply_len = text.len(), "assessment reply was not in the expected format");
                QualityAssessment::unparseable(e)
            }
        }
    }

    /// Parse a reply, reporting why it could not be read.
    pub fn try_parse(&self, text: &str) -> Result<QualityAssessment, ParseError> {
        let body = strip_code_fence(text.trim());
        let raw: RawAssessment = serde_json::from_str(body)?;

        let score = raw
            .score
            .as_f64()
            .map(clamp_score)
            .ok_or_else(|| ParseError::Score(raw.score.to_string()))?;

        let issues: Vec<QualityIssue> = raw
            .issues
            .unwrap_or_default()
            .into_iter()
            .map(RawIssue::into_issue)
            .collect();

        debug!(
            contract = ASSESSMENT_CONTRACT_VERSION,
            score,
            issues = issues.len(),
            "parsed assessment reply"
        );

        Ok(QualityAssessment {
            score,
            issues,
            explanation: raw.explanation,
            recommendations: raw.recommendations.unwrap_or_default(),
        })
    }
}

/// Clamp to 0..=100, truncating any fraction.
fn clamp_score(score: f64) -> u8 {
    score.clamp(0.0, 100.0) as u8
}

/// Drop the opening fence line and, if present, the closing fence line.
fn strip_code_fence(text: &str) -> &str {
    if !text.starts_with("```") {
        return text;
    }

    let Some((_, body)) = text.split_once('\n') else {
        return "";
    };

    match body.rsplit_once('\n') {
        Some((inner, last)) if last.trim().starts_with("```") => inner,
        None if body.trim().starts_with("```") => "",
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::REPLY_KEYS;

    fn parse(text: &str) -> QualityAssessment {
        AssessmentParser.parse(text)
    }

    fn assert_fallback(assessment: &QualityAssessment) {
        assert_eq!(assessment.score, 50);
        assert_eq!(assessment.issues.len(), 1);
        assert_eq!(assessment.issues[0].severity, Severity::Warning);
        assert_eq!(
            assessment.explanation,
            "Assessment completed but response format was unexpected"
        );
    }

    #[test]
    fn parses_full_reply() {
        let assessment = parse(
            r#"{
                "score": 62,
                "issues": [
                    {"severity": "critical", "description": "Active exceeds total", "field": "active_candidates"},
                    {"severity": "info", "description": "Query echoed back", "field": null}
                ],
                "explanation": "Counts are inconsistent",
                "recommendations": ["Fix the count query", "Add a consistency test"]
            }"#,
        );

        assert_eq!(assessment.score, 62);
        assert_eq!(assessment.issues.len(), 2);
        assert_eq!(
            assessment.issues[0],
            QualityIssue::critical("Active exceeds total").with_field("active_candidates")
        );
        assert_eq!(assessment.issues[1].field, None);
        assert_eq!(assessment.explanation, "Counts are inconsistent");
        assert_eq!(assessment.recommendations.len(), 2);
    }

    #[test]
    fn strips_fence_with_language_tag() {
        let assessment = parse("```json\n{\"score\": 90, \"explanation\": \"ok\"}\n```");
        assert_eq!(assessment.score, 90);
        assert!(assessment.issues.is_empty());
        assert!(assessment.recommendations.is_empty());
        assert_eq!(assessment.explanation, "ok");
    }

    #[test]
    fn strips_bare_fence_and_surrounding_whitespace() {
        let assessment = parse("\n\n  ```\n{\"score\": 90, \"explanation\": \"ok\"}\n```  \n");
        assert_eq!(assessment.score, 90);
        assert_eq!(assessment.explanation, "ok");
    }

    #[test]
    fn tolerates_missing_closing_fence() {
        let assessment = parse("```json\n{\"score\": 70, \"explanation\": \"ok\"}");
        assert_eq!(assessment.score, 70);
    }

    #[test]
    fn handles_crlf_fences() {
        let assessment = parse("```json\r\n{\"score\": 88, \"explanation\": \"ok\"}\r\n```");
        assert_eq!(assessment.score, 88);
    }

    #[test]
    fn non_json_falls_back() {
        let assessment = parse("The response looks good overall, I'd give it 85.");
        assert_fallback(&assessment);
        assert!(
            assessment.issues[0]
                .description
                .starts_with("Could not parse assessment: ")
        );
    }

    #[test]
    fn empty_reply_falls_back() {
        assert_fallback(&parse(""));
        assert_fallback(&parse("```"));
    }

    #[test]
    fn missing_score_falls_back() {
        let assessment = parse(r#"{"explanation": "no score"}"#);
        assert_fallback(&assessment);
        assert!(assessment.issues[0].description.contains("score"));
    }

    #[test]
    fn missing_explanation_falls_back() {
        let assessment = parse(r#"{"score": 80}"#);
        assert_fallback(&assessment);
        assert!(assessment.issues[0].description.contains("explanation"));
    }

    #[test]
    fn issue_without_description_falls_back() {
        assert_fallback(&parse(
            r#"{"score": 80, "explanation": "x", "issues": [{"severity": "warning"}]}"#,
        ));
    }

    #[test]
    fn non_numeric_score_falls_back() {
        assert_fallback(&parse(r#"{"score": "high", "explanation": "x"}"#));
    }

    #[test]
    fn json_array_falls_back() {
        assert_fallback(&parse(r#"[{"score": 80, "explanation": "x"}]"#));
    }

    #[test]
    fn null_lists_default_to_empty() {
        let assessment =
            parse(r#"{"score": 75, "explanation": "x", "issues": null, "recommendations": null}"#);
        assert_eq!(assessment.score, 75);
        assert!(assessment.issues.is_empty());
        assert!(assessment.recommendations.is_empty());
    }

    #[test]
    fn scores_are_clamped_and_truncated() {
        assert_eq!(parse(r#"{"score": 150, "explanation": "x"}"#).score, 100);
        assert_eq!(parse(r#"{"score": -5, "explanation": "x"}"#).score, 0);
        assert_eq!(parse(r#"{"score": 87.9, "explanation": "x"}"#).score, 87);
    }

    #[test]
    fn unknown_severity_is_coerced_to_info() {
        let assessment = parse(
            r#"{"score": 60, "explanation": "x",
                "issues": [{"severity": "high", "description": "Token too short", "field": "token"}]}"#,
        );
        let issue = &assessment.issues[0];
        assert_eq!(issue.severity, Severity::Info);
        assert_eq!(issue.description, "Token too short (reported severity: \"high\")");
        assert_eq!(issue.field.as_deref(), Some("token"));
    }

    #[test]
    fn severity_matching_ignores_case() {
        let assessment = parse(
            r#"{"score": 60, "explanation": "x",
                "issues": [{"severity": "CRITICAL", "description": "Empty permissions"}]}"#,
        );
        assert_eq!(assessment.issues[0].severity, Severity::Critical);
        assert_eq!(assessment.issues[0].description, "Empty permissions");
    }

    #[test]
    fn blank_field_is_treated_as_absent() {
        let assessment = parse(
            r#"{"score": 60, "explanation": "x",
                "issues": [{"severity": "info", "description": "d", "field": "  "}]}"#,
        );
        assert_eq!(assessment.issues[0].field, None);
    }

    #[test]
    fn prose_around_json_is_not_extracted() {
        assert_fallback(&parse(
            "Here is my assessment:\n{\"score\": 90, \"explanation\": \"ok\"}",
        ));
    }

    #[test]
    fn reply_with_every_prompt_key_parses() {
        let reply = format!(
            "{{\"{}\": 91, \"{}\": [], \"{}\": \"fine\", \"{}\": []}}",
            REPLY_KEYS[0], REPLY_KEYS[1], REPLY_KEYS[2], REPLY_KEYS[3]
        );
        let assessment = AssessmentParser.try_parse(&reply).unwrap();
        assert_eq!(assessment.score, 91);
    }

    #[test]
    fn try_parse_reports_error() {
        let err = AssessmentParser.try_parse("not json").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn fence_stripping_cases() {
        assert_eq!(strip_code_fence("{}"), "{}");
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{\n}\n```"), "{\n}");
        assert_eq!(strip_code_fence("```json"), "");
        assert_eq!(strip_code_fence("```json\n```"), "");
    }
}
