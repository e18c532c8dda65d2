//! Human-readable rendering of a [`QualityReport`].

use std::fmt::{self, Write as _};

use crate::types::QualityReport;

const RULE_WIDTH: usize = 50;

/// Render a report as plain text.
///
/// Sections whose list is empty are left out entirely.
pub fn summarize(report: &QualityReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, report);
    out
}

fn write_summary(out: &mut impl fmt::Write, report: &QualityReport) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "API Response Quality Report")?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;
    writeln!(out, "Overall Score: {}/100", report.overall_score)?;
    writeln!(out)?;

    let badge = if report.validation.is_valid {
        "✓ PASSED"
    } else {
        "✗ FAILED"
    };
    writeln!(out, "Structure Validation: {badge}")?;

    if !report.validation.errors.is_empty() {
        writeln!(out, "\nValidation Errors:")?;
        for error in &report.validation.errors {
            writeln!(out, "  • {error}")?;
        }
    }

    if !report.validation.warnings.is_empty() {
        writeln!(out, "\nWarnings:")?;
        for warning in &report.validation.warnings {
            writeln!(out, "  • {warning}")?;
        }
    }

    let quality = &report.quality;
    writeln!(
        out,
        "\nQuality Assessment Score: {}/100 ({})",
        quality.score,
        quality.grade().label()
    )?;

    if !quality.explanation.is_empty() {
        writeln!(out, "\n{}", quality.explanation)?;
    }

    if !quality.issues.is_empty() {
        writeln!(out, "\nIssues Found ({}):", quality.issues.len())?;
        for issue in &quality.issues {
            let severity = issue.severity.as_str().to_ascii_uppercase();
            match &issue.field {
                Some(field) => writeln!(out, "  [{severity}] [{field}] {}", issue.description)?,
                None => writeln!(out, "  [{severity}] {}", issue.description)?,
            }
        }
    }

    if !quality.recommendations.is_empty() {
        writeln!(out, "\nRecommendations:")?;
        for (i, rec) in quality.recommendations.iter().enumerate() {
            writeln!(out, "  {}. {rec}", i + 1)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{rule}")
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{QualityAssessment, QualityIssue, ValidationResult};

    fn bare_report() -> QualityReport {
        QualityReport::new(
            ValidationResult::passed(),
            QualityAssessment {
                score: 80,
                issues: vec![],
                explanation: "Good quality".to_string(),
                recommendations: vec![],
            },
        )
    }

    #[test]
    fn empty_sections_are_omitted() {
        let text = summarize(&bare_report());

        assert!(text.contains("Overall Score: 86/100"));
        assert!(text.contains("Structure Validation: ✓ PASSED"));
        assert!(text.contains("Quality Assessment Score: 80/100 (GOOD)"));
        assert!(text.contains("Good quality"));
        assert!(!text.contains("Validation Errors"));
        assert!(!text.contains("Warnings"));
        assert!(!text.contains("Issues Found"));
        assert!(!text.contains("Recommendations"));
    }

    #[test]
    fn failed_report_lists_errors_and_issues() {
        let report = QualityReport::new(
            ValidationResult::failed("Schema validation failed: \"name\" is a required property"),
            QualityAssessment::structure_failed(),
        );
        let text = summarize(&report);

        assert!(text.contains("Overall Score: 0/100"));
        assert!(text.contains("Structure Validation: ✗ FAILED"));
        assert!(text.contains(
            "Validation Errors:\n  • Schema validation failed: \"name\" is a required property\n"
        ));
        assert!(text.contains("Issues Found (1):\n  [CRITICAL] Structure validation failed\n"));
        assert!(text.contains(
            "Recommendations:\n  1. Fix schema validation errors before quality assessment\n"
        ));
    }

    #[test]
    fn issues_carry_field_tags_and_recommendations_are_numbered() {
        let mut report = bare_report();
        report.quality.issues = vec![
            QualityIssue::critical("Active exceeds total").with_field("active_candidates"),
            QualityIssue::info("Query echoed back"),
        ];
        report.quality.recommendations = vec!["Fix counts".to_string(), "Add tests".to_string()];
        report.validation.warnings = vec!["deprecated field".to_string()];

        let text = summarize(&report);

        assert!(text.contains("  [CRITICAL] [active_candidates] Active exceeds total\n"));
        assert!(text.contains("  [INFO] Query echoed back\n"));
        assert!(text.contains("  1. Fix counts\n  2. Add tests\n"));
        assert!(text.contains("Warnings:\n  • deprecated field\n"));
    }

    #[test]
    fn display_matches_summarize() {
        let report = bare_report();
        assert_eq!(report.to_string(), summarize(&report));
    }
}
