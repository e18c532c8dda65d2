//! Built-in recruitment-system scenarios.
//!
//! Each scenario is a JSON fixture embedded at compile time. Cases are
//! checked in two layers: schema validation first, then the model-backed
//! assessment for cases whose structure passes.

use std::fmt;

use anyhow::{Context, Result, bail};
use apicheck_core::{QualityReport, ResponseQualityChecker, Severity, ValidationResult};
use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use super::build_checker;
use crate::config::ConfigLoader;

const SCENARIO_SOURCES: [&str; 4] = [
    include_str!("../../scenarios/01_candidate_status.json"),
    include_str!("../../scenarios/02_search_counts.json"),
    include_str!("../../scenarios/03_dashboard_stats.json"),
    include_str!("../../scenarios/04_login.json"),
];

const RULE_WIDTH: usize = 70;

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Scenario number to run
    #[arg(default_value_t = 1)]
    pub scenario: usize,

    /// List the available scenarios and exit
    #[arg(long)]
    pub list: bool,

    /// Run every scenario in order
    #[arg(long, conflicts_with = "scenario")]
    pub all: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub id: usize,
    pub title: String,
    pub summary: String,
    pub schema: Value,
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Case {
    pub name: String,
    pub response: Value,
    /// Overrides the scenario schema for this case
    #[serde(default)]
    pub schema: Option<Value>,
}

impl Case {
    fn schema<'a>(&'a self, scenario: &'a Scenario) -> &'a Value {
        self.schema.as_ref().unwrap_or(&scenario.schema)
    }
}

pub fn scenarios() -> Result<Vec<Scenario>> {
    SCENARIO_SOURCES
        .iter()
        .enumerate()
        .map(|(i, src)| {
            serde_json::from_str(src).with_context(|| format!("scenario {} is malformed", i + 1))
        })
        .collect()
}

pub async fn run(args: DemoArgs) -> Result<()> {
    let all = scenarios()?;

    if args.list {
        for scenario in &all {
            println!("{:>2}. {}", scenario.id, scenario.title);
            println!("    {}", scenario.summary);
        }
        return Ok(());
    }

    let selected: Vec<&Scenario> = if args.all {
        all.iter().collect()
    } else {
        match all.iter().find(|s| s.id == args.scenario) {
            Some(scenario) => vec![scenario],
            None => bail!(
                "no scenario {} (choose 1-{}, or use --list)",
                args.scenario,
                all.len()
            ),
        }
    };

    let config = ConfigLoader::load()?;
    let checker = build_checker(&config, config.assessment.clone())?;

    for scenario in selected {
        print!("{}", run_scenario(scenario, &checker).await);
    }
    Ok(())
}

/// How one case fared.
enum CaseOutcome {
    /// Structure failed, so the model was never asked.
    Rejected(ValidationResult),
    Checked(QualityReport),
}

/// Run every case of a scenario and render the transcript.
pub async fn run_scenario(scenario: &Scenario, checker: &ResponseQualityChecker) -> String {
    let mut outcomes = Vec::with_capacity(scenario.cases.len());
    for case in &scenario.cases {
        let schema = case.schema(scenario);
        let structure = checker.validate_structure(&case.response, schema);
        outcomes.push(if structure.is_valid {
            CaseOutcome::Checked(checker.check_response(&case.response, schema).await)
        } else {
            CaseOutcome::Rejected(structure)
        });
    }

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_scenario(&mut out, scenario, &outcomes);
    out
}

fn write_scenario(
    out: &mut impl fmt::Write,
    scenario: &Scenario,
    outcomes: &[CaseOutcome],
) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    let thin = "-".repeat(RULE_WIDTH);

    writeln!(out, "{rule}")?;
    writeln!(out, "SCENARIO {}: {}", scenario.id, scenario.title)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", scenario.summary)?;

    for (idx, (case, outcome)) in scenario.cases.iter().zip(outcomes).enumerate() {
        writeln!(out)?;
        writeln!(out, "Case {}: {}", idx + 1, case.name)?;
        writeln!(out, "{thin}")?;

        match outcome {
            CaseOutcome::Rejected(structure) => {
                writeln!(out, "Layer 1 - Structure: ✗ FAILED")?;
                for error in &structure.errors {
                    writeln!(out, "  • {error}")?;
                }
                writeln!(out, "Skipping quality check - fix structure issues first")?;
            }
            CaseOutcome::Checked(report) => {
                writeln!(out, "Layer 1 - Structure: ✓ PASSED")?;
                writeln!(
                    out,
                    "Layer 2 - Quality: {}/100 {}",
                    report.quality.score,
                    report.quality.grade()
                )?;
                if report.quality.has_critical() {
                    writeln!(
                        out,
                        "  {} critical issue(s) found",
                        report.quality.count(Severity::Critical)
                    )?;
                }
                write!(out, "{report}")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicheck_core::StructureValidator;
    use apicheck_models::providers::MockProvider;
    use std::sync::Arc;

    fn scenario(id: usize) -> Scenario {
        scenarios()
            .unwrap()
            .into_iter()
            .find(|s| s.id == id)
            .unwrap()
    }

    #[test]
    fn all_scenarios_parse_with_unique_ids() {
        let all = scenarios().unwrap();
        let ids: Vec<usize> = all.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(all.iter().all(|s| !s.cases.is_empty()));
    }

    #[test]
    fn case_structure_matches_expectations() {
        let expected: [(usize, &[bool]); 4] = [
            (1, &[true]),
            (2, &[true]),
            (3, &[true, false]),
            (4, &[true, true, false]),
        ];

        for (id, validity) in expected {
            let scenario = scenario(id);
            let actual: Vec<bool> = scenario
                .cases
                .iter()
                .map(|c| {
                    StructureValidator
                        .validate(&c.response, c.schema(&scenario))
                        .is_valid
                })
                .collect();
            assert_eq!(actual, validity, "scenario {id}");
        }
    }

    #[tokio::test]
    async fn structural_failures_skip_the_model() {
        let mock = Arc::new(MockProvider::new());
        mock.queue_reply(r#"{"score": 95, "explanation": "ok", "issues": [], "recommendations": []}"#);
        mock.queue_reply(r#"{"score": 40, "explanation": "weak token", "issues": [{"severity": "critical", "description": "Token is not a JWT", "field": "token"}], "recommendations": []}"#);
        let checker = ResponseQualityChecker::new(mock.clone());

        let transcript = run_scenario(&scenario(4), &checker).await;

        assert_eq!(mock.call_count(), 2);
        assert!(transcript.contains("SCENARIO 4: User Authentication"));
        assert!(transcript.contains("Layer 2 - Quality: 95/100 EXCELLENT"));
        assert!(transcript.contains("Layer 2 - Quality: 40/100 POOR"));
        assert!(transcript.contains("  1 critical issue(s) found"));
        assert!(transcript.contains("Skipping quality check - fix structure issues first"));
        assert!(transcript.contains("Layer 1 - Structure: ✗ FAILED\n  • Schema validation failed: "));
        assert!(transcript.contains("Overall Score: 96/100"));
    }
}
