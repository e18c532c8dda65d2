//! Assessment prompt rendering.
//!
//! The reply shape described here is what [`crate::AssessmentParser`] reads
//! back. Bump [`ASSESSMENT_CONTRACT_VERSION`] whenever either side changes.

use serde_json::Value;

/// Version of the prompt/reply contract shared with the parser.
pub const ASSESSMENT_CONTRACT_VERSION: u32 = 1;

/// Top-level keys the reply must (or may) carry.
pub(crate) const REPLY_KEYS: [&str; 4] = ["score", "issues", "explanation", "recommendations"];

const PERSONA: &str =
    "You are an expert API testing engineer. Analyze this API response for quality issues.";

const DIMENSIONS: &str = "\
Please evaluate the response across these dimensions:

1. **Completeness**: Are all expected fields present and properly populated?
2. **Data Quality**: Are values appropriate and meaningful for their field types?
3. **Consistency**: Is the response internally consistent (e.g., related fields align)?
4. **Usability**: Would this response be immediately usable by a client application?";

const REPLY_SHAPE: &str = r#"Provide your assessment in the following JSON format:
{
    "score": <number 0-100>,
    "issues": [
        {"severity": "critical|warning|info", "description": "issue description", "field": "field_name or null"}
    ],
    "explanation": "Brief explanation of the overall score",
    "recommendations": ["recommendation 1", "recommendation 2"]
}"#;

const CLOSING: &str = "\
Be specific about issues found and practical in your recommendations.
Respond ONLY with the JSON object, no additional text.";

/// Renders a response/schema pair into the assessment request.
///
/// Output is a pure function of the inputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, response: &Value, schema: &Value) -> String {
        format!(
            "{PERSONA}\n\nAPI Response:\n{}\n\nExpected Schema:\n{}\n\n{DIMENSIONS}\n\n{REPLY_SHAPE}\n\n{CLOSING}",
            pretty(response),
            pretty(schema),
        )
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> (Value, Value) {
        (
            json!({"user_id": 12345, "username": "john_doe"}),
            json!({"required": ["user_id"], "type": "object"}),
        )
    }

    #[test]
    fn embeds_pretty_printed_inputs() {
        let (response, schema) = sample();
        let prompt = PromptBuilder.build(&response, &schema);

        assert!(prompt.contains("API Response:\n{\n  \"user_id\": 12345,\n  \"username\": \"john_doe\"\n}"));
        assert!(prompt.contains("Expected Schema:\n{\n  \"required\": [\n    \"user_id\"\n  ],"));
    }

    #[test]
    fn states_persona_and_dimensions() {
        let (response, schema) = sample();
        let prompt = PromptBuilder.build(&response, &schema);

        assert!(prompt.starts_with("You are an expert API testing engineer."));
        for dimension in ["Completeness", "Data Quality", "Consistency", "Usability"] {
            assert!(prompt.contains(&format!("**{dimension}**")), "missing {dimension}");
        }
    }

    #[test]
    fn describes_every_reply_key() {
        let (response, schema) = sample();
        let prompt = PromptBuilder.build(&response, &schema);

        for key in REPLY_KEYS {
            assert!(prompt.contains(&format!("\"{key}\":")), "missing key {key}");
        }
        assert!(prompt.contains("critical|warning|info"));
        assert!(prompt.ends_with("Respond ONLY with the JSON object, no additional text."));
    }

    #[test]
    fn is_deterministic() {
        let (response, schema) = sample();
        assert_eq!(
            PromptBuilder.build(&response, &schema),
            PromptBuilder.build(&response, &schema)
        );
    }
}
