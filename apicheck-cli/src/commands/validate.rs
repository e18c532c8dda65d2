//! Structure-only check; needs no credentials.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Result, bail};
use apicheck_core::{StructureValidator, ValidationResult};
use clap::Args;

use super::read_json;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON file holding the API response
    #[arg(short, long)]
    pub response: PathBuf,

    /// JSON Schema the response must satisfy
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Print the result as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let response = read_json(&args.response)?;
    let schema = read_json(&args.schema)?;

    let result = StructureValidator.validate(&response, &schema);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render(&result));
    }

    if !result.is_valid {
        bail!("response does not match schema");
    }
    Ok(())
}

fn render(result: &ValidationResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_result(&mut out, result);
    out
}

fn write_result(out: &mut impl fmt::Write, result: &ValidationResult) -> fmt::Result {
    let badge = if result.is_valid {
        "✓ PASSED"
    } else {
        "✗ FAILED"
    };
    writeln!(out, "Structure Validation: {badge}")?;
    for error in &result.errors {
        writeln!(out, "  • {error}")?;
    }
    for warning in &result.warnings {
        writeln!(out, "  ! {warning}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_pass() {
        assert_eq!(
            render(&ValidationResult::passed()),
            "Structure Validation: ✓ PASSED\n"
        );
    }

    #[test]
    fn renders_failure_with_errors() {
        let text = render(&ValidationResult::failed("Schema validation failed: boom"));
        assert!(text.starts_with("Structure Validation: ✗ FAILED\n"));
        assert!(text.contains("  • Schema validation failed: boom\n"));
    }

    #[test]
    fn renders_each_line_in_order() {
        let mut result = ValidationResult::failed("first");
        result.errors.push("second".to_string());
        result.warnings.push("deprecated field".to_string());

        assert_eq!(
            render(&result),
            "Structure Validation: ✗ FAILED\n  • first\n  • second\n  ! deprecated field\n"
        );
    }
}
