use anyhow::Result;
use colored::*;
use formcheck_core::{ErrorReport, FormData, SchemaFault, ValidationOutcome};
use serde_json::json;

pub fn print_validation_report(
    outcome: &ValidationOutcome,
    records: usize,
    format: &str,
) -> Result<()> {
    match format {
        "json" => print_json_report(outcome, records),
        _ => {
            print_text_report(outcome, records);
            Ok(())
        }
    }
}

fn print_text_report(outcome: &ValidationOutcome, records: usize) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    match outcome {
        ValidationOutcome::Valid(_) => {
            println!(
                "\n{} {}",
                "✓".green().bold(),
                "Validation PASSED".green().bold()
            );
            print_summary(records, 0);
        }
        ValidationOutcome::Invalid(report) => {
            println!(
                "\n{} {}",
                "✗".red().bold(),
                "Validation FAILED".red().bold()
            );
            print_errors(report);
            print_summary(records, report.len());
        }
    }
    println!("{}", "═".repeat(60));
}

fn print_errors(report: &ErrorReport) {
    println!("\n{}", "Errors:".red().bold());
    for (i, (path, error)) in report.iter().enumerate() {
        println!(
            "  {}. {}: {} ({})",
            i + 1,
            path.to_string().bold(),
            error.message.red(),
            error.kind
        );
        if let Some(types) = &error.types {
            for (kind, messages) in types {
                println!("       - {}: {}", kind, messages.join(", ").dimmed());
            }
        }
    }
}

fn print_summary(records: usize, error_count: usize) {
    println!("\n{}", "Summary:".bold());
    println!("  Records checked: {}", records);
    println!("  Fields in error: {}", error_count);
}

fn print_json_report(outcome: &ValidationOutcome, records: usize) -> Result<()> {
    let output = match outcome {
        ValidationOutcome::Valid(values) => json!({
            "valid": true,
            "values": values,
            "errors": ErrorReport::new(),
            "summary": { "record_count": records, "error_count": 0 },
        }),
        ValidationOutcome::Invalid(report) => json!({
            "valid": false,
            "values": FormData::new(),
            "errors": report,
            "summary": { "record_count": records, "error_count": report.len() },
        }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_schema_faults(faults: &[SchemaFault], format: &str) -> Result<()> {
    if format == "json" {
        let output = json!({
            "valid": false,
            "schema_faults": faults.iter().map(|f| f.to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_error(&format!("Schema has {} fault(s):", faults.len()));
    for (i, fault) in faults.iter().enumerate() {
        eprintln!("  {}. {}", i + 1, fault.to_string().red());
    }
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
