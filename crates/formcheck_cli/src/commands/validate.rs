use anyhow::{Context, Result};
use formcheck_core::AbsentValuePolicy;
use formcheck_parser::{parse_data_file, parse_schema_file};
use formcheck_validator::{CompiledSchema, ValidationResolver};
use std::path::Path;
use tracing::info;

use super::{EXIT_INVALID, EXIT_SCHEMA_FAULT};
use crate::output;

pub fn execute(
    schema_path: &str,
    data_path: &str,
    all_criteria: bool,
    absent_values: Option<AbsentValuePolicy>,
    format: &str,
) -> Result<()> {
    info!("Validating {} against schema {}", data_path, schema_path);

    let schema = parse_schema_file(Path::new(schema_path))
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;
    let data = parse_data_file(Path::new(data_path))
        .with_context(|| format!("Failed to parse data file: {}", data_path))?;

    if format != "json" {
        output::print_info(&format!(
            "Schema loaded: {} ({} list(s)), {} record(s) to check",
            schema.name,
            schema.lists.len(),
            data.total_records()
        ));
    }

    let resolver = match ValidationResolver::new(&schema) {
        Ok(resolver) => resolver,
        Err(_) => {
            output::print_schema_faults(&CompiledSchema::check(&schema), format)?;
            std::process::exit(EXIT_SCHEMA_FAULT);
        }
    };

    // CLI flags override the options carried by the schema file.
    let mut options = schema.options.clone();
    if all_criteria {
        options.collect_all_criteria = true;
    }
    if let Some(policy) = absent_values {
        options.absent_values = policy;
    }
    info!(
        "Options: collect_all_criteria={}, absent_values={:?}",
        options.collect_all_criteria, options.absent_values
    );

    let outcome = match resolver.validate(&data, &options) {
        Ok(outcome) => outcome,
        Err(fault) => {
            output::print_schema_faults(&[fault], format)?;
            std::process::exit(EXIT_SCHEMA_FAULT);
        }
    };

    output::print_validation_report(&outcome, data.total_records(), format)?;

    if !outcome.is_valid() {
        std::process::exit(EXIT_INVALID);
    }

    Ok(())
}
