use anyhow::{Context, Result};
use formcheck_core::{FieldSpec, FormSchema};
use formcheck_parser::parse_schema_file;
use formcheck_validator::CompiledSchema;
use serde_json::json;
use std::path::Path;
use tracing::info;

use super::EXIT_SCHEMA_FAULT;
use crate::output;

pub fn execute(schema_path: &str, format: &str) -> Result<()> {
    info!("Checking schema: {}", schema_path);

    let path = Path::new(schema_path);
    let schema = parse_schema_file(path)
        .with_context(|| format!("Failed to parse schema file: {}", schema_path))?;

    let faults = CompiledSchema::check(&schema);
    if !faults.is_empty() {
        output::print_schema_faults(&faults, format)?;
        std::process::exit(EXIT_SCHEMA_FAULT);
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary_json(&schema))?);
        return Ok(());
    }

    output::print_info(&format!(
        "Schema loaded: {} ({} list(s))",
        schema.name,
        schema.lists.len()
    ));
    output::print_success("Schema is valid");

    println!("\nSchema Summary:");
    println!("  Name:        {}", schema.name);
    println!(
        "  Description: {}",
        schema.description.as_deref().unwrap_or("N/A")
    );
    println!(
        "  Options:     collect_all_criteria={}, absent_values={:?}",
        schema.options.collect_all_criteria, schema.options.absent_values
    );

    for list in &schema.lists {
        println!("\nList: {}", list.name);
        println!("  Fields:");
        for field in &list.fields {
            println!("    - {}", describe_field(field));
        }
        if !list.unique.is_empty() {
            let unique: Vec<&str> = list.unique.iter().map(|u| u.field.as_str()).collect();
            println!("  Unique:      {}", unique.join(", "));
        }
    }

    Ok(())
}

fn describe_field(field: &FieldSpec) -> String {
    let mut parts = vec![format!("{} ({})", field.name, field.field_type)];
    if field.required.is_required() {
        parts.push("required".to_string());
    }
    if !field.rules.is_empty() {
        let kinds: Vec<&str> = field.rules.iter().map(|r| r.kind().as_str()).collect();
        parts.push(format!("rules: {}", kinds.join(", ")));
    }
    parts.join(", ")
}

fn summary_json(schema: &FormSchema) -> serde_json::Value {
    json!({
        "valid": true,
        "name": schema.name,
        "options": schema.options,
        "lists": schema.lists.iter().map(|list| json!({
            "name": list.name,
            "fields": list.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            "required": list.required_fields(),
            "unique": list.unique.iter().map(|u| u.field.as_str()).collect::<Vec<_>>(),
        })).collect::<Vec<_>>(),
    })
}
