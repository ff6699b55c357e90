use anyhow::{Context, Result};
use formcheck_core::{FieldBuilder, FormSchema, ListBuilder, SchemaBuilder};
use formcheck_validator::CompiledSchema;
use std::fs::File;
use std::io::Write;
use tracing::info;

use crate::output;

pub fn execute(output_path: Option<&str>, list: &str, field: &str) -> Result<()> {
    info!("Initializing schema with list '{}' and field '{}'", list, field);

    let schema = starter_schema(list, field);

    // Refuse to write a schema the validator would reject.
    CompiledSchema::compile(&schema).context("Starter schema is not valid")?;

    let yaml = serde_yaml_ng::to_string(&schema).context("Failed to serialize schema to YAML")?;

    // Output to file or stdout
    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write to file: {}", path))?;
        output::print_success(&format!("Schema written to: {}", path));
    } else {
        println!("{}", yaml);
    }

    Ok(())
}

/// One list holding one required string field that must be unique per record.
fn starter_schema(list: &str, field: &str) -> FormSchema {
    SchemaBuilder::new(format!("{list}_form"))
        .description(format!("Dynamic list of {list}"))
        .list(
            ListBuilder::new(list)
                .field(FieldBuilder::new(field).required_default().build())
                .unique(field)
                .build(),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starter_schema_shape() {
        let schema = starter_schema("people", "firstName");

        assert_eq!(schema.name, "people_form");
        let list = schema.list("people").unwrap();
        assert!(list.fields[0].required.is_required());
        assert_eq!(list.unique[0].field, "firstName");
        assert!(CompiledSchema::compile(&schema).is_ok());
    }

    #[test]
    fn test_empty_field_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yml");

        let result = execute(path.to_str(), "people", "");
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
