//! Loaders for formcheck schemas and form data snapshots.
//!
//! Schemas can be written in YAML, TOML or JSON; data snapshots in JSON,
//! YAML or TOML. Everything deserializes straight into the strongly-typed
//! `FormSchema` and `FormData` structures from `formcheck_core`.
//!
//! # Example
//!
//! ```rust
//! use formcheck_parser::parse_schema_yaml;
//!
//! let yaml = r#"
//! name: people
//! lists:
//!   - name: test
//!     fields:
//!       - name: firstName
//!         required: form.required_message
//!     unique:
//!       - field: firstName
//! "#;
//!
//! let schema = parse_schema_yaml(yaml).expect("Failed to parse schema");
//! assert_eq!(schema.name, "people");
//! assert_eq!(schema.lists[0].unique[0].message, "Duplicated");
//! ```

use formcheck_core::{FormData, FormSchema};
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a schema or a data snapshot.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

impl FileFormat {
    fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            FileFormat::Yaml => Ok(serde_yaml_ng::from_str(content)?),
            FileFormat::Toml => {
                toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))
            }
            FileFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

/// Parse a schema from a YAML string.
///
/// # Example
///
/// ```rust
/// use formcheck_parser::parse_schema_yaml;
///
/// let yaml = r#"
/// name: contacts
/// lists:
///   - name: rows
///     fields:
///       - name: email
///         required: true
/// "#;
///
/// let schema = parse_schema_yaml(yaml).unwrap();
/// assert!(schema.lists[0].fields[0].required.is_required());
/// ```
pub fn parse_schema_yaml(content: &str) -> Result<FormSchema> {
    FileFormat::Yaml.parse(content)
}

/// Parse a schema from a TOML string.
///
/// # Example
///
/// ```rust
/// use formcheck_parser::parse_schema_toml;
///
/// let toml = r#"
/// name = "contacts"
///
/// [[lists]]
/// name = "rows"
///
/// [[lists.fields]]
/// name = "email"
/// required = true
/// "#;
///
/// let schema = parse_schema_toml(toml).unwrap();
/// assert_eq!(schema.lists[0].name, "rows");
/// ```
pub fn parse_schema_toml(content: &str) -> Result<FormSchema> {
    FileFormat::Toml.parse(content)
}

/// Parse a schema from a JSON string.
pub fn parse_schema_json(content: &str) -> Result<FormSchema> {
    FileFormat::Json.parse(content)
}

/// Parse a form data snapshot from a JSON string.
///
/// The top level is an object mapping list names to arrays of records.
///
/// # Example
///
/// ```rust
/// use formcheck_parser::parse_data_json;
///
/// let data = parse_data_json(r#"{"test": [{"firstName": "Alice"}, {"firstName": null}]}"#).unwrap();
/// assert_eq!(data.list("test").unwrap().len(), 2);
/// ```
pub fn parse_data_json(content: &str) -> Result<FormData> {
    FileFormat::Json.parse(content)
}

/// Parse a form data snapshot from a YAML string.
pub fn parse_data_yaml(content: &str) -> Result<FormData> {
    FileFormat::Yaml.parse(content)
}

/// Parse a form data snapshot from a TOML string.
///
/// TOML has no null, so absent values are written by leaving the field out
/// or setting it to `""`.
pub fn parse_data_toml(content: &str) -> Result<FormData> {
    FileFormat::Toml.parse(content)
}

/// Detect the file format from a path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `FileFormat::Yaml`
/// * `.toml` → `FileFormat::Toml`
/// * `.json` → `FileFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "toml" => Ok(FileFormat::Toml),
        "json" => Ok(FileFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use formcheck_parser::parse_schema_file;
/// use std::path::Path;
///
/// let schema = parse_schema_file(Path::new("schemas/people.yml")).unwrap();
/// println!("Loaded schema: {}", schema.name);
/// ```
pub fn parse_schema_file(path: &Path) -> Result<FormSchema> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    format.parse(&content)
}

/// Parse a form data snapshot from a file with automatic format detection.
pub fn parse_data_file(path: &Path) -> Result<FormData> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    format.parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::{
        AbsentValuePolicy, FieldRule, FieldType, FieldValue, Requirement,
    };
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const PEOPLE_YAML: &str = r#"
name: people
description: Dynamic list of people
options:
  collect_all_criteria: true
lists:
  - name: test
    fields:
      - name: firstName
        required: form.required_message
      - name: age
        type: integer
        rules:
          - type: min
            min: 0
          - type: max
            max: 150
            message: too old
    unique:
      - field: firstName
"#;

    #[test]
    fn test_parse_schema_yaml_minimal() {
        let schema = parse_schema_yaml("name: empty\n").expect("Failed to parse minimal schema");

        assert_eq!(schema.name, "empty");
        assert_eq!(schema.description, None);
        assert!(schema.lists.is_empty());
        assert!(!schema.options.collect_all_criteria);
        assert_eq!(schema.options.absent_values, AbsentValuePolicy::Collide);
    }

    #[test]
    fn test_parse_schema_yaml_with_lists() {
        let schema = parse_schema_yaml(PEOPLE_YAML).expect("Failed to parse people schema");

        assert_eq!(schema.description, Some("Dynamic list of people".to_string()));
        assert!(schema.options.collect_all_criteria);

        let list = schema.list("test").expect("list should be present");
        assert_eq!(list.fields.len(), 2);

        let first = &list.fields[0];
        assert_eq!(first.field_type, FieldType::String);
        assert_eq!(
            first.required,
            Requirement::Message("form.required_message".to_string())
        );

        let age = &list.fields[1];
        assert_eq!(age.field_type, FieldType::Integer);
        assert!(age.required.is_optional());
        assert_eq!(
            age.rules,
            vec![
                FieldRule::Min {
                    min: 0.0,
                    message: None
                },
                FieldRule::Max {
                    max: 150.0,
                    message: Some("too old".to_string())
                },
            ]
        );

        assert_eq!(list.unique.len(), 1);
        assert_eq!(list.unique[0].field, "firstName");
        assert_eq!(list.unique[0].message, "Duplicated");
    }

    #[test]
    fn test_parse_schema_yaml_one_of_values() {
        let yaml = r#"
name: shirts
lists:
  - name: orders
    fields:
      - name: size
        rules:
          - type: one_of
            values: [S, M, L]
      - name: quantity
        type: integer
        rules:
          - type: one_of
            values: [1, 2, 3]
"#;
        let schema = parse_schema_yaml(yaml).unwrap();
        let fields = &schema.lists[0].fields;

        assert_eq!(
            fields[0].rules[0],
            FieldRule::OneOf {
                values: vec!["S".into(), "M".into(), "L".into()],
                message: None
            }
        );
        assert_eq!(
            fields[1].rules[0],
            FieldRule::OneOf {
                values: vec![FieldValue::Int(1), FieldValue::Int(2), FieldValue::Int(3)],
                message: None
            }
        );
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let invalid_yaml = r#"
name: test
lists:
  - name: rows
    fields: [unterminated
"#;

        let result = parse_schema_yaml(invalid_yaml);
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_parse_schema_missing_name() {
        let result = parse_schema_yaml("lists: []\n");
        assert!(matches!(result.unwrap_err(), ParserError::YamlError(_)));
    }

    #[test]
    fn test_parse_schema_unknown_rule_type() {
        let yaml = r#"
name: test
lists:
  - name: rows
    fields:
      - name: a
        rules:
          - type: palindrome
"#;
        assert!(parse_schema_yaml(yaml).is_err());
    }

    #[test]
    fn test_parse_schema_toml() {
        let toml = r#"
name = "people"

[options]
absent_values = "exempt"

[[lists]]
name = "test"

[[lists.fields]]
name = "firstName"
required = "form.required_message"

[[lists.fields.rules]]
type = "max_length"
max = 20

[[lists.unique]]
field = "firstName"
message = "name.taken"
"#;

        let schema = parse_schema_toml(toml).expect("Failed to parse TOML schema");

        assert_eq!(schema.options.absent_values, AbsentValuePolicy::Exempt);
        let list = &schema.lists[0];
        assert_eq!(
            list.fields[0].rules,
            vec![FieldRule::MaxLength {
                max: 20,
                message: None
            }]
        );
        assert_eq!(list.unique[0].message, "name.taken");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let invalid_toml = r#"
name = "test"
[[[invalid syntax
"#;

        let result = parse_schema_toml(invalid_toml);
        assert!(matches!(result.unwrap_err(), ParserError::TomlError(_)));
    }

    #[test]
    fn test_parse_schema_json() {
        let json = r#"{
            "name": "people",
            "lists": [{
                "name": "test",
                "fields": [{ "name": "firstName", "required": true }],
                "unique": [{ "field": "firstName" }]
            }]
        }"#;

        let schema = parse_schema_json(json).unwrap();
        assert_eq!(schema.lists[0].fields[0].required, Requirement::Flag(true));
    }

    #[test]
    fn test_parse_data_json_scalars() {
        let json = r#"{
            "test": [
                { "firstName": "Alice", "age": 30, "score": 1.5, "active": true },
                { "firstName": null },
                {}
            ]
        }"#;

        let data = parse_data_json(json).unwrap();
        let list = data.list("test").unwrap();
        assert_eq!(list.len(), 3);

        let first = list.get(0).unwrap();
        assert_eq!(first.get("firstName"), Some(&FieldValue::from("Alice")));
        assert_eq!(first.get("age"), Some(&FieldValue::Int(30)));
        assert_eq!(first.get("score"), Some(&FieldValue::Float(1.5)));
        assert_eq!(first.get("active"), Some(&FieldValue::Bool(true)));

        assert_eq!(list.get(1).unwrap().get("firstName"), Some(&FieldValue::Null));
        assert!(list.get(2).unwrap().is_empty());
    }

    #[test]
    fn test_parse_data_rejects_nested_values() {
        let json = r#"{ "test": [ { "firstName": { "first": "A" } } ] }"#;
        assert!(matches!(
            parse_data_json(json).unwrap_err(),
            ParserError::JsonError(_)
        ));
    }

    #[test]
    fn test_parse_data_yaml() {
        let yaml = r#"
test:
  - firstName: Alice
  - firstName: ~
  - firstName: ""
"#;
        let data = parse_data_yaml(yaml).unwrap();
        let list = data.list("test").unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.get(1).unwrap().get("firstName").unwrap().is_absent());
        assert!(list.get(2).unwrap().get("firstName").unwrap().is_absent());
    }

    #[test]
    fn test_parse_data_toml() {
        let toml = r#"
[[test]]
firstName = "Alice"

[[test]]
"#;
        let data = parse_data_toml(toml).unwrap();
        assert_eq!(data.list("test").unwrap().len(), 2);
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(Path::new("schema.yaml")).unwrap(), FileFormat::Yaml);
        assert_eq!(detect_format(Path::new("schema.YML")).unwrap(), FileFormat::Yaml);
        assert_eq!(detect_format(Path::new("schema.toml")).unwrap(), FileFormat::Toml);
        assert_eq!(detect_format(Path::new("data.json")).unwrap(), FileFormat::Json);
    }

    #[test]
    fn test_detect_format_unsupported() {
        let result = detect_format(Path::new("schema.xml"));
        assert!(matches!(
            result.unwrap_err(),
            ParserError::UnsupportedFormat(ext) if ext == "xml"
        ));
    }

    #[test]
    fn test_detect_format_no_extension() {
        let result = detect_format(Path::new("schema"));
        assert!(matches!(result.unwrap_err(), ParserError::InvalidExtension));
    }

    #[test]
    fn test_parse_schema_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".yml")
            .tempfile()
            .unwrap();
        file.write_all(PEOPLE_YAML.as_bytes()).unwrap();

        let schema = parse_schema_file(file.path()).expect("Failed to parse schema file");
        assert_eq!(schema.name, "people");
    }

    #[test]
    fn test_parse_data_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        file.write_all(br#"{"test": [{"firstName": "Bob"}]}"#).unwrap();

        let data = parse_data_file(file.path()).unwrap();
        assert_eq!(data.total_records(), 1);
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_data_file(Path::new("does/not/exist.json"));
        assert!(matches!(result.unwrap_err(), ParserError::IoError(_)));
    }

    #[test]
    fn test_round_trip_yaml() {
        let original = parse_schema_yaml(PEOPLE_YAML).unwrap();

        let yaml = serde_yaml_ng::to_string(&original).expect("Failed to serialize");
        let parsed = parse_schema_yaml(&yaml).expect("Failed to parse");

        assert_eq!(parsed, original);
    }
}
