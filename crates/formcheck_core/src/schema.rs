//! Form schema types.
//!
//! This module contains the declarative description of a form: the lists it
//! carries, the fields of each list's records with their per-field rules, and
//! the cross-record uniqueness constraints declared over each list.

use crate::{FieldValue, RuleKind, ValidationOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Default message for a violated uniqueness constraint.
pub const DEFAULT_UNIQUE_MESSAGE: &str = "Duplicated";

/// A form schema.
///
/// # Example
///
/// ```rust
/// use formcheck_core::{FieldSpec, FieldType, FormSchema, ListSchema, Requirement, UniqueConstraint};
///
/// let schema = FormSchema {
///     name: "people".to_string(),
///     description: None,
///     options: Default::default(),
///     lists: vec![ListSchema {
///         name: "test".to_string(),
///         fields: vec![FieldSpec {
///             name: "firstName".to_string(),
///             field_type: FieldType::String,
///             required: Requirement::Message("form.required_message".to_string()),
///             rules: vec![],
///             description: None,
///         }],
///         unique: vec![UniqueConstraint::new("firstName")],
///     }],
/// };
/// assert!(schema.list("test").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    /// Name identifying this form
    pub name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Default options for validation passes against this schema
    #[serde(default)]
    pub options: ValidationOptions,

    /// The record lists this form carries
    #[serde(default)]
    pub lists: Vec<ListSchema>,
}

impl FormSchema {
    /// Gets a list schema by name.
    pub fn list(&self, name: &str) -> Option<&ListSchema> {
        self.lists.iter().find(|l| l.name == name)
    }
}

/// Schema for one record list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSchema {
    /// List name, the first segment of every field path in this list
    pub name: String,

    /// Fields of every record in the list
    #[serde(default)]
    pub fields: Vec<FieldSpec>,

    /// Cross-record uniqueness constraints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique: Vec<UniqueConstraint>,
}

impl ListSchema {
    /// Gets a field spec by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the names of the fields that must be present on every record.
    pub fn required_fields(&self) -> BTreeSet<&str> {
        self.fields
            .iter()
            .filter(|f| f.required.is_required())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Returns the constraints declared over the whole list.
    pub fn unique_constraints(&self) -> &[UniqueConstraint] {
        &self.unique
    }
}

/// A single field of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name
    pub name: String,

    /// Declared type; values are coerced or rejected against it
    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    /// Whether the field must be present, and with which message
    #[serde(default, skip_serializing_if = "Requirement::is_optional")]
    pub required: Requirement,

    /// Additional rules, checked in order on present values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FieldRule>,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Declared type of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Text; numbers and booleans are coerced to their string form
    #[default]
    String,
    /// Whole numbers; integral floats are coerced
    Integer,
    /// Any number
    Number,
    /// `true` / `false`
    Boolean,
}

impl FieldType {
    /// Returns the type name as written in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }

    /// Returns true for numeric types.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Number)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The required rule of a field.
///
/// Written either as `required: true` (default message) or as
/// `required: "message.key"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    /// `true` for required with the default message, `false` for optional
    Flag(bool),
    /// Required, with a custom message
    Message(String),
}

impl Requirement {
    /// Returns true if the field is required.
    pub fn is_required(&self) -> bool {
        !self.is_optional()
    }

    /// Returns true if the field may be absent.
    pub fn is_optional(&self) -> bool {
        matches!(self, Requirement::Flag(false))
    }

    /// Returns the custom message, if one was given.
    pub fn message(&self) -> Option<&str> {
        match self {
            Requirement::Message(m) => Some(m),
            Requirement::Flag(_) => None,
        }
    }
}

impl Default for Requirement {
    fn default() -> Self {
        Requirement::Flag(false)
    }
}

/// Additional per-field rules, evaluated only on present values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldRule {
    /// String must have at least `min` characters
    MinLength {
        /// Minimum length (inclusive)
        min: usize,
        /// Custom message
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// String must have at most `max` characters
    MaxLength {
        /// Maximum length (inclusive)
        max: usize,
        /// Custom message
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// String must match the regex
    Pattern {
        /// Regular expression pattern
        regex: String,
        /// Custom message
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Value must be one of the listed values
    OneOf {
        /// Allowed values
        values: Vec<FieldValue>,
        /// Custom message
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Number must be at least `min`
    Min {
        /// Minimum value (inclusive)
        min: f64,
        /// Custom message
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },

    /// Number must be at most `max`
    Max {
        /// Maximum value (inclusive)
        max: f64,
        /// Custom message
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl FieldRule {
    /// Returns the report tag of this rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            FieldRule::MinLength { .. } => RuleKind::MinLength,
            FieldRule::MaxLength { .. } => RuleKind::MaxLength,
            FieldRule::Pattern { .. } => RuleKind::Pattern,
            FieldRule::OneOf { .. } => RuleKind::OneOf,
            FieldRule::Min { .. } => RuleKind::Min,
            FieldRule::Max { .. } => RuleKind::Max,
        }
    }

    /// Returns the custom message, if one was given.
    pub fn message(&self) -> Option<&str> {
        match self {
            FieldRule::MinLength { message, .. }
            | FieldRule::MaxLength { message, .. }
            | FieldRule::Pattern { message, .. }
            | FieldRule::OneOf { message, .. }
            | FieldRule::Min { message, .. }
            | FieldRule::Max { message, .. } => message.as_deref(),
        }
    }

    /// Returns the message reported for `field` when this rule fails.
    pub fn message_for(&self, field: &str) -> String {
        if let Some(message) = self.message() {
            return message.to_string();
        }
        match self {
            FieldRule::MinLength { min, .. } => {
                format!("{field} must be at least {min} characters")
            }
            FieldRule::MaxLength { max, .. } => {
                format!("{field} must be at most {max} characters")
            }
            FieldRule::Pattern { regex, .. } => {
                format!("{field} must match the following: \"{regex}\"")
            }
            FieldRule::OneOf { values, .. } => {
                let allowed: Vec<String> = values.iter().map(ToString::to_string).collect();
                format!(
                    "{field} must be one of the following values: {}",
                    allowed.join(", ")
                )
            }
            FieldRule::Min { min, .. } => {
                format!("{field} must be greater than or equal to {min}")
            }
            FieldRule::Max { max, .. } => {
                format!("{field} must be less than or equal to {max}")
            }
        }
    }

    /// Returns true if the rule only applies to string fields.
    pub fn is_string_rule(&self) -> bool {
        matches!(
            self,
            FieldRule::MinLength { .. } | FieldRule::MaxLength { .. } | FieldRule::Pattern { .. }
        )
    }

    /// Returns true if the rule only applies to numeric fields.
    pub fn is_numeric_rule(&self) -> bool {
        matches!(self, FieldRule::Min { .. } | FieldRule::Max { .. })
    }
}

/// No two records of a list may share a value for `field`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueConstraint {
    /// The constrained field
    pub field: String,

    /// Message reported on every colliding record
    #[serde(default = "default_unique_message")]
    pub message: String,
}

impl UniqueConstraint {
    /// Creates a constraint with the default message.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: default_unique_message(),
        }
    }

    /// Creates a constraint with a custom message.
    pub fn with_message(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn default_unique_message() -> String {
    DEFAULT_UNIQUE_MESSAGE.to_string()
}

/// Message reported when a required field is absent and no custom message
/// was configured.
pub fn default_required_message(field: &str) -> String {
    format!("{field} is a required field")
}

/// Message reported when a value does not have the declared type.
pub fn type_mismatch_message(field: &str, field_type: FieldType) -> String {
    format!("{field} must be a `{field_type}` type")
}
