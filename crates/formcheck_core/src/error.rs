//! Error types for form schemas.
//!
//! Field-level violations never surface as errors; they are collected into an
//! [`ErrorReport`](crate::ErrorReport). The errors here describe a schema that
//! is itself broken, or data whose shape the schema cannot address.

use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaFault>;

/// A malformed schema, or data the schema cannot address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaFault {
    /// A list or field has an empty name
    #[error("Schema '{schema}' contains an empty {what} name")]
    EmptyName {
        /// Schema name
        schema: String,
        /// What kind of name is empty ("list" or "field")
        what: &'static str,
    },

    /// Two lists share a name
    #[error("Duplicate list name: {0}")]
    DuplicateList(String),

    /// A list declares no fields
    #[error("List '{0}' declares no fields")]
    EmptyList(String),

    /// Two fields of one list share a name
    #[error("Duplicate field name '{field}' in list '{list}'")]
    DuplicateField {
        /// List name
        list: String,
        /// Field name
        field: String,
    },

    /// A constraint references a field the list does not declare
    #[error("Unique constraint on list '{list}' references undeclared field '{field}'")]
    UnknownField {
        /// List name
        list: String,
        /// Referenced field name
        field: String,
    },

    /// A pattern rule does not compile
    #[error("Invalid regex pattern '{pattern}' for field '{list}.{field}': {error}")]
    InvalidPattern {
        /// List name
        list: String,
        /// Field name
        field: String,
        /// The pattern as written
        pattern: String,
        /// Compiler error
        error: String,
    },

    /// A rule's bounds are contradictory or not finite
    #[error("Invalid bounds for field '{list}.{field}': {detail}")]
    InvalidBounds {
        /// List name
        list: String,
        /// Field name
        field: String,
        /// What is wrong with the bounds
        detail: String,
    },

    /// A rule does not apply to the field's declared type
    #[error("Rule '{rule}' cannot apply to {field_type} field '{list}.{field}'")]
    RuleNotApplicable {
        /// List name
        list: String,
        /// Field name
        field: String,
        /// Rule tag
        rule: String,
        /// Declared field type
        field_type: String,
    },

    /// A one-of rule lists no values
    #[error("Rule 'one_of' on field '{list}.{field}' has no allowed values")]
    EmptyOneOf {
        /// List name
        list: String,
        /// Field name
        field: String,
    },

    /// The data carries a list the schema does not declare
    #[error("Form data contains list '{0}' which the schema does not declare")]
    UnknownList(String),
}

impl SchemaFault {
    /// Creates a new invalid bounds error.
    pub fn invalid_bounds(
        list: impl Into<String>,
        field: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::InvalidBounds {
            list: list.into(),
            field: field.into(),
            detail: detail.into(),
        }
    }

    /// Creates a new rule-not-applicable error.
    pub fn not_applicable(
        list: impl Into<String>,
        field: impl Into<String>,
        rule: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self::RuleNotApplicable {
            list: list.into(),
            field: field.into(),
            rule: rule.into(),
            field_type: field_type.into(),
        }
    }
}
