//! Builder pattern for creating form schemas.
//!
//! This module provides ergonomic builders for constructing schemas and
//! their components with a fluent API.

use crate::{
    FieldRule, FieldSpec, FieldType, FormSchema, ListSchema, Requirement, UniqueConstraint,
    ValidationOptions,
};

/// Builder for creating a `FormSchema`.
///
/// # Example
///
/// ```rust
/// use formcheck_core::{FieldBuilder, ListBuilder, SchemaBuilder};
///
/// let schema = SchemaBuilder::new("people")
///     .description("A dynamic list of people")
///     .list(
///         ListBuilder::new("test")
///             .field(FieldBuilder::new("firstName").required("form.required_message").build())
///             .unique("firstName")
///             .build(),
///     )
///     .build();
/// assert_eq!(schema.lists.len(), 1);
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    description: Option<String>,
    options: ValidationOptions,
    lists: Vec<ListSchema>,
}

impl SchemaBuilder {
    /// Creates a new schema builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            options: ValidationOptions::default(),
            lists: Vec::new(),
        }
    }

    /// Sets the schema description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the default validation options.
    pub fn options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds a list schema.
    pub fn list(mut self, list: ListSchema) -> Self {
        self.lists.push(list);
        self
    }

    /// Builds the schema.
    pub fn build(self) -> FormSchema {
        FormSchema {
            name: self.name,
            description: self.description,
            options: self.options,
            lists: self.lists,
        }
    }
}

/// Builder for creating a `ListSchema`.
#[derive(Debug)]
pub struct ListBuilder {
    name: String,
    fields: Vec<FieldSpec>,
    unique: Vec<UniqueConstraint>,
}

impl ListBuilder {
    /// Creates a new list builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            unique: Vec::new(),
        }
    }

    /// Adds a field.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds multiple fields.
    pub fn fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Declares `field` unique across the list, with the default message.
    pub fn unique(mut self, field: impl Into<String>) -> Self {
        self.unique.push(UniqueConstraint::new(field));
        self
    }

    /// Declares `field` unique across the list, with a custom message.
    pub fn unique_with_message(
        mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.unique
            .push(UniqueConstraint::with_message(field, message));
        self
    }

    /// Builds the list schema.
    pub fn build(self) -> ListSchema {
        ListSchema {
            name: self.name,
            fields: self.fields,
            unique: self.unique,
        }
    }
}

/// Builder for creating a `FieldSpec`.
///
/// Fields default to optional strings.
///
/// # Example
///
/// ```rust
/// use formcheck_core::{FieldBuilder, FieldRule, FieldType};
///
/// let field = FieldBuilder::new("age")
///     .field_type(FieldType::Integer)
///     .required_default()
///     .rule(FieldRule::Min { min: 0.0, message: None })
///     .build();
/// assert!(field.required.is_required());
/// ```
#[derive(Debug)]
pub struct FieldBuilder {
    name: String,
    field_type: FieldType,
    required: Requirement,
    rules: Vec<FieldRule>,
    description: Option<String>,
}

impl FieldBuilder {
    /// Creates a new field builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::String,
            required: Requirement::default(),
            rules: Vec::new(),
            description: None,
        }
    }

    /// Sets the field type.
    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    /// Marks the field required, reporting `message` when it is absent.
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Requirement::Message(message.into());
        self
    }

    /// Marks the field required with the default message.
    pub fn required_default(mut self) -> Self {
        self.required = Requirement::Flag(true);
        self
    }

    /// Adds a rule.
    pub fn rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the field.
    pub fn build(self) -> FieldSpec {
        FieldSpec {
            name: self.name,
            field_type: self.field_type,
            required: self.required,
            rules: self.rules,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AbsentValuePolicy;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_builder() {
        let schema = SchemaBuilder::new("people")
            .description("People form")
            .options(ValidationOptions::new().with_absent_values(AbsentValuePolicy::Exempt))
            .list(
                ListBuilder::new("test")
                    .field(FieldBuilder::new("firstName").required("form.required_message").build())
                    .unique_with_message("firstName", "form.duplicate_message")
                    .build(),
            )
            .build();

        assert_eq!(schema.name, "people");
        assert_eq!(schema.description.as_deref(), Some("People form"));
        assert_eq!(schema.options.absent_values, AbsentValuePolicy::Exempt);

        let list = schema.list("test").unwrap();
        assert_eq!(list.fields.len(), 1);
        assert_eq!(list.unique[0].message, "form.duplicate_message");
    }

    #[test]
    fn test_list_builder_adds_fields_in_order() {
        let list = ListBuilder::new("members")
            .field(FieldBuilder::new("email").build())
            .fields(vec![
                FieldBuilder::new("handle").build(),
                FieldBuilder::new("age").field_type(FieldType::Integer).build(),
            ])
            .build();

        let names: Vec<&str> = list.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["email", "handle", "age"]);
    }

    #[test]
    fn test_field_builder_defaults() {
        let field = FieldBuilder::new("nickname").build();
        assert_eq!(field.field_type, FieldType::String);
        assert!(field.required.is_optional());
        assert!(field.rules.is_empty());
    }
}
