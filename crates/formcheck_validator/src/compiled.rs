//! Schema compilation.
//!
//! A [`FormSchema`] is checked once before any data is validated against it:
//! names must be unique and non-empty, every constraint must reference a
//! declared field, every rule must suit its field's type, and every pattern
//! must compile. Problems surface here as [`SchemaFault`]s, so a validation
//! pass never has to guess what a broken schema meant.

use crate::rules::{self, Check, CompiledRule};
use formcheck_core::{
    default_required_message, FieldRule, FieldSpec, FieldType, FormSchema, ListSchema, Result,
    SchemaFault, UniqueConstraint, ValidationOptions,
};
use regex::Regex;
use std::collections::HashSet;
use tracing::warn;

/// A checked, ready-to-evaluate schema.
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    name: String,
    options: ValidationOptions,
    lists: Vec<CompiledList>,
}

/// A checked list schema.
#[derive(Debug, Clone)]
pub struct CompiledList {
    name: String,
    fields: Vec<CompiledField>,
    unique: Vec<UniqueConstraint>,
}

/// A checked field with its pre-compiled rules.
#[derive(Debug, Clone)]
pub struct CompiledField {
    name: String,
    field_type: FieldType,
    required_message: Option<String>,
    rules: Vec<CompiledRule>,
}

impl CompiledSchema {
    /// Compiles a schema, failing on the first fault found.
    pub fn compile(schema: &FormSchema) -> Result<Self> {
        compile_collecting(schema).map_err(|mut faults| {
            let fault = faults.swap_remove(0);
            warn!(schema = %schema.name, %fault, "schema failed to compile");
            fault
        })
    }

    /// Returns every fault in a schema. An empty list means it compiles.
    pub fn check(schema: &FormSchema) -> Vec<SchemaFault> {
        compile_collecting(schema).err().unwrap_or_default()
    }

    /// Returns the schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the default options declared by the schema.
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Returns the compiled lists, in declaration order.
    pub fn lists(&self) -> &[CompiledList] {
        &self.lists
    }

    /// Gets a compiled list by name.
    pub fn list(&self, name: &str) -> Option<&CompiledList> {
        self.lists.iter().find(|l| l.name == name)
    }
}

impl CompiledList {
    /// Returns the list name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the compiled fields, in declaration order.
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    /// Returns the uniqueness constraints.
    pub fn unique_constraints(&self) -> &[UniqueConstraint] {
        &self.unique
    }
}

impl CompiledField {
    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the message reported when the field is required and absent.
    pub fn required_message(&self) -> Option<&str> {
        self.required_message.as_deref()
    }

    /// Returns true if the field is required.
    pub fn is_required(&self) -> bool {
        self.required_message.is_some()
    }

    pub(crate) fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }
}

fn compile_collecting(schema: &FormSchema) -> std::result::Result<CompiledSchema, Vec<SchemaFault>> {
    let mut faults = Vec::new();
    let mut seen = HashSet::new();
    let mut lists = Vec::with_capacity(schema.lists.len());

    for list in &schema.lists {
        if list.name.is_empty() {
            faults.push(SchemaFault::EmptyName {
                schema: schema.name.clone(),
                what: "list",
            });
        } else if !seen.insert(list.name.as_str()) {
            faults.push(SchemaFault::DuplicateList(list.name.clone()));
        }
        lists.push(compile_list(schema, list, &mut faults));
    }

    if faults.is_empty() {
        Ok(CompiledSchema {
            name: schema.name.clone(),
            options: schema.options.clone(),
            lists,
        })
    } else {
        Err(faults)
    }
}

fn compile_list(schema: &FormSchema, list: &ListSchema, faults: &mut Vec<SchemaFault>) -> CompiledList {
    if list.fields.is_empty() {
        faults.push(SchemaFault::EmptyList(list.name.clone()));
    }

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(list.fields.len());
    for field in &list.fields {
        if field.name.is_empty() {
            faults.push(SchemaFault::EmptyName {
                schema: schema.name.clone(),
                what: "field",
            });
        } else if !seen.insert(field.name.as_str()) {
            faults.push(SchemaFault::DuplicateField {
                list: list.name.clone(),
                field: field.name.clone(),
            });
        }
        fields.push(compile_field(&list.name, field, faults));
    }

    for constraint in &list.unique {
        if list.field(&constraint.field).is_none() {
            faults.push(SchemaFault::UnknownField {
                list: list.name.clone(),
                field: constraint.field.clone(),
            });
        }
    }

    CompiledList {
        name: list.name.clone(),
        fields,
        unique: list.unique.clone(),
    }
}

fn compile_field(list: &str, field: &FieldSpec, faults: &mut Vec<SchemaFault>) -> CompiledField {
    let name = field.name.as_str();
    let mut rules = Vec::with_capacity(field.rules.len());

    for rule in &field.rules {
        if (rule.is_string_rule() && field.field_type != FieldType::String)
            || (rule.is_numeric_rule() && !field.field_type.is_numeric())
        {
            faults.push(SchemaFault::not_applicable(
                list,
                name,
                rule.kind().as_str(),
                field.field_type.as_str(),
            ));
            continue;
        }

        let check = match rule {
            FieldRule::MinLength { min, .. } => Check::MinLength(*min),
            FieldRule::MaxLength { max, .. } => Check::MaxLength(*max),
            FieldRule::Pattern { regex, .. } => match Regex::new(regex) {
                Ok(re) => Check::Pattern(re),
                Err(e) => {
                    faults.push(SchemaFault::InvalidPattern {
                        list: list.to_string(),
                        field: name.to_string(),
                        pattern: regex.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            },
            FieldRule::OneOf { values, .. } => {
                if values.is_empty() {
                    faults.push(SchemaFault::EmptyOneOf {
                        list: list.to_string(),
                        field: name.to_string(),
                    });
                    continue;
                }
                let mut allowed = Vec::with_capacity(values.len());
                for value in values {
                    match rules::coerce(value, field.field_type) {
                        Some(coerced) if !value.is_absent() => allowed.push(coerced),
                        _ => faults.push(SchemaFault::invalid_bounds(
                            list,
                            name,
                            format!("one_of value '{value}' is not a valid {}", field.field_type),
                        )),
                    }
                }
                Check::OneOf(allowed)
            }
            FieldRule::Min { min, .. } => {
                if !min.is_finite() {
                    faults.push(SchemaFault::invalid_bounds(list, name, "min is not finite"));
                    continue;
                }
                Check::Min(*min)
            }
            FieldRule::Max { max, .. } => {
                if !max.is_finite() {
                    faults.push(SchemaFault::invalid_bounds(list, name, "max is not finite"));
                    continue;
                }
                Check::Max(*max)
            }
        };

        rules.push(CompiledRule {
            kind: rule.kind(),
            message: rule.message_for(name),
            check,
        });
    }

    check_bound_pairs(list, field, faults);

    CompiledField {
        name: field.name.clone(),
        field_type: field.field_type,
        required_message: field.required.is_required().then(|| {
            field
                .required
                .message()
                .map_or_else(|| default_required_message(name), str::to_string)
        }),
        rules,
    }
}

/// Lower bounds must not exceed upper bounds.
fn check_bound_pairs(list: &str, field: &FieldSpec, faults: &mut Vec<SchemaFault>) {
    let min_length = field.rules.iter().find_map(|r| match r {
        FieldRule::MinLength { min, .. } => Some(*min),
        _ => None,
    });
    let max_length = field.rules.iter().find_map(|r| match r {
        FieldRule::MaxLength { max, .. } => Some(*max),
        _ => None,
    });
    if let (Some(min), Some(max)) = (min_length, max_length) {
        if min > max {
            faults.push(SchemaFault::invalid_bounds(
                list,
                &field.name,
                format!("min_length {min} is greater than max_length {max}"),
            ));
        }
    }

    let min = field.rules.iter().find_map(|r| match r {
        FieldRule::Min { min, .. } => Some(*min),
        _ => None,
    });
    let max = field.rules.iter().find_map(|r| match r {
        FieldRule::Max { max, .. } => Some(*max),
        _ => None,
    });
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            faults.push(SchemaFault::invalid_bounds(
                list,
                &field.name,
                format!("min {min} is greater than max {max}"),
            ));
        }
    }
}
