//! Main validation engine.
//!
//! This module provides the [`ValidationResolver`] that orchestrates a full
//! pass: per-field rules on every record, uniqueness constraints over every
//! list, and normalization of everything found into one error report.

use crate::{normalize_violations, rules, CompiledSchema, DuplicateDetector};
use formcheck_core::{
    FieldPath, FormData, FormResolver, FormSchema, IndexedRecord, RecordList, Result, RuleKind,
    SchemaFault, ValidationOptions, ValidationOutcome, ValidationResult, Violation,
};
use std::time::Instant;
use tracing::{debug, warn};

/// Validation engine for form data.
///
/// Holds a compiled schema and nothing else: every pass works on its own
/// locals, so one resolver can be shared across threads and concurrent passes.
///
/// # Example
///
/// ```rust
/// use formcheck_core::{
///     FieldBuilder, FormData, ListBuilder, Record, RecordList, RuleKind, SchemaBuilder,
///     ValidationOptions,
/// };
/// use formcheck_validator::ValidationResolver;
///
/// let schema = SchemaBuilder::new("people")
///     .list(
///         ListBuilder::new("test")
///             .field(FieldBuilder::new("firstName").required("form.required_message").build())
///             .unique("firstName")
///             .build(),
///     )
///     .build();
/// let resolver = ValidationResolver::new(&schema).expect("schema compiles");
///
/// let data = FormData::new().with_list(
///     "test",
///     RecordList::from_records(vec![
///         Record::new().with("firstName", "Alice"),
///         Record::new().with("firstName", "Alice"),
///     ]),
/// );
///
/// let outcome = resolver.validate(&data, &ValidationOptions::new()).expect("no schema fault");
/// let report = outcome.report().expect("duplicates are invalid");
/// assert_eq!(report.get("test", 1, "firstName").unwrap().kind, RuleKind::NotUnique);
/// ```
#[derive(Debug, Clone)]
pub struct ValidationResolver {
    schema: CompiledSchema,
}

impl ValidationResolver {
    /// Compiles `schema` and creates a resolver for it.
    pub fn new(schema: &FormSchema) -> Result<Self> {
        Ok(Self::from_compiled(CompiledSchema::compile(schema)?))
    }

    /// Creates a resolver from an already compiled schema.
    pub fn from_compiled(schema: CompiledSchema) -> Self {
        Self { schema }
    }

    /// Returns the compiled schema.
    pub fn schema(&self) -> &CompiledSchema {
        &self.schema
    }

    /// Validates a form snapshot.
    ///
    /// This is the main validation entry point. Every rule runs on every
    /// record and every uniqueness constraint on every list; nothing stops at
    /// the first failure.
    ///
    /// # Returns
    ///
    /// * `Ok(Valid(data))` with the coerced data when nothing failed
    /// * `Ok(Invalid(report))` with every violation when something failed
    /// * `Err(SchemaFault)` when the data carries a list the schema does not
    ///   declare, so its records cannot be addressed
    pub fn validate(&self, data: &FormData, options: &ValidationOptions) -> ValidationResult {
        let start = Instant::now();

        // 1. Every list in the snapshot must be addressable.
        if let Some(unknown) = data.list_names().find(|name| self.schema.list(name).is_none()) {
            warn!(list = unknown, "form data contains an undeclared list");
            return Err(SchemaFault::UnknownList(unknown.to_string()));
        }

        let mut violations = Vec::new();

        // 2. Per-field rules, producing the coerced snapshot.
        let mut coerced = FormData::new();
        for list in self.schema.lists() {
            let Some(records) = data.list(list.name()) else {
                continue;
            };
            let checked: RecordList = records
                .indexed(list.name())
                .map(|record| rules::evaluate_record(list, record, &mut violations))
                .collect();
            coerced.insert_list(list.name(), checked);
        }

        // 3. Cross-record constraints, over the coerced values.
        let detector = DuplicateDetector::with_policy(options.absent_values);
        for list in self.schema.lists() {
            let Some(records) = coerced.list(list.name()) else {
                continue;
            };
            let indexed: Vec<IndexedRecord<'_>> = records.indexed(list.name()).collect();
            for constraint in list.unique_constraints() {
                violations.extend(
                    detector
                        .find_duplicates(&indexed, &constraint.field)
                        .into_iter()
                        .map(|duplicate| {
                            Violation::new(
                                FieldPath::new(list.name(), duplicate.index, &constraint.field),
                                RuleKind::NotUnique,
                                constraint.message.clone(),
                            )
                        }),
                );
            }
        }

        debug!(
            schema = self.schema.name(),
            records = data.total_records(),
            violations = violations.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "validation pass finished"
        );

        // 4. Normalize, or hand back the coerced data untouched by errors.
        if violations.is_empty() {
            Ok(ValidationOutcome::Valid(coerced))
        } else {
            Ok(ValidationOutcome::Invalid(normalize_violations(
                violations,
                options.collect_all_criteria,
            )))
        }
    }
}

impl FormResolver for ValidationResolver {
    fn options(&self) -> &ValidationOptions {
        self.schema.options()
    }

    fn resolve_with(&self, data: &FormData, options: &ValidationOptions) -> ValidationResult {
        self.validate(data, options)
    }
}

/// Compiles `schema` and validates `data` against it in one call.
///
/// Prefer [`ValidationResolver`] when the same schema validates many
/// snapshots, so the schema is compiled once.
pub fn validate(
    data: &FormData,
    schema: &FormSchema,
    options: &ValidationOptions,
) -> ValidationResult {
    ValidationResolver::new(schema)?.validate(data, options)
}
