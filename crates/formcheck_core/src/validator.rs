//! Validation traits and types for form schemas.
//!
//! This module defines the options a validation pass runs with, the outcome
//! it produces, and the [`FormResolver`] trait that presentation layers hold
//! on to.

use crate::{ErrorReport, FormData, SchemaFault};
use serde::{Deserialize, Serialize};

/// Result type for validation passes.
///
/// `Err` is reserved for a broken schema; invalid user data is an
/// `Ok(ValidationOutcome::Invalid(..))`.
pub type ValidationResult = std::result::Result<ValidationOutcome, SchemaFault>;

/// How absent values (missing field, null, or `""`) take part in
/// uniqueness constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsentValuePolicy {
    /// Absent values are duplicates of each other
    #[default]
    Collide,
    /// Absent values never take part in uniqueness checks
    Exempt,
}

impl std::str::FromStr for AbsentValuePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "collide" => Ok(AbsentValuePolicy::Collide),
            "exempt" => Ok(AbsentValuePolicy::Exempt),
            other => Err(format!(
                "unknown absent value policy '{other}' (expected 'collide' or 'exempt')"
            )),
        }
    }
}

/// Options for a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Keep every violation at a field path, grouped by rule, instead of
    /// only the first one
    pub collect_all_criteria: bool,

    /// How absent values take part in uniqueness constraints
    pub absent_values: AbsentValuePolicy,
}

impl ValidationOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether all criteria are collected per field path.
    pub fn with_collect_all_criteria(mut self, collect_all: bool) -> Self {
        self.collect_all_criteria = collect_all;
        self
    }

    /// Sets the absent value policy.
    pub fn with_absent_values(mut self, policy: AbsentValuePolicy) -> Self {
        self.absent_values = policy;
        self
    }
}

/// The outcome of a validation pass over well-formed input.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// No violations; carries the coerced form data
    Valid(FormData),
    /// At least one violation; carries the full report
    Invalid(ErrorReport),
}

impl ValidationOutcome {
    /// Returns true if the pass found no violations.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    /// Returns the validated data, if the pass succeeded.
    pub fn values(&self) -> Option<&FormData> {
        match self {
            ValidationOutcome::Valid(data) => Some(data),
            ValidationOutcome::Invalid(_) => None,
        }
    }

    /// Returns the error report, if the pass failed.
    pub fn report(&self) -> Option<&ErrorReport> {
        match self {
            ValidationOutcome::Valid(_) => None,
            ValidationOutcome::Invalid(report) => Some(report),
        }
    }

    /// Returns the report for presentation state: empty on success.
    pub fn errors(&self) -> ErrorReport {
        self.report().cloned().unwrap_or_default()
    }

    /// Converts into a plain `Result`.
    pub fn into_result(self) -> Result<FormData, ErrorReport> {
        match self {
            ValidationOutcome::Valid(data) => Ok(data),
            ValidationOutcome::Invalid(report) => Err(report),
        }
    }
}

/// Core trait for resolving a form snapshot against a schema.
///
/// Implementations are stateless between calls, so one resolver can serve
/// concurrent passes.
///
/// # Example
///
/// ```rust
/// use formcheck_core::{FormData, FormResolver, ValidationOptions, ValidationOutcome, ValidationResult};
///
/// struct AcceptAll(ValidationOptions);
///
/// impl FormResolver for AcceptAll {
///     fn options(&self) -> &ValidationOptions {
///         &self.0
///     }
///
///     fn resolve_with(&self, data: &FormData, _options: &ValidationOptions) -> ValidationResult {
///         Ok(ValidationOutcome::Valid(data.clone()))
///     }
/// }
///
/// let resolver = AcceptAll(ValidationOptions::new());
/// assert!(resolver.resolve(&FormData::new()).unwrap().is_valid());
/// ```
pub trait FormResolver: Send + Sync {
    /// Default options for [`resolve`](Self::resolve).
    fn options(&self) -> &ValidationOptions;

    /// Runs one validation pass with explicit options.
    fn resolve_with(&self, data: &FormData, options: &ValidationOptions) -> ValidationResult;

    /// Runs one validation pass with the resolver's default options.
    fn resolve(&self, data: &FormData) -> ValidationResult {
        self.resolve_with(data, self.options())
    }
}
