//! Per-field rule evaluation.
//!
//! Each record is checked field by field, in declaration order:
//!
//! 1. An absent value (missing, null, or `""`) fails `required` if the field
//!    is required; no other rule runs on it.
//! 2. A present value is coerced to the declared type. A value that cannot be
//!    coerced fails with `type_mismatch`; no other rule runs on it.
//! 3. Every extra rule runs on the coerced value, and every failure is kept.
//!
//! Fields the schema does not declare are carried through untouched.

use crate::compiled::{CompiledField, CompiledList};
use formcheck_core::{
    type_mismatch_message, FieldPath, FieldType, FieldValue, IndexedRecord, Record, RuleKind,
    Violation,
};
use regex::Regex;

/// A rule with its message resolved and its pattern compiled.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) kind: RuleKind,
    pub(crate) message: String,
    pub(crate) check: Check,
}

#[derive(Debug, Clone)]
pub(crate) enum Check {
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    OneOf(Vec<FieldValue>),
    Min(f64),
    Max(f64),
}

impl Check {
    /// Returns true if the coerced value satisfies the check.
    fn passes(&self, value: &FieldValue) -> bool {
        match self {
            Check::MinLength(min) => value.as_str().is_some_and(|s| s.chars().count() >= *min),
            Check::MaxLength(max) => value.as_str().is_some_and(|s| s.chars().count() <= *max),
            Check::Pattern(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            Check::OneOf(allowed) => allowed.iter().any(|a| values_match(a, value)),
            Check::Min(min) => value.as_float().is_some_and(|v| v >= *min),
            Check::Max(max) => value.as_float().is_some_and(|v| v <= *max),
        }
    }
}

/// Numbers match by value regardless of integer/float representation.
fn values_match(a: &FieldValue, b: &FieldValue) -> bool {
    match (a, b) {
        (
            FieldValue::Int(_) | FieldValue::Float(_),
            FieldValue::Int(_) | FieldValue::Float(_),
        ) => a.as_float() == b.as_float(),
        _ => a == b,
    }
}

/// Coerces a present value to a field type.
///
/// Returns `None` if the value cannot represent the type. Form inputs arrive
/// as text, so numeric and boolean fields accept their string forms.
pub(crate) fn coerce(value: &FieldValue, field_type: FieldType) -> Option<FieldValue> {
    match field_type {
        FieldType::String => match value {
            FieldValue::Null => None,
            FieldValue::String(s) => Some(FieldValue::String(s.clone())),
            other => Some(FieldValue::String(other.to_string())),
        },
        FieldType::Integer => match value {
            FieldValue::Int(i) => Some(FieldValue::Int(*i)),
            FieldValue::Float(f) => float_to_int(*f).map(FieldValue::Int),
            FieldValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
                    .map(FieldValue::Int)
            }
            FieldValue::Null | FieldValue::Bool(_) => None,
        },
        FieldType::Number => match value {
            FieldValue::Int(i) => Some(FieldValue::Int(*i)),
            FieldValue::Float(f) => canonical_number(*f),
            FieldValue::String(s) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(i) => Some(FieldValue::Int(i)),
                    Err(_) => s.parse::<f64>().ok().and_then(canonical_number),
                }
            }
            _ => None,
        },
        FieldType::Boolean => match value {
            FieldValue::Bool(b) => Some(FieldValue::Bool(*b)),
            FieldValue::String(s) if s.trim().eq_ignore_ascii_case("true") => {
                Some(FieldValue::Bool(true))
            }
            FieldValue::String(s) if s.trim().eq_ignore_ascii_case("false") => {
                Some(FieldValue::Bool(false))
            }
            _ => None,
        },
    }
}

/// Integral floats become `Int`, so `7` and `7.0` are the same value.
fn canonical_number(f: f64) -> Option<FieldValue> {
    if !f.is_finite() {
        return None;
    }
    Some(float_to_int(f).map_or(FieldValue::Float(f), FieldValue::Int))
}

fn float_to_int(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
        .then_some(f as i64)
}

/// Evaluates every field rule on one record.
///
/// Pushes every violation onto `violations` and returns the record with its
/// declared fields coerced.
pub(crate) fn evaluate_record(
    list: &CompiledList,
    record: IndexedRecord<'_>,
    violations: &mut Vec<Violation>,
) -> Record {
    let mut coerced = record.record.clone();

    for field in list.fields() {
        let value = record.value(field.name());
        let path = || FieldPath::new(record.list, record.index, field.name());

        let Some(value) = value.filter(|v| !v.is_absent()) else {
            if let Some(message) = field.required_message() {
                violations.push(Violation::new(path(), RuleKind::Required, message));
            }
            continue;
        };

        let Some(value) = coerce(value, field.field_type()) else {
            violations.push(Violation::new(
                path(),
                RuleKind::TypeMismatch,
                type_mismatch_message(field.name(), field.field_type()),
            ));
            continue;
        };

        check_rules(field, &value, path, violations);
        coerced.insert(field.name(), value);
    }

    coerced
}

fn check_rules(
    field: &CompiledField,
    value: &FieldValue,
    path: impl Fn() -> FieldPath,
    violations: &mut Vec<Violation>,
) {
    for rule in field.rules() {
        if !rule.check.passes(value) {
            violations.push(Violation::new(path(), rule.kind, rule.message.clone()));
        }
    }
}
