//! Error report types.
//!
//! A validation pass that finds violations produces an [`ErrorReport`]: a
//! nested `list -> index -> field -> FieldError` mapping that mirrors the
//! shape of [`FormData`](crate::FormData), so presentation code can address an
//! entry the same way it addresses the field itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The rule that produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// A mandatory field is absent
    Required,
    /// A value collides with another record's value for the same field
    NotUnique,
    /// A value does not have the declared field type
    TypeMismatch,
    /// A string is shorter than allowed
    MinLength,
    /// A string is longer than allowed
    MaxLength,
    /// A string does not match a pattern
    Pattern,
    /// A value is not one of the allowed values
    OneOf,
    /// A number is below the minimum
    Min,
    /// A number is above the maximum
    Max,
}

impl RuleKind {
    /// Returns the tag used for this rule in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::NotUnique => "not_unique",
            RuleKind::TypeMismatch => "type_mismatch",
            RuleKind::MinLength => "min_length",
            RuleKind::MaxLength => "max_length",
            RuleKind::Pattern => "pattern",
            RuleKind::OneOf => "one_of",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The location of one field inside a form snapshot.
///
/// Displays as `list.index.field`, the dotted path form data libraries use.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    /// List name
    pub list: String,
    /// Zero-based record position
    pub index: usize,
    /// Field name
    pub field: String,
}

impl FieldPath {
    /// Creates a new field path.
    pub fn new(list: impl Into<String>, index: usize, field: impl Into<String>) -> Self {
        Self {
            list: list.into(),
            index,
            field: field.into(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.list, self.index, self.field)
    }
}

/// Error returned when a dotted path cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid field path '{0}': expected <list>.<index>.<field>")]
pub struct ParseFieldPathError(pub String);

impl FromStr for FieldPath {
    type Err = ParseFieldPathError;

    /// Parses `list.index.field`. The list name may itself contain dots; the
    /// last two segments are always the index and the field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseFieldPathError(s.to_string());
        let mut parts = s.rsplitn(3, '.');
        let field = parts.next().filter(|f| !f.is_empty()).ok_or_else(invalid)?;
        let index = parts
            .next()
            .and_then(|i| i.parse::<usize>().ok())
            .ok_or_else(invalid)?;
        let list = parts.next().filter(|l| !l.is_empty()).ok_or_else(invalid)?;
        Ok(FieldPath::new(list, index, field))
    }
}

/// One rule violation found during a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Where the violation occurred
    pub path: FieldPath,
    /// Which rule produced it
    pub kind: RuleKind,
    /// Human-readable message or message key
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(path: FieldPath, kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.path, self.message, self.kind)
    }
}

/// The report entry for one field path.
///
/// `message` and `kind` describe the first violation seen at the path.
/// `types` is only populated when all criteria are collected, and then holds
/// every `(kind -> messages)` pair observed at the path, the first included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Message of the first violation
    pub message: String,

    /// Rule of the first violation
    #[serde(rename = "type")]
    pub kind: RuleKind,

    /// All violations at this path, grouped by rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<BTreeMap<RuleKind, Vec<String>>>,
}

impl FieldError {
    /// Creates an entry from its first violation.
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            types: None,
        }
    }

    /// Appends a message under `kind` in the `types` collection.
    pub fn append(&mut self, kind: RuleKind, message: impl Into<String>) {
        self.types
            .get_or_insert_with(BTreeMap::new)
            .entry(kind)
            .or_default()
            .push(message.into());
    }

    /// Returns true if a violation of `kind` was recorded at this path.
    pub fn has(&self, kind: RuleKind) -> bool {
        self.kind == kind
            || self
                .types
                .as_ref()
                .is_some_and(|types| types.contains_key(&kind))
    }

    /// Returns the rule kinds recorded at this path.
    pub fn kinds(&self) -> Vec<RuleKind> {
        match &self.types {
            Some(types) => types.keys().copied().collect(),
            None => vec![self.kind],
        }
    }
}

type RecordErrors = BTreeMap<String, FieldError>;

/// Path-addressed violations from a single validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorReport {
    lists: BTreeMap<String, BTreeMap<usize, RecordErrors>>,
}

impl ErrorReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Returns the number of field paths with an entry.
    pub fn len(&self) -> usize {
        self.lists
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    /// Gets the entry for `list[index][field]`.
    pub fn get(&self, list: &str, index: usize, field: &str) -> Option<&FieldError> {
        self.lists.get(list)?.get(&index)?.get(field)
    }

    /// Gets the entry for a path.
    pub fn get_path(&self, path: &FieldPath) -> Option<&FieldError> {
        self.get(&path.list, path.index, &path.field)
    }

    /// Gets the entry for a path for mutation.
    pub fn get_path_mut(&mut self, path: &FieldPath) -> Option<&mut FieldError> {
        self.lists
            .get_mut(&path.list)?
            .get_mut(&path.index)?
            .get_mut(&path.field)
    }

    /// Returns true if the report has an entry for the path.
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.get_path(path).is_some()
    }

    /// Inserts or replaces the entry for a path.
    pub fn insert(&mut self, path: &FieldPath, error: FieldError) -> Option<FieldError> {
        self.lists
            .entry(path.list.clone())
            .or_default()
            .entry(path.index)
            .or_default()
            .insert(path.field.clone(), error)
    }

    /// Gets all entries for one record.
    pub fn record(&self, list: &str, index: usize) -> Option<&BTreeMap<String, FieldError>> {
        self.lists.get(list)?.get(&index)
    }

    /// Returns the positions within `list` that have at least one entry.
    pub fn indices(&self, list: &str) -> Vec<usize> {
        self.lists
            .get(list)
            .map(|records| records.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Iterates over every entry in path order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &FieldError)> {
        self.lists.iter().flat_map(|(list, records)| {
            records.iter().flat_map(move |(index, fields)| {
                fields
                    .iter()
                    .map(move |(field, error)| (FieldPath::new(list, *index, field), error))
            })
        })
    }

    /// Returns every path with an entry, in order.
    pub fn paths(&self) -> Vec<FieldPath> {
        self.iter().map(|(path, _)| path).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_path_display_and_parse() {
        let path = FieldPath::new("test", 3, "firstName");
        assert_eq!(path.to_string(), "test.3.firstName");
        assert_eq!("test.3.firstName".parse::<FieldPath>().unwrap(), path);
    }

    #[test]
    fn test_field_path_parse_dotted_list_name() {
        let path: FieldPath = "form.people.0.email".parse().unwrap();
        assert_eq!(path, FieldPath::new("form.people", 0, "email"));
    }

    #[test]
    fn test_field_path_parse_rejects_malformed() {
        assert!("test.x.firstName".parse::<FieldPath>().is_err());
        assert!("0.firstName".parse::<FieldPath>().is_err());
        assert!("test.0.".parse::<FieldPath>().is_err());
    }

    #[test]
    fn test_field_error_append_groups_by_kind() {
        let mut error = FieldError::new(RuleKind::Required, "required");
        error.append(RuleKind::Required, "required");
        error.append(RuleKind::NotUnique, "Duplicated");
        error.append(RuleKind::NotUnique, "Duplicated again");

        let types = error.types.as_ref().unwrap();
        assert_eq!(types[&RuleKind::Required], vec!["required"]);
        assert_eq!(
            types[&RuleKind::NotUnique],
            vec!["Duplicated", "Duplicated again"]
        );
        assert!(error.has(RuleKind::NotUnique));
        assert!(!error.has(RuleKind::Pattern));
    }

    #[test]
    fn test_report_nested_addressing() {
        let mut report = ErrorReport::new();
        report.insert(
            &FieldPath::new("test", 1, "firstName"),
            FieldError::new(RuleKind::NotUnique, "Duplicated"),
        );
        report.insert(
            &FieldPath::new("test", 0, "firstName"),
            FieldError::new(RuleKind::NotUnique, "Duplicated"),
        );

        assert_eq!(report.len(), 2);
        assert_eq!(report.indices("test"), vec![0, 1]);
        assert_eq!(
            report.get("test", 1, "firstName").unwrap().kind,
            RuleKind::NotUnique
        );
        assert!(report.get("test", 2, "firstName").is_none());
        assert!(report.get("other", 0, "firstName").is_none());

        let record = report.record("test", 0).unwrap();
        assert_eq!(record.keys().map(String::as_str).collect::<Vec<_>>(), vec!["firstName"]);
        assert!(report.record("test", 2).is_none());
    }

    #[test]
    fn test_report_serializes_as_nested_mapping() {
        let mut report = ErrorReport::new();
        report.insert(
            &FieldPath::new("test", 0, "firstName"),
            FieldError::new(RuleKind::Required, "form.required_message"),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "test": {
                    "0": {
                        "firstName": {
                            "message": "form.required_message",
                            "type": "required"
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_report_serializes_types_when_present() {
        let mut error = FieldError::new(RuleKind::Required, "form.required_message");
        error.append(RuleKind::Required, "form.required_message");
        error.append(RuleKind::NotUnique, "Duplicated");

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "form.required_message",
                "type": "required",
                "types": {
                    "required": ["form.required_message"],
                    "not_unique": ["Duplicated"]
                }
            })
        );
    }
}
