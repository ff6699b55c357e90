//! Error normalization.
//!
//! Turns the flat list of violations collected during a pass into an
//! [`ErrorReport`] keyed by field path.

use formcheck_core::{ErrorReport, FieldError, Violation};

/// Builds an error report from violations, in the order they were found.
///
/// The first violation at a path becomes the entry's `message` and `type`.
/// With `collect_all_criteria`, every violation at the path (the first one
/// included) is also grouped by rule under `types`; without it, later
/// violations at an already-recorded path are dropped.
pub fn normalize_violations(
    violations: impl IntoIterator<Item = Violation>,
    collect_all_criteria: bool,
) -> ErrorReport {
    let mut report = ErrorReport::new();

    for violation in violations {
        match report.get_path_mut(&violation.path) {
            Some(entry) => {
                if collect_all_criteria {
                    entry.append(violation.kind, violation.message);
                }
            }
            None => {
                let mut entry = FieldError::new(violation.kind, violation.message.clone());
                if collect_all_criteria {
                    entry.append(violation.kind, violation.message);
                }
                report.insert(&violation.path, entry);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::{FieldPath, RuleKind};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn required(index: usize) -> Violation {
        Violation::new(
            FieldPath::new("test", index, "firstName"),
            RuleKind::Required,
            "form.required_message",
        )
    }

    fn not_unique(index: usize) -> Violation {
        Violation::new(
            FieldPath::new("test", index, "firstName"),
            RuleKind::NotUnique,
            "Duplicated",
        )
    }

    #[test]
    fn test_empty_input_gives_empty_report() {
        let report = normalize_violations(Vec::<Violation>::new(), true);
        assert!(report.is_empty());
    }

    #[test]
    fn test_distinct_paths_each_get_an_entry() {
        let report = normalize_violations(vec![required(0), required(2)], false);
        assert_eq!(report.len(), 2);
        assert_eq!(report.indices("test"), vec![0, 2]);
        assert_eq!(report.get("test", 0, "firstName").unwrap().types, None);
    }

    #[test]
    fn test_first_violation_wins_without_collect_all() {
        let report = normalize_violations(vec![required(0), not_unique(0)], false);
        let entry = report.get("test", 0, "firstName").unwrap();
        assert_eq!(entry, &FieldError::new(RuleKind::Required, "form.required_message"));
    }

    #[test]
    fn test_collect_all_merges_under_types() {
        let report = normalize_violations(vec![required(0), not_unique(0)], true);
        let entry = report.get("test", 0, "firstName").unwrap();

        assert_eq!(entry.kind, RuleKind::Required);
        assert_eq!(entry.message, "form.required_message");

        let mut expected = BTreeMap::new();
        expected.insert(RuleKind::Required, vec!["form.required_message".to_string()]);
        expected.insert(RuleKind::NotUnique, vec!["Duplicated".to_string()]);
        assert_eq!(entry.types, Some(expected));
    }

    #[test]
    fn test_collect_all_keeps_repeated_kinds() {
        let second = Violation::new(
            FieldPath::new("test", 0, "firstName"),
            RuleKind::NotUnique,
            "Duplicated email",
        );
        let report = normalize_violations(vec![not_unique(0), second], true);
        let types = report.get("test", 0, "firstName").unwrap().types.clone().unwrap();
        assert_eq!(types[&RuleKind::NotUnique], vec!["Duplicated", "Duplicated email"]);
    }
}
