//! Cross-record duplicate detection.
//!
//! Finds every record of a list whose value for a field is shared with at
//! least one other record. Detection sorts a position-preserving copy of the
//! keys and scans adjacent pairs, so a pass is O(n log n) regardless of how
//! many duplicates there are.

use formcheck_core::{AbsentValuePolicy, FieldValue, IndexedRecord, Record, RecordList};
use tracing::trace;

/// A record that shares its key with at least one other record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplicate<'a> {
    /// Position of the record in its list
    pub index: usize,
    /// The record itself
    pub record: &'a Record,
}

/// Detects duplicate values of a field across a list of records.
///
/// Absent values (a missing field, null, or `""`) either form one shared key
/// and collide with each other ([`AbsentValuePolicy::Collide`]) or are left
/// out of detection entirely ([`AbsentValuePolicy::Exempt`]).
///
/// # Example
///
/// ```rust
/// use formcheck_core::{Record, RecordList};
/// use formcheck_validator::DuplicateDetector;
///
/// let list = RecordList::from_records(vec![
///     Record::new().with("firstName", "Alice"),
///     Record::new().with("firstName", "Bob"),
///     Record::new().with("firstName", "Alice"),
/// ]);
///
/// let duplicates = DuplicateDetector::new().find_in_list(&list, "firstName");
/// let mut indices: Vec<_> = duplicates.iter().map(|d| d.index).collect();
/// indices.sort();
/// assert_eq!(indices, vec![0, 2]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateDetector {
    policy: AbsentValuePolicy,
}

impl DuplicateDetector {
    /// Creates a detector where absent values collide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector with an explicit absent value policy.
    pub fn with_policy(policy: AbsentValuePolicy) -> Self {
        Self { policy }
    }

    /// Returns the absent value policy.
    pub fn policy(&self) -> AbsentValuePolicy {
        self.policy
    }

    /// Finds duplicates among annotated records.
    ///
    /// Each returned entry carries the position the record was annotated
    /// with, so results map straight back onto field paths. Entries come out
    /// grouped by key, in key order.
    pub fn find_duplicates<'a>(
        &self,
        records: &[IndexedRecord<'a>],
        field: &str,
    ) -> Vec<Duplicate<'a>> {
        self.detect(records.iter().map(|r| (r.index, r.record)), field)
    }

    /// Finds duplicates in a record list, using list positions.
    pub fn find_in_list<'a>(&self, list: &'a RecordList, field: &str) -> Vec<Duplicate<'a>> {
        self.detect(list.iter().enumerate(), field)
    }

    fn detect<'a>(
        &self,
        entries: impl Iterator<Item = (usize, &'a Record)>,
        field: &str,
    ) -> Vec<Duplicate<'a>> {
        let mut keyed: Vec<(Option<&'a FieldValue>, Duplicate<'a>)> = entries
            .map(|(index, record)| (duplicate_key(record.get(field)), Duplicate { index, record }))
            .filter(|(key, _)| key.is_some() || self.policy == AbsentValuePolicy::Collide)
            .collect();

        // Stable sort on a total order: equal keys always end up adjacent.
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut duplicates = Vec::new();
        let mut run_flagged = false;
        for pair in keyed.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            if current.0 == next.0 {
                if !run_flagged {
                    duplicates.push(current.1);
                    run_flagged = true;
                }
                duplicates.push(next.1);
            } else {
                run_flagged = false;
            }
        }

        trace!(
            field,
            candidates = keyed.len(),
            duplicates = duplicates.len(),
            "duplicate scan finished"
        );

        duplicates
    }
}

/// Absent values share the `None` key.
fn duplicate_key(value: Option<&FieldValue>) -> Option<&FieldValue> {
    value.filter(|v| !v.is_absent())
}
