use std::cmp::Ordering;

use super::field::{FieldValue, Record};
use crate::types::{SortCondition, SortOrder};

/// Compare two records by each condition in turn.
///
/// A field a record does not have compares as `Null`.
pub fn compare_records<T: Record>(a: &T, b: &T, conditions: &[SortCondition]) -> Ordering {
    for cond in conditions {
        let left = a.field(&cond.field).unwrap_or(FieldValue::Null);
        let right = b.field(&cond.field).unwrap_or(FieldValue::Null);
        let ord = match cond.order {
            SortOrder::Asc => left.sort_cmp(&right),
            SortOrder::Desc => right.sort_cmp(&left),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Stable multi-field sort. Records with equal keys keep their input order.
pub fn sort_records<T: Record>(records: &mut [T], conditions: &[SortCondition]) {
    if conditions.is_empty() {
        return;
    }
    records.sort_by(|a, b| compare_records(a, b, conditions));
}

/// [`sort_records`] over borrowed records.
pub fn sort_refs<T: Record>(records: &mut [&T], conditions: &[SortCondition]) {
    if conditions.is_empty() {
        return;
    }
    records.sort_by(|a, b| compare_records(*a, *b, conditions));
}
