use std::cmp::Ordering;

use serde_json::Value;
use tracing::error;

use super::field::{FieldValue, Record};
use crate::error::{KycError, Result};
use crate::types::{FilterCondition, FilterOperator};

/// Keep the records for which every condition holds.
///
/// An operator this engine does not implement fails the whole query with
/// [`KycError::UnsupportedOperator`] before any record is examined, so a
/// misconfigured filter never returns an unfiltered page.
pub fn filter_records<'a, T: Record>(
    records: impl IntoIterator<Item = &'a T>,
    conditions: &[FilterCondition],
) -> Result<Vec<&'a T>> {
    check_operators(conditions)?;
    Ok(records
        .into_iter()
        .filter(|record| conditions.iter().all(|c| condition_holds(*record, c)))
        .collect())
}

/// Evaluate a single condition against a record.
pub fn matches<T: Record>(record: &T, condition: &FilterCondition) -> Result<bool> {
    check_operators(std::slice::from_ref(condition))?;
    Ok(condition_holds(record, condition))
}

fn check_operators(conditions: &[FilterCondition]) -> Result<()> {
    for c in conditions {
        if let FilterOperator::Unknown(name) = &c.operator {
            error!(field = %c.field, operator = %name, "unsupported filter operator");
            return Err(KycError::UnsupportedOperator(name.clone()));
        }
    }
    Ok(())
}

fn condition_holds<T: Record>(record: &T, condition: &FilterCondition) -> bool {
    let Some(actual) = record.field(&condition.field) else {
        return condition.operator == FilterOperator::NotEquals;
    };
    let value = &condition.value;

    match &condition.operator {
        FilterOperator::Equals => equals(&actual, value),
        FilterOperator::NotEquals => !equals(&actual, value),
        FilterOperator::Contains => text_test(&actual, value, |h, n| h.contains(n)),
        FilterOperator::StartsWith => text_test(&actual, value, |h, n| h.starts_with(n)),
        FilterOperator::EndsWith => text_test(&actual, value, |h, n| h.ends_with(n)),
        FilterOperator::GreaterThan => compare(&actual, value).is_some_and(Ordering::is_gt),
        FilterOperator::GreaterThanOrEqual => compare(&actual, value).is_some_and(Ordering::is_ge),
        FilterOperator::LessThan => compare(&actual, value).is_some_and(Ordering::is_lt),
        FilterOperator::LessThanOrEqual => compare(&actual, value).is_some_and(Ordering::is_le),
        FilterOperator::In => match value {
            Value::Array(candidates) => candidates.iter().any(|v| equals(&actual, v)),
            single => equals(&actual, single),
        },
        FilterOperator::Unknown(_) => false,
    }
}

fn equals(actual: &FieldValue, value: &Value) -> bool {
    actual.coerce(value).is_some_and(|expected| *actual == expected)
}

fn compare(actual: &FieldValue, value: &Value) -> Option<Ordering> {
    if actual.is_null() {
        return None;
    }
    match actual.coerce(value)? {
        FieldValue::Null => None,
        expected => Some(actual.cmp(&expected)),
    }
}

fn text_test(actual: &FieldValue, value: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
    let haystack = match actual {
        FieldValue::Text(s) => s.to_lowercase(),
        FieldValue::Status(s) => s.as_str().to_lowercase(),
        _ => return false,
    };
    let needle = match value {
        Value::String(s) => s.to_lowercase(),
        Value::Number(n) => n.to_string(),
        _ => return false,
    };
    test(&haystack, &needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use crate::types::{KycStatus, User};
    use serde_json::json;

    fn users() -> Vec<User> {
        samples::users()
    }

    fn level_ids(op: FilterOperator, value: Value) -> Vec<String> {
        let levels = samples::kyc_levels();
        let cond = FilterCondition::new("level", op, value);
        filter_records(&levels, &[cond])
            .unwrap()
            .into_iter()
            .map(|l| l.id.clone())
            .collect()
    }

    #[test]
    fn test_equals_on_status_normalises_codes() {
        let users = users();
        let by_name =
            filter_records(&users, &[FilterCondition::equals("status", "Approved")]).unwrap();
        let by_code = filter_records(&users, &[FilterCondition::equals("status", 4)]).unwrap();
        assert!(!by_name.is_empty());
        assert_eq!(by_name, by_code);
        assert!(by_name.iter().all(|u| u.status == KycStatus::Approved));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let users = users();
        let cond = FilterCondition::new("email", FilterOperator::Contains, "EXAMPLE.COM");
        let matched = filter_records(&users, &[cond]).unwrap();
        assert_eq!(matched.len(), users.len());
    }

    #[test]
    fn test_conditions_are_anded() {
        let users = users();
        let one = [FilterCondition::equals("country", "US")];
        let two = [
            FilterCondition::equals("country", "US"),
            FilterCondition::equals("status", "Approved"),
        ];
        let a = filter_records(&users, &one).unwrap().len();
        let b = filter_records(&users, &two).unwrap().len();
        assert!(b <= a);
        assert!(filter_records(&users, &two)
            .unwrap()
            .iter()
            .all(|u| u.country == "US" && u.status == KycStatus::Approved));
    }

    #[test]
    fn test_unknown_operator_fails_closed() {
        let users = users();
        let cond = FilterCondition::new("email", FilterOperator::Unknown("regex".into()), ".*");
        let err = filter_records(&users, &[cond]).unwrap_err();
        assert!(matches!(err, KycError::UnsupportedOperator(op) if op == "regex"));
    }

    #[test]
    fn test_date_comparison() {
        let users = users();
        let cond = FilterCondition::new("createdAt", FilterOperator::GreaterThan, "2024-06-01");
        let matched = filter_records(&users, &[cond]).unwrap();
        let cutoff = crate::query::field::parse_timestamp("2024-06-01").unwrap();
        assert!(matched.iter().all(|u| u.created_at.is_some_and(|t| t > cutoff)));
    }

    #[test]
    fn test_missing_field_matches_only_not_equals() {
        let users = users();
        let eq = FilterCondition::equals("nope", "x");
        let ne = FilterCondition::new("nope", FilterOperator::NotEquals, "x");
        assert!(filter_records(&users, &[eq]).unwrap().is_empty());
        assert_eq!(filter_records(&users, &[ne]).unwrap().len(), users.len());
    }

    #[test]
    fn test_in_operator() {
        let users = users();
        let cond = FilterCondition::new("country", FilterOperator::In, json!(["US", "DE"]));
        let matched = filter_records(&users, &[cond]).unwrap();
        assert!(matched.iter().all(|u| u.country == "US" || u.country == "DE"));
        assert!(!matched.is_empty());
    }

    #[test]
    fn test_nested_field_lookup() {
        let details = samples::kyc_details();
        let cond = FilterCondition::new("level.name", FilterOperator::Equals, "Basic");
        let matched = filter_records(&details, &[cond]).unwrap();
        assert!(!matched.is_empty());
        assert!(matched.iter().all(|d| d.level_id == "lvl-1"));
    }

    #[test]
    fn test_numeric_comparisons() {
        assert_eq!(level_ids(FilterOperator::GreaterThan, json!(2)), ["lvl-3", "lvl-4"]);
        assert_eq!(
            level_ids(FilterOperator::GreaterThanOrEqual, json!(2)),
            ["lvl-2", "lvl-3", "lvl-4"]
        );
        assert_eq!(level_ids(FilterOperator::LessThan, json!(2)), ["lvl-1"]);
        assert_eq!(level_ids(FilterOperator::LessThanOrEqual, json!("2")), ["lvl-1", "lvl-2"]);
        assert!(level_ids(FilterOperator::GreaterThan, json!("high")).is_empty());
    }

    #[test]
    fn test_starts_and_ends_with_ignore_case() {
        let details = samples::kyc_details();
        let starts = FilterCondition::new("name", FilterOperator::StartsWith, "GOV");
        let matched = filter_records(&details, &[starts]).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "det-5");

        let ends = FilterCondition::new("name", FilterOperator::EndsWith, "NUMBER");
        let matched = filter_records(&details, &[ends]).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "det-4");

        let users = users();
        let domain = FilterCondition::new("email", FilterOperator::EndsWith, "@Example.com");
        assert_eq!(filter_records(&users, &[domain]).unwrap().len(), users.len());
    }

    #[test]
    fn test_not_equals_on_status() {
        let users = users();
        let approved = users.iter().filter(|u| u.status == KycStatus::Approved).count();
        let cond = FilterCondition::new("status", FilterOperator::NotEquals, 4);
        let matched = filter_records(&users, &[cond]).unwrap();
        assert!(approved > 0);
        assert_eq!(matched.len(), users.len() - approved);
        assert!(matched.iter().all(|u| u.status != KycStatus::Approved));
    }
}
