//! Client-side search → filter → sort → paginate pipeline.
//!
//! Produces the same [`PaginatedResponse`] shape as the enhanced paginated
//! endpoint so list pages render identically from either source.

pub mod field;
pub mod filter;
pub mod paginate;
pub mod sort;

pub use field::{FieldValue, Record};
pub use filter::filter_records;
pub use paginate::{page_count, paginate};
pub use sort::sort_records;

use crate::error::Result;
use crate::types::{PaginatedResponse, PaginationParams};

/// Run the full pipeline over an in-memory collection.
pub fn run_query<T: Record + Clone>(
    records: &[T],
    params: &PaginationParams,
) -> Result<PaginatedResponse<T>> {
    params.validate()?;

    let searched = records.iter().filter(|r| match params.search.as_deref() {
        Some(term) => r.matches_search(term),
        None => true,
    });
    let mut matched = filter_records(searched, &params.filters)?;
    sort::sort_refs(&mut matched, &params.sort_by);

    Ok(paginate(matched, params.page, params.page_size, params.fetch_all).map(T::clone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples;
    use crate::types::{FilterCondition, SortOrder};

    #[test]
    fn test_search_matches_any_search_field() {
        let users = samples::users();
        let params = PaginationParams::new(1, 100).with_search("garcia");
        let page = run_query(&users, &params).unwrap();
        assert!(!page.items.is_empty());
        assert!(page
            .items
            .iter()
            .all(|u| u.last_name.to_lowercase().contains("garcia")
                || u.email.to_lowercase().contains("garcia")));
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let users = samples::users();
        let params = PaginationParams::new(2, 5)
            .with_sort("status", SortOrder::Asc)
            .with_filter(FilterCondition::equals("role", "user"));
        let a = run_query(&users, &params).unwrap();
        let b = run_query(&users, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_count_reflects_filters_not_page() {
        let users = samples::users();
        let params =
            PaginationParams::new(1, 2).with_filter(FilterCondition::equals("country", "US"));
        let page = run_query(&users, &params).unwrap();
        let expected = users.iter().filter(|u| u.country == "US").count() as u64;
        assert_eq!(page.total_count, expected);
        assert!(page.items.len() <= 2);
    }

    #[test]
    fn test_rejects_zero_page() {
        let users = samples::users();
        assert!(run_query(&users, &PaginationParams::new(0, 10)).is_err());
    }
}
