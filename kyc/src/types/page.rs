use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KycError, Result};

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 5] = [5, 10, 20, 50, 100];

/// Page size used when a list page first opens.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCondition {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortCondition {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

/// Comparison applied by a [`FilterCondition`].
///
/// Operators travel as snake_case strings. A name this client does not know
/// is kept as `Unknown` so the engine can fail the query instead of the
/// deserializer silently dropping the condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    Unknown(String),
}

impl FilterOperator {
    pub fn as_str(&self) -> &str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "not_equals",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "starts_with",
            FilterOperator::EndsWith => "ends_with",
            FilterOperator::GreaterThan => "greater_than",
            FilterOperator::GreaterThanOrEqual => "greater_than_or_equal",
            FilterOperator::LessThan => "less_than",
            FilterOperator::LessThanOrEqual => "less_than_or_equal",
            FilterOperator::In => "in",
            FilterOperator::Unknown(name) => name,
        }
    }
}

impl From<String> for FilterOperator {
    fn from(s: String) -> Self {
        match s.as_str() {
            "equals" | "eq" => FilterOperator::Equals,
            "not_equals" | "ne" => FilterOperator::NotEquals,
            "contains" => FilterOperator::Contains,
            "starts_with" => FilterOperator::StartsWith,
            "ends_with" => FilterOperator::EndsWith,
            "greater_than" | "gt" => FilterOperator::GreaterThan,
            "greater_than_or_equal" | "gte" => FilterOperator::GreaterThanOrEqual,
            "less_than" | "lt" => FilterOperator::LessThan,
            "less_than_or_equal" | "lte" => FilterOperator::LessThanOrEqual,
            "in" => FilterOperator::In,
            _ => FilterOperator::Unknown(s),
        }
    }
}

impl From<FilterOperator> for String {
    fn from(op: FilterOperator) -> Self {
        op.as_str().to_string()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
    pub value: serde_json::Value,
}

impl FilterCondition {
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::new(field, FilterOperator::Equals, value)
    }
}

/// Request body of the enhanced paginated endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: u32,
    pub page_size: u32,
    #[serde(default)]
    pub fetch_all: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: Vec<SortCondition>,
    #[serde(default)]
    pub filters: Vec<FilterCondition>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            fetch_all: false,
            search: None,
            sort_by: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl PaginationParams {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by.push(SortCondition::new(field, order));
        self
    }

    pub fn with_filter(mut self, filter: FilterCondition) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn fetch_all(mut self) -> Self {
        self.fetch_all = true;
        self
    }

    /// Reject zero page numbers and page sizes before they reach the server
    /// or the local paginator.
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(KycError::Validation("page must be at least 1".into()));
        }
        if self.page_size == 0 {
            return Err(KycError::Validation("page_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Query string for `GET /{entity}/paginated/enhanced`. Only the first
    /// sort clause is representable; structured filters are not sent.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
            ("fetch_all", self.fetch_all.to_string()),
        ];
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(sort) = self.sort_by.first() {
            query.push(("sort_field", sort.field.clone()));
            query.push(("sort_order", sort.order.to_string()));
        }
        query
    }
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_serialize_snake_case() {
        let params = PaginationParams::new(2, 20)
            .with_search("alice")
            .with_sort("lastUpdated", SortOrder::Desc)
            .with_filter(FilterCondition::equals("status", "Approved"));
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["page"], 2);
        assert_eq!(json["page_size"], 20);
        assert_eq!(json["fetch_all"], false);
        assert_eq!(json["search"], "alice");
        assert_eq!(json["sort_by"][0]["order"], "desc");
        assert_eq!(json["filters"][0]["operator"], "equals");
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let params = PaginationParams::new(1, 10).with_search("   ");
        assert!(params.search.is_none());
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("search").is_none());
    }

    #[test]
    fn test_unknown_operator_is_preserved() {
        let cond: FilterCondition =
            serde_json::from_str(r#"{"field":"name","operator":"regex","value":"^a"}"#).unwrap();
        assert_eq!(cond.operator, FilterOperator::Unknown("regex".into()));
        assert_eq!(serde_json::to_value(&cond).unwrap()["operator"], "regex");
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(PaginationParams::new(0, 10).validate().is_err());
        assert!(PaginationParams::new(1, 0).validate().is_err());
        assert!(PaginationParams::new(1, 10).validate().is_ok());
    }

    #[test]
    fn test_to_query_uses_first_sort_only() {
        let params = PaginationParams::new(1, 5)
            .with_sort("name", SortOrder::Asc)
            .with_sort("id", SortOrder::Desc)
            .with_filter(FilterCondition::equals("status", "Approved"));
        let query = params.to_query();
        assert!(query.contains(&("sort_field", "name".to_string())));
        assert!(query.contains(&("sort_order", "asc".to_string())));
        assert!(!query.iter().any(|(k, _)| *k == "filters"));
        assert_eq!(query.iter().filter(|(k, _)| *k == "sort_field").count(), 1);
    }
}
