//! Generic list page controller.
//!
//! Holds the view state of one list page (paging, search, status filter,
//! sort) and turns state changes into page loads. Every change except an
//! explicit page move resets the page to 1.
//!
//! Loads are tagged with a monotonically increasing sequence number. A result
//! is applied only if it answers the most recent request, so when several
//! loads are in flight (rapid key presses in the console) the last request
//! wins regardless of which response arrives last.

use std::sync::Arc;

use tracing::{debug, error};

use crate::error::{KycError, Result};
use crate::loader::{LoadedPage, PageLoader, PageOrigin, PageSource};
use crate::types::{
    Entity, FilterCondition, KycStatus, PaginationParams, SortCondition, SortOrder,
    DEFAULT_PAGE_SIZE,
};

/// Status filter of a list page. `All` sends no status clause at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(KycStatus),
}

impl StatusFilter {
    /// Parse `all`, a status name or a code in `0..=5`. Unlike backend
    /// data, user input that names no status is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        let unknown = || KycError::Validation(format!("unknown status filter: {raw:?}"));
        if let Ok(code) = trimmed.parse::<i64>() {
            return usize::try_from(code)
                .ok()
                .and_then(|i| KycStatus::ALL.get(i))
                .map(|s| StatusFilter::Only(*s))
                .ok_or_else(unknown);
        }
        trimmed
            .parse::<KycStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| unknown())
    }

    /// Cycle All → NotSubmitted → ... → Rejected → All.
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(KycStatus::ALL[0]),
            StatusFilter::Only(current) => {
                let idx = KycStatus::ALL.iter().position(|s| *s == current).unwrap_or(0);
                KycStatus::ALL
                    .get(idx + 1)
                    .map_or(StatusFilter::All, |s| StatusFilter::Only(*s))
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(s) => s.label(),
        }
    }

    fn condition(self) -> Option<FilterCondition> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(s) => Some(FilterCondition::equals("status", s.as_str())),
        }
    }
}

/// A state change on a list page.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    SetSearch(String),
    SetStatusFilter(StatusFilter),
    SetSortField(String),
    ToggleSortOrder,
    SetPageSize(u32),
    SetPage(u32),
    Reload,
}

/// Rendered state of a list page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub status_filter: StatusFilter,
    pub sort_field: String,
    pub sort_order: SortOrder,
    pub loading: bool,
    pub items: Vec<T>,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
    /// Set when a load failed and no fallback could answer it.
    pub error: Option<String>,
    /// Source of the items currently shown.
    pub origin: Option<PageOrigin>,
}

impl<T> ListState<T> {
    fn new(sort_field: String) -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            status_filter: StatusFilter::All,
            sort_field,
            sort_order: SortOrder::Asc,
            loading: false,
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
            error: None,
            origin: None,
        }
    }
}

/// Ticket for one in-flight load.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub seq: u64,
    pub params: PaginationParams,
}

pub struct ListController<T, S> {
    loader: Arc<PageLoader<T, S>>,
    state: ListState<T>,
    /// Filters fixed for the lifetime of the page (e.g. `levelId` on a
    /// level's detail list), sent alongside the status filter.
    scope: Vec<FilterCondition>,
    latest_seq: u64,
}

impl<T: Entity, S: PageSource<T>> ListController<T, S> {
    pub fn new(loader: Arc<PageLoader<T, S>>, sort_field: impl Into<String>) -> Self {
        Self {
            loader,
            state: ListState::new(sort_field.into()),
            scope: Vec::new(),
            latest_seq: 0,
        }
    }

    /// Restrict every request from this page with an extra condition.
    pub fn with_scope(mut self, condition: FilterCondition) -> Self {
        self.scope.push(condition);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.state.page_size = page_size.max(1);
        self
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn loader(&self) -> Arc<PageLoader<T, S>> {
        Arc::clone(&self.loader)
    }

    /// Request parameters for the current state.
    pub fn params(&self) -> PaginationParams {
        let mut filters = self.scope.clone();
        filters.extend(self.state.status_filter.condition());

        let sort_by = if self.state.sort_field.is_empty() {
            Vec::new()
        } else {
            vec![SortCondition::new(
                self.state.sort_field.clone(),
                self.state.sort_order,
            )]
        };

        PaginationParams {
            page: self.state.page,
            page_size: self.state.page_size,
            fetch_all: false,
            search: Some(self.state.search.trim().to_string()).filter(|s| !s.is_empty()),
            sort_by,
            filters,
        }
    }

    /// Apply a state change and start a load. The caller runs the load (see
    /// [`Self::send`] or the console's task spawning) and hands the outcome
    /// to [`Self::complete`].
    pub fn dispatch(&mut self, event: ListEvent) -> PageRequest {
        let s = &mut self.state;
        match event {
            ListEvent::SetSearch(search) => {
                s.search = search;
                s.page = 1;
            }
            ListEvent::SetStatusFilter(filter) => {
                s.status_filter = filter;
                s.page = 1;
            }
            ListEvent::SetSortField(field) => {
                s.sort_field = field;
                s.page = 1;
            }
            ListEvent::ToggleSortOrder => {
                s.sort_order = s.sort_order.toggle();
                s.page = 1;
            }
            ListEvent::SetPageSize(size) => {
                s.page_size = size.max(1);
                s.page = 1;
            }
            ListEvent::SetPage(page) => {
                s.page = page.max(1);
            }
            ListEvent::Reload => {}
        }
        self.begin_reload()
    }

    /// Mark the page as loading and issue a new ticket.
    pub fn begin_reload(&mut self) -> PageRequest {
        self.latest_seq += 1;
        self.state.loading = true;
        PageRequest {
            seq: self.latest_seq,
            params: self.params(),
        }
    }

    /// Apply the outcome of a load. Returns `false` if the ticket is stale
    /// and the outcome was discarded.
    pub fn complete(&mut self, request: &PageRequest, outcome: Result<LoadedPage<T>>) -> bool {
        if request.seq != self.latest_seq {
            debug!(
                entity = T::NAME,
                seq = request.seq,
                latest = self.latest_seq,
                "discarding stale page"
            );
            return false;
        }

        let s = &mut self.state;
        s.loading = false;
        match outcome {
            Ok(LoadedPage { response, origin }) => {
                s.items = response.items;
                s.total_count = response.total_count;
                s.total_pages = response.total_pages;
                s.has_next = response.has_next;
                s.has_previous = response.has_previous;
                s.origin = Some(origin);
                s.error = None;
            }
            Err(err) => {
                error!(entity = T::NAME, error = %err, "failed to load page");
                s.error = Some(err.to_string());
            }
        }
        true
    }

    /// Apply a change, load, and apply the result.
    pub async fn send(&mut self, event: ListEvent) -> &ListState<T> {
        let request = self.dispatch(event);
        let outcome = self.loader.load_page(&request.params).await;
        self.complete(&request, outcome);
        &self.state
    }

    pub async fn reload(&mut self) -> &ListState<T> {
        self.send(ListEvent::Reload).await
    }

    pub async fn set_search(&mut self, search: impl Into<String>) -> &ListState<T> {
        self.send(ListEvent::SetSearch(search.into())).await
    }

    pub async fn set_status_filter(&mut self, filter: StatusFilter) -> &ListState<T> {
        self.send(ListEvent::SetStatusFilter(filter)).await
    }

    pub async fn set_sort_field(&mut self, field: impl Into<String>) -> &ListState<T> {
        self.send(ListEvent::SetSortField(field.into())).await
    }

    pub async fn toggle_sort_order(&mut self) -> &ListState<T> {
        self.send(ListEvent::ToggleSortOrder).await
    }

    pub async fn set_page_size(&mut self, page_size: u32) -> &ListState<T> {
        self.send(ListEvent::SetPageSize(page_size)).await
    }

    pub async fn set_page(&mut self, page: u32) -> &ListState<T> {
        self.send(ListEvent::SetPage(page)).await
    }

    // --- Navigation helpers (first / previous / next / last) ---

    pub fn first_page_event(&self) -> Option<ListEvent> {
        (self.state.page != 1).then_some(ListEvent::SetPage(1))
    }

    pub fn previous_page_event(&self) -> Option<ListEvent> {
        self.state
            .has_previous
            .then(|| ListEvent::SetPage(self.state.page - 1))
    }

    pub fn next_page_event(&self) -> Option<ListEvent> {
        self.state
            .has_next
            .then(|| ListEvent::SetPage(self.state.page + 1))
    }

    pub fn last_page_event(&self) -> Option<ListEvent> {
        let last = self.state.total_pages;
        (last > 0 && self.state.page != last).then_some(ListEvent::SetPage(last))
    }
}
