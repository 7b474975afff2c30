pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod loader;
pub mod progress;
pub mod query;
pub mod reorder;
pub mod rest;
pub mod review;
pub mod samples;
pub mod state;
pub mod types;
pub mod utils;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config + errors
pub use client::KycClient;
pub use config::KycConfig;
pub use error::{KycError, Result};

// REST client
pub use rest::KycHttpClient;

// Entities
pub use types::{
    CountryKycAssignment, Entity, EntityKind, KycDetail, KycLevel, Role, User, UserKycDetail,
    UserKycLevel,
};

// Status
pub use types::{KycStatus, StatusColor};

// Pagination contract
pub use types::{
    FilterCondition, FilterOperator, PaginatedResponse, PaginationParams, SortCondition,
    SortOrder, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS,
};

// Local query pipeline
pub use query::{run_query, FieldValue, Record};

// Loading + list pages
pub use controller::{ListController, ListEvent, ListState, PageRequest, StatusFilter};
pub use loader::{LoadedPage, PageLoader, PageOrigin, PageSource, RemoteSource, SampleData};

// Reordering
pub use reorder::{DragHandle, HandleAttributes, ReorderableList, Sequenced};

// App state, review, progress
pub use progress::VerificationProgress;
pub use review::ReviewDecision;
pub use state::{reduce, Action, AppState, Session};
pub use samples::Builtin;
