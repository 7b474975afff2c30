//! `load_page`: ask the backend for a page, fall back to sample data.

use std::future::Future;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::query::run_query;
use crate::rest::KycHttpClient;
use crate::types::{Entity, PaginatedResponse, PaginationParams};

/// Anything that can answer an enhanced pagination request.
pub trait PageSource<T>: Send + Sync {
    fn fetch_page(
        &self,
        params: &PaginationParams,
    ) -> impl Future<Output = Result<PaginatedResponse<T>>> + Send;
}

/// Where a page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage<T> {
    pub response: PaginatedResponse<T>,
    pub origin: PageOrigin,
}

/// The enhanced paginated endpoint for entity `T`.
#[derive(Debug)]
pub struct RemoteSource<T> {
    http: KycHttpClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T> RemoteSource<T> {
    pub fn new(http: KycHttpClient) -> Self {
        Self {
            http,
            _entity: PhantomData,
        }
    }
}

impl<T> Clone for RemoteSource<T> {
    fn clone(&self) -> Self {
        Self::new(self.http.clone())
    }
}

impl<T: Entity> PageSource<T> for RemoteSource<T> {
    async fn fetch_page(&self, params: &PaginationParams) -> Result<PaginatedResponse<T>> {
        self.http.paginated_enhanced(params).await
    }
}

/// Injectable offline dataset, queried with the local pipeline.
#[derive(Debug)]
pub struct SampleData<T> {
    records: Arc<[T]>,
}

impl<T> Clone for SampleData<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Entity> SampleData<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Load records from a JSON array file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<T> = serde_json::from_str(&raw)?;
        debug!(path = %path.display(), count = records.len(), entity = T::NAME, "loaded sample data");
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Search, filter, sort and slice the dataset.
    pub fn query(&self, params: &PaginationParams) -> Result<PaginatedResponse<T>> {
        run_query(&self.records, params)
    }
}

impl<T: Entity> PageSource<T> for SampleData<T> {
    async fn fetch_page(&self, params: &PaginationParams) -> Result<PaginatedResponse<T>> {
        self.query(params)
    }
}

/// Remote-first page loader with an optional sample-data fallback.
#[derive(Debug, Clone)]
pub struct PageLoader<T, S> {
    remote: S,
    fallback: Option<SampleData<T>>,
}

impl<T: Entity, S: PageSource<T>> PageLoader<T, S> {
    pub fn new(remote: S, fallback: Option<SampleData<T>>) -> Self {
        Self { remote, fallback }
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Fetch a page from the remote source. If the backend is unreachable or
    /// answers with an error status and a dataset is configured, answer from
    /// the dataset instead; the failure is only logged. Other errors (an
    /// undecodable body, say) and failures without a dataset are returned.
    pub async fn load_page(&self, params: &PaginationParams) -> Result<LoadedPage<T>> {
        params.validate()?;
        match self.remote.fetch_page(params).await {
            Ok(response) => Ok(LoadedPage {
                response,
                origin: PageOrigin::Remote,
            }),
            Err(err) => match &self.fallback {
                Some(data) if err.is_network() => {
                    warn!(entity = T::NAME, error = %err, "remote page failed, using sample data");
                    Ok(LoadedPage {
                        response: data.query(params)?,
                        origin: PageOrigin::Fallback,
                    })
                }
                _ => Err(err),
            },
        }
    }
}
