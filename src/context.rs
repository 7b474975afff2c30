//! Shared command context: the API client plus the offline datasets.

use std::path::PathBuf;
use std::time::Duration;

use kyc::loader::PageSource;
use kyc::utils::find_by_id;
use kyc::{
    Builtin, KycClient, KycConfig, KycDetail, KycError, PageLoader, PaginatedResponse,
    PaginationParams, RemoteSource, SampleData,
};
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::error::ConsoleError;

/// Page source chosen at startup: the backend, or sample data only.
#[derive(Debug)]
pub enum Source<T> {
    Remote(RemoteSource<T>),
    Offline(SampleData<T>),
}

impl<T: Builtin> PageSource<T> for Source<T> {
    async fn fetch_page(&self, params: &PaginationParams) -> kyc::Result<PaginatedResponse<T>> {
        match self {
            Source::Remote(remote) => remote.fetch_page(params).await,
            Source::Offline(data) => data.query(params),
        }
    }
}

pub struct Context {
    pub client: KycClient,
    pub offline: bool,
    samples_dir: Option<PathBuf>,
}

impl Context {
    /// Build from `.env`/environment, then apply CLI overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConsoleError> {
        let _ = dotenvy::dotenv(); // load .env if present

        let mut config = KycConfig::from_env()?;
        if cli.api_url.is_some() || cli.timeout_ms.is_some() {
            let api_url = cli.api_url.as_deref().unwrap_or(&config.api_url);
            let timeout = cli
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(config.timeout);
            config = KycConfig::new(api_url, timeout)?;
        }
        debug!(api_url = %config.api_url, offline = cli.offline, "configured");

        Ok(Self {
            client: KycClient::new(config)?,
            offline: cli.offline,
            samples_dir: cli.samples.clone(),
        })
    }

    /// Sample records for `T`: `<samples>/<entity>.json` if a directory was
    /// given, the built-in set otherwise.
    pub fn dataset<T: Builtin>(&self) -> kyc::Result<SampleData<T>> {
        match &self.samples_dir {
            Some(dir) => SampleData::from_json_file(&dir.join(format!("{}.json", T::PATH))),
            None => Ok(SampleData::builtin()),
        }
    }

    /// Offline loaders need the dataset. Online, a dataset that cannot be
    /// read only costs the fallback.
    pub fn loader<T: Builtin>(&self) -> kyc::Result<PageLoader<T, Source<T>>> {
        if self.offline {
            return Ok(PageLoader::new(Source::Offline(self.dataset::<T>()?), None));
        }
        let fallback = match self.dataset::<T>() {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(entity = T::NAME, error = %e, "sample data unavailable, no fallback");
                None
            }
        };
        Ok(PageLoader::new(Source::Remote(self.client.remote()), fallback))
    }

    /// Every record of `T`, from the backend or, if it is unreachable, from
    /// sample data.
    pub async fn all<T: Builtin>(&self) -> kyc::Result<Vec<T>> {
        if !self.offline {
            match self.client.http.list::<T>().await {
                Ok(records) => return Ok(records),
                Err(e) if e.is_network() => {
                    warn!(entity = T::NAME, error = %e, "list failed, using sample data");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(self.dataset::<T>()?.records().to_vec())
    }

    /// One record by ID. A 404 from the backend is final; an unreachable
    /// backend falls back to sample data.
    pub async fn find<T: Builtin>(&self, id: &str) -> kyc::Result<T> {
        if !self.offline {
            match self.client.http.get_one::<T>(id).await {
                Ok(record) => return Ok(record),
                Err(e) if e.is_network() => {
                    warn!(entity = T::NAME, id, error = %e, "lookup failed, using sample data");
                }
                Err(e) => return Err(e),
            }
        }
        let data = self.dataset::<T>()?;
        find_by_id(data.records(), id).cloned()
    }

    /// Detail steps of a level in sequence order.
    pub async fn details_for_level(&self, level_id: &str) -> kyc::Result<Vec<KycDetail>> {
        if !self.offline {
            match self.client.details_for_level(level_id).await {
                Ok(details) => return Ok(details),
                Err(e) if e.is_network() => {
                    warn!(level_id, error = %e, "detail list failed, using sample data");
                }
                Err(e) => return Err(e),
            }
        }
        let mut details: Vec<KycDetail> = self
            .dataset::<KycDetail>()?
            .records()
            .iter()
            .filter(|d| d.level_id == level_id)
            .cloned()
            .collect();
        details.sort_by_key(|d| (d.sequence.is_none(), d.sequence));
        Ok(details)
    }

    /// Mutations need the backend.
    pub fn require_online(&self, what: &str) -> kyc::Result<()> {
        if self.offline {
            return Err(KycError::Validation(format!(
                "{what} cannot be saved in offline mode"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kyc::KycLevel;

    fn context(offline: bool, samples_dir: Option<PathBuf>) -> Context {
        Context {
            client: KycClient::new(KycConfig::default()).unwrap(),
            offline,
            samples_dir,
        }
    }

    fn missing_dir() -> PathBuf {
        std::env::temp_dir().join("kyc-console-no-such-samples")
    }

    #[test]
    fn test_online_loader_survives_missing_sample_file() {
        let loader = context(false, Some(missing_dir())).loader::<KycLevel>().unwrap();
        assert!(!loader.has_fallback());
    }

    #[test]
    fn test_offline_loader_needs_sample_file() {
        let err = context(true, Some(missing_dir())).loader::<KycLevel>().unwrap_err();
        assert!(matches!(err, KycError::Io(_)));
    }

    #[test]
    fn test_online_loader_keeps_builtin_fallback() {
        let loader = context(false, None).loader::<KycLevel>().unwrap();
        assert!(loader.has_fallback());
    }

    #[test]
    fn test_offline_mutations_are_refused() {
        assert!(context(true, None).require_online("reviews").is_err());
        assert!(context(false, None).require_online("reviews").is_ok());
    }
}
