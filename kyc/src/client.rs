use std::future::Future;

use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use crate::config::KycConfig;
use crate::error::Result;
use crate::loader::{PageLoader, RemoteSource, SampleData};
use crate::progress::{self, VerificationProgress};
use crate::rest::KycHttpClient;
use crate::review::ReviewDecision;
use crate::state::{Action, AppState};
use crate::types::{Entity, KycDetail, KycLevel, UserKycDetail, UserKycLevel};

/// Main KYC client: REST access plus the admin workflows built on it.
#[derive(Debug, Clone)]
pub struct KycClient {
    /// Validated configuration.
    pub config: KycConfig,
    /// HTTP client.
    pub http: KycHttpClient,
}

impl KycClient {
    pub fn new(config: KycConfig) -> Result<Self> {
        let http = KycHttpClient::new(&config)?;
        Ok(Self { config, http })
    }

    /// The enhanced paginated endpoint for `T`.
    pub fn remote<T: Entity>(&self) -> RemoteSource<T> {
        RemoteSource::new(self.http.clone())
    }

    /// Page loader for `T`, optionally backed by an offline dataset.
    pub fn page_loader<T: Entity>(
        &self,
        fallback: Option<SampleData<T>>,
    ) -> PageLoader<T, RemoteSource<T>> {
        PageLoader::new(self.remote(), fallback)
    }

    // ---- Reads ----

    pub async fn levels(&self) -> Result<Vec<KycLevel>> {
        self.http.list::<KycLevel>().await
    }

    /// Detail steps of one level, in sequence order.
    pub async fn details_for_level(&self, level_id: &str) -> Result<Vec<KycDetail>> {
        let mut details: Vec<KycDetail> = self
            .http
            .list_where(&[("level_id", level_id)])
            .await?;
        details.sort_by_key(|d| (d.sequence.is_none(), d.sequence));
        Ok(details)
    }

    pub async fn user_levels(&self, user_id: &str) -> Result<Vec<UserKycLevel>> {
        self.http.list_where(&[("user_id", user_id)]).await
    }

    /// Fetch the level catalogue and the user's submissions and combine them.
    pub async fn verification_progress(&self, user_id: &str) -> Result<VerificationProgress> {
        let (levels, submissions) =
            tokio::try_join!(self.levels(), self.user_levels(user_id))?;
        Ok(progress::compute(user_id, &levels, &submissions))
    }

    // ---- Mutations ----
    //
    // Every mutation requires an administrator session and reports its
    // outcome to `state` through the reducer.

    /// Approve or reject a user's level submission.
    pub async fn review_user_level(
        &self,
        state: &mut AppState,
        id: &str,
        decision: &ReviewDecision,
    ) -> Result<UserKycLevel> {
        let checked = state
            .require_admin()
            .and_then(|_| decision.to_update(Utc::now()));
        let update = record_failure(state, checked)?;
        mutate::<UserKycLevel, _>(state, id, self.http.update(id, &update)).await
    }

    /// Approve or reject a single submitted detail.
    pub async fn review_user_detail(
        &self,
        state: &mut AppState,
        id: &str,
        decision: &ReviewDecision,
    ) -> Result<UserKycDetail> {
        let checked = state
            .require_admin()
            .and_then(|_| decision.to_update(Utc::now()));
        let update = record_failure(state, checked)?;
        mutate::<UserKycDetail, _>(state, id, self.http.update(id, &update)).await
    }

    /// Persist a reordered list of details: one `PUT` per detail whose
    /// sequence differs from `before`. Returns how many were saved.
    pub async fn save_detail_sequence(
        &self,
        state: &mut AppState,
        before: &[KycDetail],
        after: &[KycDetail],
    ) -> Result<usize> {
        let checked = state.require_admin().map(|_| ());
        record_failure(state, checked)?;

        let changed: Vec<&KycDetail> = after
            .iter()
            .filter(|d| {
                before
                    .iter()
                    .find(|b| b.id == d.id)
                    .map_or(true, |b| b.sequence != d.sequence)
            })
            .filter(|d| d.sequence.is_some())
            .collect();

        for detail in &changed {
            let body = json!({ "sequence": detail.sequence });
            mutate::<KycDetail, _>(state, &detail.id, self.http.update(&detail.id, &body)).await?;
        }
        info!(count = changed.len(), "saved detail sequence");
        Ok(changed.len())
    }
}

/// Record a failed local check on `state` before handing it back.
fn record_failure<T>(state: &mut AppState, outcome: Result<T>) -> Result<T> {
    if let Err(e) = &outcome {
        state.apply(Action::OperationFailed(e.to_string()));
    }
    outcome
}

async fn mutate<T: Entity, F>(state: &mut AppState, id: &str, request: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    state.apply(Action::MutationStarted);
    match request.await {
        Ok(record) => {
            state.apply(Action::MutationSucceeded {
                entity: T::PATH,
                id: id.to_string(),
            });
            Ok(record)
        }
        Err(e) => {
            error!(entity = T::NAME, id, error = %e, "mutation failed");
            state.apply(Action::OperationFailed(e.to_string()));
            Err(e)
        }
    }
}
