use serde::Serialize;

use crate::error::{KycError, Result};
use crate::rest::KycHttpClient;
use crate::types::{Entity, PaginatedResponse, PaginationParams};

impl KycHttpClient {
    // --- CRUD ---

    /// GET /{entity} - Every record, unpaginated.
    pub async fn list<T: Entity>(&self) -> Result<Vec<T>> {
        self.get(&format!("/{}", T::PATH), &[]).await
    }

    /// GET /{entity}?key=value - Records scoped by a query parameter
    /// (e.g. `level_id` for details, `user_id` for user levels).
    pub async fn list_where<T: Entity>(&self, query: &[(&str, &str)]) -> Result<Vec<T>> {
        self.get(&format!("/{}", T::PATH), query).await
    }

    /// GET /{entity}/{id} - A single record. 404 becomes `NotFound`.
    pub async fn get_one<T: Entity>(&self, id: &str) -> Result<T> {
        self.get(&format!("/{}/{id}", T::PATH), &[])
            .await
            .map_err(|e| not_found::<T>(e, id))
    }

    /// POST /{entity} - Create a record.
    pub async fn create<T: Entity, B: Serialize + ?Sized>(&self, body: &B) -> Result<T> {
        self.post(&format!("/{}", T::PATH), body).await
    }

    /// PUT /{entity}/{id} - Update a record (full or partial body).
    pub async fn update<T: Entity, B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<T> {
        self.put(&format!("/{}/{id}", T::PATH), body)
            .await
            .map_err(|e| not_found::<T>(e, id))
    }

    /// DELETE /{entity}/{id} - Delete a record.
    pub async fn remove<T: Entity>(&self, id: &str) -> Result<()> {
        self.delete(&format!("/{}/{id}", T::PATH))
            .await
            .map_err(|e| not_found::<T>(e, id))
    }

    // --- Pagination ---

    /// GET /{entity}/paginated?page&page_size&fetch_all - Basic pagination.
    pub async fn paginated<T: Entity>(
        &self,
        page: u32,
        page_size: u32,
        fetch_all: bool,
    ) -> Result<PaginatedResponse<T>> {
        let page = page.to_string();
        let page_size = page_size.to_string();
        let fetch_all = fetch_all.to_string();
        self.get(
            &format!("/{}/paginated", T::PATH),
            &[
                ("page", page.as_str()),
                ("page_size", page_size.as_str()),
                ("fetch_all", fetch_all.as_str()),
            ],
        )
        .await
    }

    /// POST /{entity}/paginated/enhanced - Search, multi-field sort and
    /// structured filters in the request body.
    pub async fn paginated_enhanced<T: Entity>(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<T>> {
        params.validate()?;
        self.post(&format!("/{}/paginated/enhanced", T::PATH), params)
            .await
    }

    /// GET /{entity}/paginated/enhanced - Query-encoded variant: search and
    /// the first sort clause only.
    pub async fn paginated_enhanced_query<T: Entity>(
        &self,
        params: &PaginationParams,
    ) -> Result<PaginatedResponse<T>> {
        params.validate()?;
        let query = params.to_query();
        let query: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.get(&format!("/{}/paginated/enhanced", T::PATH), &query)
            .await
    }
}

fn not_found<T: Entity>(err: KycError, id: &str) -> KycError {
    match err {
        KycError::Http { status: 404, .. } => KycError::NotFound {
            entity: T::NAME,
            id: id.to_string(),
        },
        other => other,
    }
}
