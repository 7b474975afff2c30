pub mod endpoints;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::KycConfig;
use crate::error::{KycError, Result};

/// HTTP client wrapper for the KYC REST API.
#[derive(Debug, Clone)]
pub struct KycHttpClient {
    client: Client,
    base_url: String,
}

impl KycHttpClient {
    pub fn new(config: &KycConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let req = self.client.get(self.url(path)).query(query);
        Self::send_json(req, "GET", path).await
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let req = self.client.post(self.url(path)).json(body);
        Self::send_json(req, "POST", path).await
    }

    /// PUT a JSON body and decode the JSON reply.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let req = self.client.put(self.url(path)).json(body);
        Self::send_json(req, "PUT", path).await
    }

    /// DELETE a resource, ignoring any reply body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let resp = self.client.delete(self.url(path)).send().await?;
        Self::check_status(resp).await?;
        debug!(method = "DELETE", path, "request ok");
        Ok(())
    }

    async fn send_json<T: DeserializeOwned>(
        req: RequestBuilder,
        method: &'static str,
        path: &str,
    ) -> Result<T> {
        let resp = Self::check_status(req.send().await?).await?;
        debug!(method, path, "request ok");
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn check_status(resp: Response) -> Result<Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(KycError::Http {
            status,
            message: body,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
