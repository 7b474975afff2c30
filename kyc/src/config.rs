use std::time::Duration;

use url::Url;

use crate::error::{KycError, Result};

/// Default request timeout when `KYC_TIMEOUT_MS` is not set.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default API location, matching the local development backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Configuration for the KYC client.
#[derive(Debug, Clone)]
pub struct KycConfig {
    /// Base URL of the KYC REST API (e.g. `https://kyc.example.com/api`).
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl KycConfig {
    /// Build a config, checking that `api_url` is an absolute http(s) URL.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(api_url)
            .map_err(|e| KycError::Config(format!("invalid api url {api_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(KycError::Config(format!(
                "api url must be http or https, got {}",
                parsed.scheme()
            )));
        }
        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Read `KYC_API_URL` and `KYC_TIMEOUT_MS` from the environment, falling
    /// back to the defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("KYC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let timeout_ms = match std::env::var("KYC_TIMEOUT_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| KycError::Config(format!("KYC_TIMEOUT_MS={raw:?}: {e}")))?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };
        Self::new(&api_url, Duration::from_millis(timeout_ms))
    }
}

impl Default for KycConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let cfg = KycConfig::new("https://kyc.example.com/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(cfg.api_url, "https://kyc.example.com/api");
    }

    #[test]
    fn test_new_rejects_relative_url() {
        let err = KycConfig::new("/api", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, KycError::Config(_)));
    }

    #[test]
    fn test_new_rejects_non_http_scheme() {
        let err = KycConfig::new("ftp://kyc.example.com", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, KycError::Config(_)));
    }
}
