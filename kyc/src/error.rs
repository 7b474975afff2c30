use thiserror::Error;

#[derive(Error, Debug)]
pub enum KycError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("unsupported filter operator: {0}")]
    UnsupportedOperator(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl KycError {
    /// Whether the error came from reaching the backend: an unreachable
    /// host or a non-success status. Reads recover from these via sample
    /// data; mutations surface them. Undecodable bodies are `Json` errors.
    pub fn is_network(&self) -> bool {
        matches!(self, KycError::Http { .. } | KycError::Request(_))
    }
}

pub type Result<T> = std::result::Result<T, KycError>;
