use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Kyc(#[from] kyc::KycError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("{0}")]
    Usage(String),
}

impl ConsoleError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConsoleError::Usage(_) => 2,
            _ => 1,
        }
    }
}
