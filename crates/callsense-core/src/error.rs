use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No data available for this session")]
    SessionNotFound,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, CallError>;
