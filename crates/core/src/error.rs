use thiserror::Error;

pub type TriageResult<T> = Result<T, TriageError>;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ads platform error: {0}")]
    Platform(String),

    #[error("Label store error: {0}")]
    Label(String),

    #[error("Report sink error: {0}")]
    Report(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
