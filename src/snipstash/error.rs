use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StashError {
    #[error("Snippet not found: {0}")]
    SnippetNotFound(Uuid),

    /// The vault already holds the maximum number of snippets.
    #[error("Snippet limit reached ({0} max)")]
    LimitExceeded(usize),

    /// The backing storage refused the write for lack of space.
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Bus error: {0}")]
    Bus(String),

    #[error("Timed out after {0}ms waiting for a reply")]
    Timeout(u64),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, StashError>;
