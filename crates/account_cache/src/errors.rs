use thiserror::Error;

/// Backend failure while loading an account snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("account source error: {0}")]
pub struct SourceError(pub String);

/// Request-level failures surfaced to fetch callers.
///
/// None of these are retried automatically; callers decide how to react.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("no account address provided")]
    MissingAddress,

    #[error("account cache is unavailable")]
    CacheUnavailable,

    #[error("no account found at {0}")]
    AccountNotFound(String),

    #[error("error while parsing account {address}: {message}")]
    Parse { address: String, message: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}
