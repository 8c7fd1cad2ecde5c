use thiserror::Error;

/// Errors returned by a [`super::StoreClient`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The write condition did not hold.
    #[error("Conditional check failed")]
    ConditionFailed,
    /// Transport or service-side failure.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// The store refused the request (throttling, validation, size limits).
    #[error("Request rejected: {0}")]
    Rejected(String),
}
