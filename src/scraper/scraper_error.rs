use thiserror::Error;

/// Errors that abort a fetch session. Transient page failures are not errors,
/// see `PageFailure`.
#[derive(Debug, Error)]
pub enum ScraperError {
    /// HTTP client could not be constructed
    #[error("network client error: {0}")]
    Client(String),

    /// Endpoint URL could not be built from its parts
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),

    /// Response body does not have the envelope shape at all
    #[error("unexpected response shape on page {page}: {reason}")]
    Structural { page: u32, reason: String },

    /// Unsupported objective or offer kind
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
