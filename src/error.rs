use thiserror::Error;

/// Errors raised by the fetch collaborator and the table transform.
///
/// The two fatal transform-side conditions are `Configuration` (no app id,
/// raised at construction before any fetch) and `Schema` (metadata missing a
/// classification group, raised before any row processing). Everything else
/// wraps a fetch-side failure. Missing or duplicate observation values and
/// incomplete rows are never errors; the transform drops or overwrites them
/// silently.
#[derive(Debug, Error)]
pub enum EstatError {
    /// No usable application id was supplied.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The response metadata is structurally invalid.
    #[error("schema error: {0}")]
    Schema(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EstatError>;
