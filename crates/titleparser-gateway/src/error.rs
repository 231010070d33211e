use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures of the gateway itself, as opposed to failed resolutions, which
/// are reported inside the response record.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed query: {0}")]
    Json(#[from] serde_json::Error),
}
