//! Errors at the data boundary. Rating and layout never fail.

/// Result alias for decoding collaborator payloads.
pub type Result<T> = std::result::Result<T, DataError>;

/// Failure to turn a service payload into typed data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
	#[error("malformed payload: {0}")]
	Json(#[from] serde_json::Error),
}
