//! Error types for validation requests.

use thiserror::Error;

/// Errors that can occur while talking to the validation endpoint.
#[derive(Debug, Error)]
pub enum ValidateError {
	/// The request could not be sent or the response body could not be read.
	#[error("validation transport error: {0}")]
	Transport(#[from] reqwest::Error),

	/// The endpoint answered with a non-success status.
	#[error("validation endpoint returned HTTP {status}")]
	Status {
		/// The HTTP status code.
		status: u16,
	},

	/// The response body was not a JSON document of the expected shape.
	#[error("malformed validation response: {0}")]
	Decode(#[from] serde_json::Error),
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
