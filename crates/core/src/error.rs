//! Error types for remote session operations.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to the automation backend.
#[derive(Debug, Error)]
pub enum Error {
	/// The backend could not start a session. Never retried.
	#[error("failed to start session at {endpoint}: {reason}")]
	SessionStart { endpoint: String, reason: String },

	/// No element matched the locator.
	#[error("element not found: {locator}")]
	ElementNotFound { locator: String },

	/// An alert operation was issued while no alert was open.
	#[error("no alert is open")]
	NoSuchAlert,

	/// The session was already ended.
	#[error("session {0} is closed")]
	SessionClosed(String),

	/// Any other error reported by the backend.
	#[error("{error}: {message}")]
	Remote { error: String, message: String },

	/// The backend answered with something that is not a WebDriver response.
	#[error("protocol error: {0}")]
	Protocol(String),

	#[error("invalid server url: {0}")]
	InvalidUrl(#[from] url::ParseError),

	#[error("HTTP transport error: {0}")]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error("clipboard payload is not valid base64: {0}")]
	Base64(#[from] base64::DecodeError),

	#[error("clipboard payload is not valid UTF-8: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
	/// Returns the backend error code for [`Error::Remote`].
	pub fn remote_code(&self) -> Option<&str> {
		match self {
			Error::Remote { error, .. } => Some(error),
			_ => None,
		}
	}

	pub fn is_element_not_found(&self) -> bool {
		matches!(self, Error::ElementNotFound { .. })
	}
}
