//! Error types shared by the graph core and the remote API client.

use thiserror::Error;

/// A remote value did not map onto a known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
	/// The `type` field named no known entity category.
	#[error("unknown entity category `{0}`")]
	UnknownCategory(String),
}

/// Failure talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request never produced a response.
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),

	/// Non-2xx response. `message` is the body's `detail` when present.
	#[error("{message} ({status})")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Human readable reason.
		message: String,
	},

	/// Body was not the JSON we expected.
	#[error("unexpected response: {0}")]
	Decode(#[from] serde_json::Error),

	/// Search result carried a category we cannot display.
	#[error(transparent)]
	Category(#[from] CategoryError),
}

impl ApiError {
	/// Message suitable for a user-facing notice.
	pub fn user_message(&self) -> String {
		match self {
			Self::Status { message, .. } => message.clone(),
			other => other.to_string(),
		}
	}
}
