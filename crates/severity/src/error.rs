//! Error types for severity mask construction.

use thiserror::Error;

/// Errors raised while building or querying a [`SeverityMask`](crate::SeverityMask).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeverityError {
	/// The symbolic name is not part of the vocabulary.
	#[error("the name `{0}` is invalid or an unknown severity name")]
	InvalidSeverityName(String),

	/// The raw value lies outside `[-1, E_ALL]`.
	#[error("the value `{0}` is invalid as a severity level")]
	InvalidSeverityValue(i64),
}

/// Result type for severity operations.
pub type Result<T> = std::result::Result<T, SeverityError>;
