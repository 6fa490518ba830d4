//! Error types for interception.

use std::fmt;

use muffle_severity::SeverityError;
use thiserror::Error;

use crate::{DiagnosticLog, DiagnosticRecord};

/// Configuration errors, raised at construction time.
#[derive(Debug, Error)]
pub enum CloakError {
	/// The policy token is not one of the recognized values.
	#[error("the policy value `{0}` is invalid; expected follow-global-default, silent or raise")]
	InvalidPolicyValue(String),

	/// The severity specification is malformed.
	#[error(transparent)]
	Severity(#[from] SeverityError),

	/// The configuration document could not be parsed.
	#[error("invalid configuration: {0}")]
	Config(#[from] toml::de::Error),
}

/// Diagnostics a raising policy turned into an error.
///
/// Carries the full log of the interception, most recent record first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct AggregateDiagnosticsError {
	log: DiagnosticLog,
}

impl AggregateDiagnosticsError {
	pub(crate) fn new(log: DiagnosticLog) -> Self {
		debug_assert!(log.is_not_empty());
		Self { log }
	}

	pub fn len(&self) -> usize {
		self.log.len()
	}

	pub fn is_empty(&self) -> bool {
		self.log.is_empty()
	}

	/// Most recently captured record.
	pub fn first(&self) -> Option<&DiagnosticRecord> {
		self.log.first()
	}

	/// Earliest captured record.
	pub fn last(&self) -> Option<&DiagnosticRecord> {
		self.log.last()
	}

	pub fn iter(&self) -> impl Iterator<Item = &DiagnosticRecord> {
		self.log.iter()
	}

	pub fn log(&self) -> &DiagnosticLog {
		&self.log
	}

	pub fn into_log(self) -> DiagnosticLog {
		self.log
	}
}

impl fmt::Display for AggregateDiagnosticsError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (self.log.len(), self.log.first()) {
			(1, Some(record)) => write!(f, "{record}"),
			(count, Some(record)) => write!(f, "{count} diagnostics intercepted, latest {record}"),
			(_, None) => f.write_str("no diagnostics intercepted"),
		}
	}
}

impl<'a> IntoIterator for &'a AggregateDiagnosticsError {
	type Item = &'a DiagnosticRecord;
	type IntoIter = std::collections::vec_deque::Iter<'a, DiagnosticRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.log.iter()
	}
}

impl IntoIterator for AggregateDiagnosticsError {
	type Item = DiagnosticRecord;
	type IntoIter = std::collections::vec_deque::IntoIter<DiagnosticRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.log.into_iter()
	}
}

/// Outcome of intercepting fallible work.
#[derive(Debug, Error)]
pub enum InterceptError<E> {
	/// The policy raised the collected diagnostics.
	#[error(transparent)]
	Diagnostics(#[from] AggregateDiagnosticsError),

	/// The work failed on its own; passed through unchanged.
	#[error(transparent)]
	Work(E),
}

impl<E> InterceptError<E> {
	pub fn diagnostics(&self) -> Option<&AggregateDiagnosticsError> {
		match self {
			Self::Diagnostics(error) => Some(error),
			Self::Work(_) => None,
		}
	}

	pub fn into_work(self) -> Option<E> {
		match self {
			Self::Work(error) => Some(error),
			Self::Diagnostics(_) => None,
		}
	}
}
