use std::fmt;

use muffle_channel::{Diagnostic, Origin};
use muffle_severity::SeverityKind;

/// One intercepted diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRecord {
	message: String,
	kind: SeverityKind,
	origin: Option<Origin>,
}

impl DiagnosticRecord {
	pub(crate) fn new(kind: SeverityKind, message: impl Into<String>, origin: Option<Origin>) -> Self {
		Self {
			message: message.into(),
			kind,
			origin,
		}
	}

	pub(crate) fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
		Self::new(diagnostic.kind, diagnostic.message.clone(), diagnostic.origin.clone())
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn kind(&self) -> SeverityKind {
		self.kind
	}

	pub fn origin(&self) -> Option<&Origin> {
		self.origin.as_ref()
	}

	pub fn file(&self) -> Option<&str> {
		self.origin.as_ref().map(|origin| origin.file.as_ref())
	}

	pub fn line(&self) -> Option<u32> {
		self.origin.as_ref().map(|origin| origin.line)
	}
}

impl fmt::Display for DiagnosticRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.kind, self.message)?;
		if let Some(origin) = &self.origin {
			write!(f, " at {origin}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use muffle_channel::{Diagnostic, Origin};
	use muffle_severity::SeverityKind;

	use super::DiagnosticRecord;

	#[test]
	fn copies_the_hooked_diagnostic() {
		let diagnostic = Diagnostic {
			kind: SeverityKind::UserNotice,
			message: "stale cache".to_owned(),
			origin: Some(Origin::new("src/cache.rs", 12)),
		};
		let record = DiagnosticRecord::from_diagnostic(&diagnostic);
		assert_eq!(record.kind(), SeverityKind::UserNotice);
		assert_eq!(record.message(), "stale cache");
		assert_eq!(record.file(), Some("src/cache.rs"));
		assert_eq!(record.line(), Some(12));
		assert_eq!(record.to_string(), "E_USER_NOTICE: stale cache at src/cache.rs:12");
	}
}
