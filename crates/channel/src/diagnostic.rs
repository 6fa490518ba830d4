use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use muffle_severity::SeverityKind;

/// Source location a diagnostic was raised from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
	pub file: Cow<'static, str>,
	pub line: u32,
}

impl Origin {
	pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
		Self { file: file.into(), line }
	}

	/// Location of the caller, propagated through `#[track_caller]` frames.
	#[track_caller]
	pub fn caller() -> Self {
		Location::caller().into()
	}
}

impl From<&'static Location<'static>> for Origin {
	fn from(location: &'static Location<'static>) -> Self {
		Self::new(location.file(), location.line())
	}
}

impl fmt::Display for Origin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.file, self.line)
	}
}

/// One event raised on the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub kind: SeverityKind,
	pub message: String,
	pub origin: Option<Origin>,
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.kind, self.message)?;
		if let Some(origin) = &self.origin {
			write!(f, " at {origin}")?;
		}
		Ok(())
	}
}

/// Panic payload carried by a fatal diagnostic.
///
/// Fatal kinds bypass every hook; callers that need to observe them can
/// downcast the payload of a caught unwind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fatal(pub Diagnostic);

impl fmt::Display for Fatal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "fatal {}", self.0)
	}
}
