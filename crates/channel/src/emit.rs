use muffle_severity::SeverityKind;

use crate::{Diagnostic, Fatal, Origin, hook, reporting};

/// What became of an emitted diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
	/// A hook took the event.
	Handled,
	/// The default handler logged it.
	Reported,
	/// The reporting setting excludes the kind and no hook took it.
	Ignored,
}

/// Raises a diagnostic from the caller's location.
///
/// # Panics
///
/// Fatal kinds (see [`SeverityKind::is_fatal`]) abort the current unit of
/// work with a [`Fatal`] payload.
#[track_caller]
pub fn emit(kind: SeverityKind, message: impl Into<String>) -> Handling {
	emit_at(kind, message, Some(Origin::caller()))
}

/// Raises a diagnostic with an explicit origin.
///
/// # Panics
///
/// Fatal kinds abort the current unit of work with a [`Fatal`] payload.
pub fn emit_at(kind: SeverityKind, message: impl Into<String>, origin: Option<Origin>) -> Handling {
	let diagnostic = Diagnostic {
		kind,
		message: message.into(),
		origin,
	};

	if kind.is_fatal() {
		tracing::error!(kind = kind.name(), message = %diagnostic.message, "fatal diagnostic");
		std::panic::panic_any(Fatal(diagnostic));
	}

	if hook::dispatch(&diagnostic) {
		return Handling::Handled;
	}
	if !reporting::reporting().includes(kind) {
		return Handling::Ignored;
	}
	report(&diagnostic);
	Handling::Reported
}

/// Default handler: logs through `tracing` at a level derived from the kind.
fn report(diagnostic: &Diagnostic) {
	let kind = diagnostic.kind.name();
	let message = diagnostic.message.as_str();
	let origin = diagnostic.origin.as_ref().map(ToString::to_string);
	let user = diagnostic.kind.is_user();
	match diagnostic.kind {
		SeverityKind::UserError | SeverityKind::RecoverableError => {
			tracing::error!(kind, user, origin, "{message}");
		}
		SeverityKind::Warning | SeverityKind::CoreWarning | SeverityKind::CompileWarning | SeverityKind::UserWarning => {
			tracing::warn!(kind, user, origin, "{message}");
		}
		SeverityKind::Notice | SeverityKind::UserNotice => tracing::info!(kind, user, origin, "{message}"),
		_ => tracing::debug!(kind, user, origin, "{message}"),
	}
}
