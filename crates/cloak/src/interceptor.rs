//! Scoped interception of a unit of work.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use muffle_channel::{FromEnvironment, HookGuard};
use muffle_severity::{Level, SeverityKind, SeverityMask};

use crate::defaults::{DefaultSource, GlobalDefault};
use crate::error::{AggregateDiagnosticsError, CloakError, InterceptError};
use crate::{DiagnosticLog, DiagnosticRecord, Policy};

/// Wraps a unit of work so diagnostics it raises are captured and then
/// either kept on the log or raised, depending on the [`Policy`].
///
/// Each call clears the log, installs a hook on the ambient channel for the
/// duration of the work, and removes it before returning, including when the
/// work fails or unwinds. Events are captured only when their kind is both in
/// this interceptor's mask and in the thread's reporting setting at the time
/// they are raised.
///
/// The log is a per-interceptor scratch area; it keeps the records of the
/// most recent call until the next one starts.
pub struct Interceptor<F> {
	work: F,
	severity: SeverityMask,
	policy: Policy,
	defaults: Box<dyn DefaultSource>,
	log: Rc<RefCell<DiagnosticLog>>,
}

impl<F> Interceptor<F> {
	pub fn new(work: F, policy: Policy, severity: SeverityMask) -> Self {
		Self {
			work,
			severity,
			policy,
			defaults: Box::new(GlobalDefault),
			log: Rc::default(),
		}
	}

	/// Captures whatever the thread currently reports.
	pub fn from_environment(work: F, policy: Policy) -> Self {
		Self::new(work, policy, SeverityMask::from_environment())
	}

	/// Builds from a loosely-typed level: a mask, kind, name, or raw value.
	///
	/// # Errors
	///
	/// [`CloakError::Severity`] when the level is invalid.
	pub fn from_level<'a>(work: F, policy: Policy, level: impl Into<Level<'a>>) -> Result<Self, CloakError> {
		Ok(Self::new(work, policy, level.into().resolve()?))
	}

	/// Builds from a raw policy token (`0`, `1`, `2`).
	///
	/// # Errors
	///
	/// [`CloakError::InvalidPolicyValue`] for any other token.
	pub fn from_raw_policy(work: F, policy: i64, severity: SeverityMask) -> Result<Self, CloakError> {
		Ok(Self::new(work, Policy::try_from(policy)?, severity))
	}

	/// Replaces the source consulted by [`Policy::FollowGlobalDefault`].
	pub fn with_default_source(mut self, source: impl DefaultSource + 'static) -> Self {
		self.defaults = Box::new(source);
		self
	}

	/// Snapshot of the log of the most recent call.
	pub fn errors(&self) -> DiagnosticLog {
		self.log.borrow().clone()
	}

	pub fn severity(&self) -> SeverityMask {
		self.severity
	}

	pub fn policy(&self) -> Policy {
		self.policy
	}

	/// Whether `kind` would be captured, reporting setting permitting.
	pub fn includes(&self, kind: SeverityKind) -> bool {
		self.severity.includes(kind)
	}

	/// Whether a non-empty log currently turns into an error.
	pub fn errors_are_thrown(&self) -> bool {
		self.policy.raises(self.defaults.raise_by_default())
	}

	pub fn errors_are_silenced(&self) -> bool {
		!self.errors_are_thrown()
	}

	/// Runs infallible work.
	///
	/// # Errors
	///
	/// [`AggregateDiagnosticsError`] when diagnostics were captured and the
	/// policy raises; the work's result is dropped in that case.
	pub fn call<A, R>(&mut self, args: A) -> Result<R, AggregateDiagnosticsError>
	where
		F: FnMut(A) -> R,
	{
		let output = self.run(args);
		self.settle(output)
	}

	/// Runs fallible work. A failure of the work itself passes through as
	/// [`InterceptError::Work`] whatever the policy; records captured before it
	/// remain available from [`errors`](Self::errors).
	///
	/// # Errors
	///
	/// [`InterceptError::Work`] when the work fails, otherwise
	/// [`InterceptError::Diagnostics`] when the policy raises.
	pub fn try_call<A, T, E>(&mut self, args: A) -> Result<T, InterceptError<E>>
	where
		F: FnMut(A) -> Result<T, E>,
	{
		let value = self.run(args).map_err(InterceptError::Work)?;
		Ok(self.settle(value)?)
	}

	fn run<A, R>(&mut self, args: A) -> R
	where
		F: FnMut(A) -> R,
	{
		self.log.borrow_mut().clear();
		tracing::trace!(severity = %self.severity, policy = %self.policy, "interception started");
		let guard = self.install_hook();
		let output = (self.work)(args);
		drop(guard);
		tracing::trace!(captured = self.log.borrow().len(), "interception finished");
		output
	}

	fn install_hook(&self) -> HookGuard {
		let log = Rc::clone(&self.log);
		muffle_channel::install(self.severity, move |diagnostic| {
			if !muffle_channel::reporting().includes(diagnostic.kind) {
				return false;
			}
			log.borrow_mut().push_front(DiagnosticRecord::from_diagnostic(diagnostic));
			true
		})
	}

	fn settle<T>(&self, value: T) -> Result<T, AggregateDiagnosticsError> {
		let log = self.log.borrow();
		if log.is_empty() || self.errors_are_silenced() {
			return Ok(value);
		}
		tracing::debug!(count = log.len(), policy = %self.policy, "raising intercepted diagnostics");
		Err(AggregateDiagnosticsError::new(log.clone()))
	}
}

macro_rules! named_interceptors {
	($($fn_name:ident),* $(,)?) => {
		impl<F> Interceptor<F> {
			$(
				#[doc = concat!("Captures only what [`SeverityMask::", stringify!($fn_name), "`] holds.")]
				pub fn $fn_name(work: F, policy: Policy) -> Self {
					Self::new(work, policy, SeverityMask::$fn_name())
				}
			)*
		}
	};
}

named_interceptors! {
	all,
	error,
	warning,
	parse,
	notice,
	core_error,
	core_warning,
	compile_error,
	compile_warning,
	user_error,
	user_warning,
	user_notice,
	strict,
	recoverable_error,
	deprecated,
	user_deprecated,
}

impl<F> fmt::Debug for Interceptor<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Interceptor")
			.field("severity", &self.severity)
			.field("policy", &self.policy)
			.field("errors_are_thrown", &self.errors_are_thrown())
			.field("captured", &self.log.borrow().len())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests;
