//! Per-thread reporting setting: which kinds are reported at all.

use std::cell::Cell;
use std::marker::PhantomData;

use muffle_severity::SeverityMask;

thread_local! {
	static REPORTING: Cell<SeverityMask> = const { Cell::new(SeverityMask::all()) };
}

/// Current reporting setting of this thread. Starts as `E_ALL`.
pub fn reporting() -> SeverityMask {
	REPORTING.get()
}

/// Replaces the reporting setting, returning the previous one.
pub fn set_reporting(mask: SeverityMask) -> SeverityMask {
	REPORTING.replace(mask)
}

/// Runs `f` with `mask` as reporting setting, restoring the previous setting
/// afterwards, also when `f` unwinds.
pub fn with_reporting<R>(mask: SeverityMask, f: impl FnOnce() -> R) -> R {
	let _guard = ReportingGuard::set(mask);
	f()
}

/// Runs `f` with reporting switched off.
///
/// Diagnostics raised inside are neither reported nor captured by interceptors
/// that honour the reporting setting.
pub fn silenced<R>(f: impl FnOnce() -> R) -> R {
	with_reporting(SeverityMask::none(), f)
}

/// Snapshot construction from the ambient reporting setting.
pub trait FromEnvironment {
	fn from_environment() -> Self;
}

impl FromEnvironment for SeverityMask {
	fn from_environment() -> Self {
		reporting()
	}
}

/// Restores the previous reporting setting on drop.
#[must_use = "the previous reporting setting is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ReportingGuard {
	previous: SeverityMask,
	_not_send: PhantomData<*const ()>,
}

impl ReportingGuard {
	pub fn set(mask: SeverityMask) -> Self {
		Self {
			previous: set_reporting(mask),
			_not_send: PhantomData,
		}
	}
}

impl Drop for ReportingGuard {
	fn drop(&mut self) {
		set_reporting(self.previous);
	}
}
