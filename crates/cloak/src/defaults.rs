//! Process-wide raise-by-default switch.
//!
//! Read only by interceptors whose policy is
//! [`Policy::FollowGlobalDefault`](crate::Policy::FollowGlobalDefault), and
//! only through a [`DefaultSource`] so tests can inject a fixed value.

use std::sync::atomic::{AtomicBool, Ordering};

static RAISE_BY_DEFAULT: AtomicBool = AtomicBool::new(false);

/// Makes every `FollowGlobalDefault` interceptor raise from now on.
pub fn enable_raise_by_default() {
	RAISE_BY_DEFAULT.store(true, Ordering::SeqCst);
	tracing::debug!("diagnostics raise by default");
}

/// Makes every `FollowGlobalDefault` interceptor collect silently from now on.
pub fn disable_raise_by_default() {
	RAISE_BY_DEFAULT.store(false, Ordering::SeqCst);
	tracing::debug!("diagnostics collected silently by default");
}

pub fn raise_by_default() -> bool {
	RAISE_BY_DEFAULT.load(Ordering::SeqCst)
}

/// Supplies the default consulted by `FollowGlobalDefault`.
pub trait DefaultSource {
	fn raise_by_default(&self) -> bool;
}

/// The process-wide switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalDefault;

impl DefaultSource for GlobalDefault {
	fn raise_by_default(&self) -> bool {
		raise_by_default()
	}
}

/// A fixed, injected default.
impl DefaultSource for bool {
	fn raise_by_default(&self) -> bool {
		*self
	}
}
