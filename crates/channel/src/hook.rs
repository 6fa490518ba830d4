//! Per-thread hook stack.
//!
//! Only the innermost hook is consulted for an event. Installing a hook
//! shadows the previous one until the returned guard drops, which restores
//! it regardless of how the scope ends.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

use muffle_severity::SeverityMask;

use crate::Diagnostic;

/// Callback invoked for each diagnostic routed to it.
///
/// Returns `true` when the event was fully handled; `false` hands the event
/// to the default handler.
pub type Hook = Box<dyn FnMut(&Diagnostic) -> bool>;

struct Entry {
	id: u64,
	mask: SeverityMask,
	/// `None` while the hook is running.
	hook: Option<Hook>,
}

thread_local! {
	static HOOKS: RefCell<Vec<Entry>> = const { RefCell::new(Vec::new()) };
	static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Installs `hook` for events whose kind is in `mask`.
///
/// The hook stays active on this thread until the guard is dropped.
pub fn install<H>(mask: SeverityMask, hook: H) -> HookGuard
where
	H: FnMut(&Diagnostic) -> bool + 'static,
{
	let id = NEXT_ID.with(|next| {
		let id = next.get();
		next.set(id + 1);
		id
	});
	let depth = HOOKS.with_borrow_mut(|hooks| {
		hooks.push(Entry {
			id,
			mask,
			hook: Some(Box::new(hook)),
		});
		hooks.len()
	});
	tracing::trace!(hook = id, depth, %mask, "diagnostic hook installed");
	HookGuard {
		id,
		_not_send: PhantomData,
	}
}

/// Number of hooks installed on this thread.
pub fn hook_depth() -> usize {
	HOOKS.with_borrow(Vec::len)
}

/// Whether a hook would currently be offered an event of `kind`.
pub fn is_intercepted(kind: muffle_severity::SeverityKind) -> bool {
	HOOKS.with_borrow(|hooks| hooks.last().is_some_and(|entry| entry.hook.is_some() && entry.mask.includes(kind)))
}

/// Offers `diagnostic` to the innermost hook.
///
/// The hook is detached while it runs, so diagnostics it raises itself fall
/// through to the default handler instead of recursing.
pub(crate) fn dispatch(diagnostic: &Diagnostic) -> bool {
	let taken = HOOKS.with_borrow_mut(|hooks| {
		let entry = hooks.last_mut()?;
		if !entry.mask.includes(diagnostic.kind) {
			return None;
		}
		entry.hook.take().map(|hook| (entry.id, hook))
	});
	let Some((id, mut hook)) = taken else {
		return false;
	};

	let handled = hook(diagnostic);

	HOOKS.with_borrow_mut(|hooks| {
		if let Some(entry) = hooks.iter_mut().find(|entry| entry.id == id) {
			entry.hook = Some(hook);
		}
	});
	handled
}

/// Restores the previously installed hook when dropped.
#[must_use = "the hook is removed as soon as the guard is dropped"]
pub struct HookGuard {
	id: u64,
	_not_send: PhantomData<*const ()>,
}

impl HookGuard {
	pub fn id(&self) -> u64 {
		self.id
	}
}

impl std::fmt::Debug for HookGuard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HookGuard").field("id", &self.id).finish()
	}
}

impl Drop for HookGuard {
	fn drop(&mut self) {
		let id = self.id;
		let (depth, shadowed) = HOOKS.with_borrow_mut(|hooks| {
			let index = hooks.iter().rposition(|entry| entry.id == id);
			let shadowed = index.is_some_and(|index| index + 1 != hooks.len());
			if let Some(index) = index {
				hooks.remove(index);
			}
			(hooks.len(), shadowed)
		});
		if shadowed {
			tracing::warn!(hook = id, depth, "diagnostic hook released while shadowed by a newer hook");
		} else {
			tracing::trace!(hook = id, depth, "diagnostic hook removed");
		}
	}
}
