//! Ambient diagnostic channel.
//!
//! Code raises non-fatal diagnostics with [`emit`]; the innermost hook
//! installed with [`install`] gets the first chance to handle them, and
//! whatever it declines is logged when the thread's [`reporting`] setting
//! includes the kind. Hooks and the reporting setting are per thread: one
//! execution context has at most one active hook, nested installs stack.

mod diagnostic;
mod emit;
pub mod hook;
pub mod reporting;

pub use diagnostic::{Diagnostic, Fatal, Origin};
pub use emit::{Handling, emit, emit_at};
pub use hook::{Hook, HookGuard, hook_depth, install, is_intercepted};
pub use reporting::{FromEnvironment, ReportingGuard, reporting, set_reporting, silenced, with_reporting};
