//! Scoped diagnostic interception.
//!
//! An [`Interceptor`] wraps a unit of work; diagnostics raised on the ambient
//! channel while the work runs are captured into a [`DiagnosticLog`] and, once
//! the work returns, either left there or raised as an
//! [`AggregateDiagnosticsError`] according to its [`Policy`].
//!
//! ```
//! use muffle_channel::emit;
//! use muffle_cloak::{Interceptor, Policy};
//! use muffle_severity::SeverityKind;
//!
//! let mut parse = Interceptor::warning(
//! 	|input: &str| {
//! 		if input.is_empty() {
//! 			emit(SeverityKind::Warning, "empty input");
//! 		}
//! 		input.len()
//! 	},
//! 	Policy::Silent,
//! );
//!
//! assert_eq!(parse.call("").unwrap(), 0);
//! assert_eq!(parse.errors().first().unwrap().message(), "empty input");
//! ```

/// TOML configuration.
pub mod config;
/// Process-wide raise-by-default switch.
pub mod defaults;
/// Error types.
pub mod error;
/// The interception engine.
pub mod interceptor;
/// Ordered log of captured records.
pub mod log;
/// Collect-or-raise policies.
pub mod policy;
/// Captured diagnostic records.
pub mod record;

pub use config::Config;
pub use defaults::{DefaultSource, GlobalDefault, disable_raise_by_default, enable_raise_by_default, raise_by_default};
pub use error::{AggregateDiagnosticsError, CloakError, InterceptError};
pub use interceptor::Interceptor;
pub use log::DiagnosticLog;
pub use policy::Policy;
pub use record::DiagnosticRecord;
