//! Severity vocabulary and bitmask algebra shared by the diagnostic channel
//! and the interceptor.

/// Error types for mask construction.
pub mod error;
/// The closed severity vocabulary.
pub mod kind;
/// Level arguments accepted by the mask algebra.
pub mod level;
/// Immutable severity bitmask.
pub mod mask;

pub use error::SeverityError;
pub use kind::SeverityKind;
pub use level::Level;
pub use mask::{ALL, EVERY, SeverityFlags, SeverityMask};
