//! The closed vocabulary of diagnostic severities.

use strum::IntoEnumIterator;
use strum_macros::{EnumCount, EnumIter, EnumString, IntoStaticStr};

/// One kind of diagnostic a unit of work can raise.
///
/// Declaration order is the canonical vocabulary order; every kind owns a
/// distinct bit, and the union of all bits is [`SeverityKind::ALL_BITS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr, EnumCount)]
pub enum SeverityKind {
	#[strum(serialize = "E_ERROR")]
	Error,
	#[strum(serialize = "E_WARNING")]
	Warning,
	#[strum(serialize = "E_PARSE")]
	Parse,
	#[strum(serialize = "E_NOTICE")]
	Notice,
	#[strum(serialize = "E_CORE_ERROR")]
	CoreError,
	#[strum(serialize = "E_CORE_WARNING")]
	CoreWarning,
	#[strum(serialize = "E_COMPILE_ERROR")]
	CompileError,
	#[strum(serialize = "E_COMPILE_WARNING")]
	CompileWarning,
	#[strum(serialize = "E_USER_ERROR")]
	UserError,
	#[strum(serialize = "E_USER_WARNING")]
	UserWarning,
	#[strum(serialize = "E_USER_NOTICE")]
	UserNotice,
	#[strum(serialize = "E_STRICT")]
	Strict,
	#[strum(serialize = "E_RECOVERABLE_ERROR")]
	RecoverableError,
	#[strum(serialize = "E_DEPRECATED")]
	Deprecated,
	#[strum(serialize = "E_USER_DEPRECATED")]
	UserDeprecated,
}

impl SeverityKind {
	/// Union of every kind's bit.
	pub const ALL_BITS: i32 = 0x7fff;

	/// Name of the wildcard covering the whole vocabulary.
	pub const ALL_NAME: &'static str = "E_ALL";

	/// Returns the bit owned by this kind.
	pub const fn bit(self) -> i32 {
		match self {
			Self::Error => 1,
			Self::Warning => 1 << 1,
			Self::Parse => 1 << 2,
			Self::Notice => 1 << 3,
			Self::CoreError => 1 << 4,
			Self::CoreWarning => 1 << 5,
			Self::CompileError => 1 << 6,
			Self::CompileWarning => 1 << 7,
			Self::UserError => 1 << 8,
			Self::UserWarning => 1 << 9,
			Self::UserNotice => 1 << 10,
			Self::Strict => 1 << 11,
			Self::RecoverableError => 1 << 12,
			Self::Deprecated => 1 << 13,
			Self::UserDeprecated => 1 << 14,
		}
	}

	/// Returns the symbolic name, e.g. `E_USER_WARNING`.
	pub fn name(self) -> &'static str {
		self.into()
	}

	/// Looks up a kind by its symbolic name.
	pub fn from_name(name: &str) -> Option<Self> {
		name.parse().ok()
	}

	/// Looks up the kind owning exactly `bit`.
	pub fn from_bit(bit: i32) -> Option<Self> {
		Self::iter().find(|kind| kind.bit() == bit)
	}

	/// Iterates the vocabulary in declaration order.
	pub fn all() -> impl Iterator<Item = Self> {
		Self::iter()
	}

	/// Fatal kinds terminate the unit of work and are never intercepted.
	pub const fn is_fatal(self) -> bool {
		matches!(self, Self::Error | Self::Parse | Self::CoreError | Self::CompileError)
	}

	/// Kinds raised explicitly by user code rather than by the runtime.
	pub const fn is_user(self) -> bool {
		matches!(self, Self::UserError | Self::UserWarning | Self::UserNotice | Self::UserDeprecated)
	}
}

impl std::fmt::Display for SeverityKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
