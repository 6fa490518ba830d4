//! Loosely-typed level arguments accepted by the mask algebra.

use crate::error::Result;
use crate::{SeverityKind, SeverityMask};

/// A severity level as supplied by a caller: an existing mask, a single kind,
/// a symbolic name, or a raw value.
///
/// Names and raw values are validated when the level is resolved, so a bad
/// argument surfaces as an error from the operation consuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level<'a> {
	Mask(SeverityMask),
	Kind(SeverityKind),
	Name(&'a str),
	Value(i64),
}

impl Level<'_> {
	/// Resolves the level to a validated mask.
	pub fn resolve(self) -> Result<SeverityMask> {
		match self {
			Self::Mask(mask) => Ok(mask),
			Self::Kind(kind) => Ok(SeverityMask::from(kind)),
			Self::Name(name) => SeverityMask::from_name(name),
			Self::Value(value) => SeverityMask::from_value(value),
		}
	}
}

impl From<SeverityMask> for Level<'_> {
	fn from(mask: SeverityMask) -> Self {
		Self::Mask(mask)
	}
}

impl From<SeverityKind> for Level<'_> {
	fn from(kind: SeverityKind) -> Self {
		Self::Kind(kind)
	}
}

impl<'a> From<&'a str> for Level<'a> {
	fn from(name: &'a str) -> Self {
		Self::Name(name)
	}
}

impl<'a> From<&'a String> for Level<'a> {
	fn from(name: &'a String) -> Self {
		Self::Name(name.as_str())
	}
}

impl From<i32> for Level<'_> {
	fn from(value: i32) -> Self {
		Self::Value(i64::from(value))
	}
}

/// Resolves every level, failing on the first invalid one.
pub(crate) fn resolve_all<'a, I>(levels: I) -> Result<Vec<SeverityMask>>
where
	I: IntoIterator,
	I::Item: Into<Level<'a>>,
{
	levels.into_iter().map(|level| level.into().resolve()).collect()
}
