//! Immutable severity bitmask and its algebra.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::{Result, SeverityError};
use crate::level::{Level, resolve_all};
use crate::SeverityKind;

bitflags! {
	/// Raw bit set over the severity vocabulary.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct SeverityFlags: i32 {
		const ERROR = SeverityKind::Error.bit();
		const WARNING = SeverityKind::Warning.bit();
		const PARSE = SeverityKind::Parse.bit();
		const NOTICE = SeverityKind::Notice.bit();
		const CORE_ERROR = SeverityKind::CoreError.bit();
		const CORE_WARNING = SeverityKind::CoreWarning.bit();
		const COMPILE_ERROR = SeverityKind::CompileError.bit();
		const COMPILE_WARNING = SeverityKind::CompileWarning.bit();
		const USER_ERROR = SeverityKind::UserError.bit();
		const USER_WARNING = SeverityKind::UserWarning.bit();
		const USER_NOTICE = SeverityKind::UserNotice.bit();
		const STRICT = SeverityKind::Strict.bit();
		const RECOVERABLE_ERROR = SeverityKind::RecoverableError.bit();
		const DEPRECATED = SeverityKind::Deprecated.bit();
		const USER_DEPRECATED = SeverityKind::UserDeprecated.bit();
	}
}

/// Raw value of the sentinel meaning every current and future kind.
pub const EVERY: i32 = -1;

/// Raw value of the mask holding the whole vocabulary.
pub const ALL: i32 = SeverityKind::ALL_BITS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Repr {
	Every,
	Kinds(SeverityFlags),
}

/// An immutable set of severity kinds.
///
/// Besides finite unions of the vocabulary, a mask may be the sentinel
/// [`SeverityMask::every`] (raw `-1`), which contains any level, including
/// kinds not yet part of the vocabulary. Every combinator returns a new mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeverityMask(Repr);

impl SeverityMask {
	/// Wraps a raw value.
	///
	/// # Errors
	///
	/// [`SeverityError::InvalidSeverityValue`] when `value` lies outside `[-1, E_ALL]`.
	pub fn from_value(value: i64) -> Result<Self> {
		match value {
			-1 => Ok(Self::every()),
			0..=0x7fff => Ok(Self(Repr::Kinds(SeverityFlags::from_bits_retain(value as i32)))),
			_ => Err(SeverityError::InvalidSeverityValue(value)),
		}
	}

	/// Looks up a mask by symbolic name, `E_ALL` included.
	///
	/// # Errors
	///
	/// [`SeverityError::InvalidSeverityName`] when the name is not in the vocabulary.
	pub fn from_name(name: &str) -> Result<Self> {
		if name == SeverityKind::ALL_NAME {
			return Ok(Self::all());
		}
		SeverityKind::from_name(name)
			.map(Self::of)
			.ok_or_else(|| SeverityError::InvalidSeverityName(name.to_owned()))
	}

	/// Mask holding a single kind.
	pub const fn of(kind: SeverityKind) -> Self {
		Self(Repr::Kinds(SeverityFlags::from_bits_retain(kind.bit())))
	}

	/// Wraps an already validated bit set.
	pub const fn from_flags(flags: SeverityFlags) -> Self {
		Self(Repr::Kinds(flags))
	}

	/// The `-1` sentinel: contains any level.
	pub const fn every() -> Self {
		Self(Repr::Every)
	}

	/// The whole vocabulary (`E_ALL`).
	pub const fn all() -> Self {
		Self(Repr::Kinds(SeverityFlags::all()))
	}

	/// The empty mask.
	pub const fn none() -> Self {
		Self(Repr::Kinds(SeverityFlags::empty()))
	}

	/// Bitwise OR of the given levels; no levels yields [`SeverityMask::none`].
	pub fn union<'a, I>(levels: I) -> Result<Self>
	where
		I: IntoIterator,
		I::Item: Into<Level<'a>>,
	{
		Self::none().with(levels)
	}

	/// `E_ALL` with each of the given levels cleared.
	pub fn from_exclusion<'a, I>(levels: I) -> Result<Self>
	where
		I: IntoIterator,
		I::Item: Into<Level<'a>>,
	{
		Self::all().without(levels)
	}

	/// Returns a new mask with the given levels added.
	pub fn with<'a, I>(self, levels: I) -> Result<Self>
	where
		I: IntoIterator,
		I::Item: Into<Level<'a>>,
	{
		Ok(resolve_all(levels)?.into_iter().fold(self, |acc, level| match (acc.0, level.0) {
			(Repr::Every, _) | (_, Repr::Every) => Self::every(),
			(Repr::Kinds(lhs), Repr::Kinds(rhs)) => Self::from_flags(lhs | rhs),
		}))
	}

	/// Returns a new mask with the given levels removed.
	///
	/// Removing [`SeverityMask::every`] leaves nothing; removing a finite set
	/// from the sentinel first narrows it to `E_ALL`.
	pub fn without<'a, I>(self, levels: I) -> Result<Self>
	where
		I: IntoIterator,
		I::Item: Into<Level<'a>>,
	{
		Ok(resolve_all(levels)?.into_iter().fold(self, |acc, level| match level.0 {
			Repr::Every => Self::none(),
			Repr::Kinds(rhs) => Self::from_flags(acc.flags() - rhs),
		}))
	}

	/// Returns true iff every given level lies entirely inside this mask.
	///
	/// An empty query is never satisfied. The sentinel contains everything;
	/// the empty mask contains nothing, and so does any finite mask when
	/// asked for the sentinel or for the empty mask.
	///
	/// # Errors
	///
	/// Propagates invalid names and raw values among `levels`.
	pub fn contains<'a, I>(&self, levels: I) -> Result<bool>
	where
		I: IntoIterator,
		I::Item: Into<Level<'a>>,
	{
		let levels = resolve_all(levels)?;
		if levels.is_empty() {
			return Ok(false);
		}
		Ok(match self.0 {
			Repr::Every => true,
			Repr::Kinds(flags) if flags.is_empty() => false,
			Repr::Kinds(flags) => levels.iter().all(|level| match level.0 {
				Repr::Every => false,
				Repr::Kinds(bits) => !bits.is_empty() && flags.contains(bits),
			}),
		})
	}

	/// Negation of [`SeverityMask::contains`].
	pub fn does_not_contain<'a, I>(&self, levels: I) -> Result<bool>
	where
		I: IntoIterator,
		I::Item: Into<Level<'a>>,
	{
		self.contains(levels).map(|contained| !contained)
	}

	/// Infallible single-kind membership test.
	pub fn includes(&self, kind: SeverityKind) -> bool {
		match self.0 {
			Repr::Every => true,
			Repr::Kinds(flags) => flags.contains(SeverityFlags::from_bits_retain(kind.bit())),
		}
	}

	/// Names whose bits intersect this mask, `E_ALL` first then vocabulary order.
	pub fn included_names(&self) -> Vec<&'static str> {
		named_bits().filter(|(_, bits)| bits & self.value() != 0).map(|(name, _)| name).collect()
	}

	/// Names whose bits are disjoint from this mask, `E_ALL` first then vocabulary order.
	pub fn excluded_names(&self) -> Vec<&'static str> {
		named_bits().filter(|(_, bits)| bits & self.value() == 0).map(|(name, _)| name).collect()
	}

	/// Vocabulary kinds held by this mask.
	pub fn kinds(&self) -> impl Iterator<Item = SeverityKind> + '_ {
		SeverityKind::all().filter(|kind| self.includes(*kind))
	}

	/// Raw value; `-1` for the sentinel.
	pub const fn value(&self) -> i32 {
		match self.0 {
			Repr::Every => EVERY,
			Repr::Kinds(flags) => flags.bits(),
		}
	}

	/// Finite bit set; the sentinel narrows to the whole vocabulary.
	pub const fn flags(&self) -> SeverityFlags {
		match self.0 {
			Repr::Every => SeverityFlags::all(),
			Repr::Kinds(flags) => flags,
		}
	}

	pub const fn is_every(&self) -> bool {
		matches!(self.0, Repr::Every)
	}

	pub const fn is_none(&self) -> bool {
		match self.0 {
			Repr::Every => false,
			Repr::Kinds(flags) => flags.is_empty(),
		}
	}
}

fn named_bits() -> impl Iterator<Item = (&'static str, i32)> {
	std::iter::once((SeverityKind::ALL_NAME, ALL)).chain(SeverityKind::all().map(|kind| (kind.name(), kind.bit())))
}

macro_rules! named_masks {
	($($fn_name:ident => $kind:ident),* $(,)?) => {
		impl SeverityMask {
			$(
				#[doc = concat!("Mask holding only `", stringify!($kind), "`.")]
				pub const fn $fn_name() -> Self {
					Self::of(SeverityKind::$kind)
				}
			)*
		}
	};
}

named_masks! {
	error => Error,
	warning => Warning,
	parse => Parse,
	notice => Notice,
	core_error => CoreError,
	core_warning => CoreWarning,
	compile_error => CompileError,
	compile_warning => CompileWarning,
	user_error => UserError,
	user_warning => UserWarning,
	user_notice => UserNotice,
	strict => Strict,
	recoverable_error => RecoverableError,
	deprecated => Deprecated,
	user_deprecated => UserDeprecated,
}

impl Default for SeverityMask {
	fn default() -> Self {
		Self::none()
	}
}

impl From<SeverityKind> for SeverityMask {
	fn from(kind: SeverityKind) -> Self {
		Self::of(kind)
	}
}

impl From<SeverityFlags> for SeverityMask {
	fn from(flags: SeverityFlags) -> Self {
		Self::from_flags(flags)
	}
}

impl FromIterator<SeverityKind> for SeverityMask {
	fn from_iter<I: IntoIterator<Item = SeverityKind>>(iter: I) -> Self {
		Self::from_flags(
			iter.into_iter()
				.fold(SeverityFlags::empty(), |acc, kind| acc | SeverityFlags::from_bits_retain(kind.bit())),
		)
	}
}

impl TryFrom<i64> for SeverityMask {
	type Error = SeverityError;

	fn try_from(value: i64) -> Result<Self> {
		Self::from_value(value)
	}
}

impl fmt::Debug for SeverityMask {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SeverityMask({self})")
	}
}

/// Renders `-1`, `0`, `E_ALL`, or the held names joined by ` | `.
impl fmt::Display for SeverityMask {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			Repr::Every => write!(f, "{EVERY}"),
			Repr::Kinds(flags) if flags.is_empty() => f.write_str("0"),
			Repr::Kinds(flags) if flags.is_all() => f.write_str(SeverityKind::ALL_NAME),
			Repr::Kinds(_) => {
				let mut names = self.kinds().map(SeverityKind::name);
				if let Some(first) = names.next() {
					f.write_str(first)?;
				}
				names.try_for_each(|name| write!(f, " | {name}"))
			}
		}
	}
}

/// Parses an integer, or names separated by `|`.
impl FromStr for SeverityMask {
	type Err = SeverityError;

	fn from_str(s: &str) -> Result<Self> {
		let s = s.trim();
		if let Ok(value) = s.parse::<i64>() {
			return Self::from_value(value);
		}
		Self::union(s.split('|').map(str::trim))
	}
}

#[cfg(feature = "serde")]
mod serde_impl {
	use std::fmt;

	use serde::de::{self, Visitor};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::SeverityMask;

	impl Serialize for SeverityMask {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			serializer.collect_str(self)
		}
	}

	struct MaskVisitor;

	impl Visitor<'_> for MaskVisitor {
		type Value = SeverityMask;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a severity name expression or an integer in [-1, E_ALL]")
		}

		fn visit_i64<E: de::Error>(self, v: i64) -> Result<SeverityMask, E> {
			SeverityMask::from_value(v).map_err(E::custom)
		}

		fn visit_u64<E: de::Error>(self, v: u64) -> Result<SeverityMask, E> {
			let v = i64::try_from(v).map_err(|_| E::custom(format!("the value `{v}` is invalid as a severity level")))?;
			self.visit_i64(v)
		}

		fn visit_str<E: de::Error>(self, v: &str) -> Result<SeverityMask, E> {
			v.parse().map_err(E::custom)
		}
	}

	impl<'de> Deserialize<'de> for SeverityMask {
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			deserializer.deserialize_any(MaskVisitor)
		}
	}
}
