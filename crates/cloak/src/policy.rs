use std::fmt;
use std::str::FromStr;

use crate::CloakError;

/// What an interceptor does with a non-empty log once the work returns.
///
/// Serialized as its kebab-case name; deserialized from any raw token
/// accepted by [`FromStr`] or [`TryFrom<i64>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
	/// Defer to the process-wide default.
	#[default]
	FollowGlobalDefault,
	/// Return the work's result; diagnostics stay on the log.
	Silent,
	/// Turn the log into an [`AggregateDiagnosticsError`](crate::AggregateDiagnosticsError).
	Raise,
}

impl Policy {
	/// Whether a non-empty log raises, given the current default.
	pub const fn raises(self, raise_by_default: bool) -> bool {
		match self {
			Self::Raise => true,
			Self::Silent => false,
			Self::FollowGlobalDefault => raise_by_default,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::FollowGlobalDefault => "follow-global-default",
			Self::Silent => "silent",
			Self::Raise => "raise",
		}
	}
}

impl fmt::Display for Policy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Raw tokens: `0` follow the default, `1` silent, `2` raise.
impl TryFrom<i64> for Policy {
	type Error = CloakError;

	fn try_from(value: i64) -> Result<Self, CloakError> {
		match value {
			0 => Ok(Self::FollowGlobalDefault),
			1 => Ok(Self::Silent),
			2 => Ok(Self::Raise),
			_ => Err(CloakError::InvalidPolicyValue(value.to_string())),
		}
	}
}

impl FromStr for Policy {
	type Err = CloakError;

	fn from_str(s: &str) -> Result<Self, CloakError> {
		match s.trim() {
			"follow-global-default" | "obey" => Ok(Self::FollowGlobalDefault),
			"silent" => Ok(Self::Silent),
			"raise" | "throw" => Ok(Self::Raise),
			other => other
				.parse::<i64>()
				.map_err(|_| CloakError::InvalidPolicyValue(other.to_owned()))
				.and_then(Self::try_from),
		}
	}
}

mod serde_impl {
	use std::fmt;

	use serde::de::{self, Visitor};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::Policy;

	impl Serialize for Policy {
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
			serializer.serialize_str(self.as_str())
		}
	}

	struct PolicyVisitor;

	impl Visitor<'_> for PolicyVisitor {
		type Value = Policy;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a policy name or one of the integers 0, 1, 2")
		}

		fn visit_i64<E: de::Error>(self, v: i64) -> Result<Policy, E> {
			Policy::try_from(v).map_err(E::custom)
		}

		fn visit_u64<E: de::Error>(self, v: u64) -> Result<Policy, E> {
			let v = i64::try_from(v).map_err(|_| E::custom(crate::CloakError::InvalidPolicyValue(v.to_string())))?;
			self.visit_i64(v)
		}

		fn visit_str<E: de::Error>(self, v: &str) -> Result<Policy, E> {
			v.parse().map_err(E::custom)
		}
	}

	impl<'de> Deserialize<'de> for Policy {
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
			deserializer.deserialize_any(PolicyVisitor)
		}
	}
}
