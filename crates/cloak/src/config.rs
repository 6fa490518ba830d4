//! TOML configuration for interception defaults.

use muffle_channel::FromEnvironment;
use muffle_severity::SeverityMask;
use serde::{Deserialize, Serialize};

use crate::error::CloakError;
use crate::{Interceptor, Policy, defaults};

/// Interception settings, usually read once at startup.
///
/// ```toml
/// raise_by_default = true
/// reporting = "E_ALL"
/// policy = "silent"
/// severity = "E_WARNING | E_NOTICE"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Process-wide default for `follow-global-default` interceptors.
	pub raise_by_default: bool,
	/// Reporting setting applied to the calling thread.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reporting: Option<SeverityMask>,
	/// Policy of interceptors built through [`Config::interceptor`].
	pub policy: Policy,
	/// Mask of interceptors built through [`Config::interceptor`]; the
	/// reporting setting at build time when absent.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub severity: Option<SeverityMask>,
}

impl Config {
	/// Parses a TOML document.
	///
	/// # Errors
	///
	/// [`CloakError::Config`] on malformed documents, unknown keys, or invalid
	/// policy and severity values.
	pub fn from_toml_str(source: &str) -> Result<Self, CloakError> {
		Ok(toml::from_str(source)?)
	}

	/// Writes the process-wide default and the calling thread's reporting
	/// setting.
	pub fn apply(&self) {
		if self.raise_by_default {
			defaults::enable_raise_by_default();
		} else {
			defaults::disable_raise_by_default();
		}
		if let Some(reporting) = self.reporting {
			muffle_channel::set_reporting(reporting);
		}
		tracing::debug!(
			raise_by_default = self.raise_by_default,
			reporting = %muffle_channel::reporting(),
			"interception configuration applied"
		);
	}

	/// Builds an interceptor with the configured policy and mask.
	pub fn interceptor<F>(&self, work: F) -> Interceptor<F> {
		let severity = self.severity.unwrap_or_else(SeverityMask::from_environment);
		Interceptor::new(work, self.policy, severity)
	}
}
