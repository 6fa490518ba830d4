use std::panic::{AssertUnwindSafe, catch_unwind};

use muffle_channel::{emit, hook_depth, silenced, with_reporting};
use pretty_assertions::assert_eq;
use serial_test::serial;

use super::*;
use crate::defaults;

fn warn_twice(message: &str) -> String {
	emit(SeverityKind::Warning, format!("{message} (1)"));
	emit(SeverityKind::Warning, format!("{message} (2)"));
	message.to_uppercase()
}

#[test]
fn reports_its_configuration() {
	let interceptor = Interceptor::warning(|()| (), Policy::Silent);
	assert!(interceptor.includes(SeverityKind::Warning));
	assert!(!interceptor.includes(SeverityKind::Notice));
	assert_eq!(interceptor.severity(), SeverityMask::warning());
	assert!(interceptor.errors_are_silenced());

	let excluded = SeverityMask::from_exclusion(["E_NOTICE", "E_STRICT", "E_DEPRECATED"]).unwrap();
	let interceptor = Interceptor::new(|()| (), Policy::Raise, excluded);
	assert!(!interceptor.includes(SeverityKind::Strict));
	assert!(!interceptor.includes(SeverityKind::Deprecated));
	assert!(interceptor.includes(SeverityKind::UserNotice));
	assert!(interceptor.includes(SeverityKind::UserDeprecated));
	assert!(interceptor.errors_are_thrown());
	assert!(!interceptor.errors_are_silenced());
}

#[test]
fn nothing_captured_on_clean_work() {
	let mut upper = Interceptor::user_warning(|s: &str| s.to_uppercase(), Policy::Raise);
	assert_eq!(upper.call("foo").unwrap(), "FOO");
	assert!(upper.errors().is_empty());
	assert!(upper.errors().first().is_none());
}

#[test]
fn silent_policy_returns_result_and_keeps_log() {
	let mut work = Interceptor::all(warn_twice, Policy::Silent);
	assert_eq!(work.call("foo").unwrap(), "FOO");

	let errors = work.errors();
	assert_eq!(errors.count(), 2);
	assert_eq!(errors.first().unwrap().message(), "foo (2)");
	assert_eq!(errors.last().unwrap().message(), "foo (1)");
	assert_eq!(errors.first().unwrap().kind(), SeverityKind::Warning);
	assert!(errors.first().unwrap().file().is_some_and(|file| file.ends_with("tests.rs")));
}

#[test]
fn raise_policy_raises_aggregate() {
	let mut work = Interceptor::warning(warn_twice, Policy::Raise);
	let error = work.call("foo").unwrap_err();
	assert_eq!(error.len(), 2);
	assert_eq!(error.first().unwrap().message(), "foo (2)");
	let messages: Vec<_> = error.iter().map(DiagnosticRecord::message).collect();
	assert_eq!(messages, ["foo (2)", "foo (1)"]);
	assert_eq!(error.to_string(), format!("2 diagnostics intercepted, latest {}", error.first().unwrap()));
	assert_eq!(work.errors(), *error.log());
}

#[test]
fn raise_policy_with_nothing_captured_returns_result() {
	let mut strict = Interceptor::strict(|s: &str| s.to_uppercase(), Policy::Raise);
	assert_eq!(strict.call("foo").unwrap(), "FOO");
}

#[test]
fn kinds_outside_mask_are_not_captured() {
	let mut work = Interceptor::warning(
		|()| {
			emit(SeverityKind::Warning, "kept");
			emit(SeverityKind::Notice, "dropped");
		},
		Policy::Silent,
	);
	work.call(()).unwrap();
	let errors = work.errors();
	assert_eq!(errors.len(), 1);
	assert_eq!(errors.first().unwrap().message(), "kept");
}

#[test]
fn kinds_outside_reporting_setting_are_not_captured() {
	let mut work = Interceptor::all(
		|()| {
			emit(SeverityKind::Warning, "kept");
			emit(SeverityKind::Notice, "dropped");
		},
		Policy::Raise,
	);
	let outcome = with_reporting(SeverityMask::warning(), || work.call(()));
	assert_eq!(outcome.unwrap_err().len(), 1);

	let outcome = with_reporting(SeverityMask::none(), || work.call(()));
	assert!(outcome.is_ok());
	assert!(work.errors().is_empty());
}

#[test]
fn silenced_section_is_not_captured() {
	let mut work = Interceptor::warning(|message: &str| silenced(|| emit(SeverityKind::Warning, message)), Policy::Raise);
	assert!(work.call("hidden").is_ok());
	assert!(work.errors().is_empty());
}

#[test]
fn each_call_starts_with_an_empty_log() {
	let mut work = Interceptor::all(
		|count: usize| {
			for index in 0..count {
				emit(SeverityKind::UserNotice, format!("notice {index}"));
			}
		},
		Policy::Silent,
	);
	work.call(3).unwrap();
	assert_eq!(work.errors().len(), 3);
	work.call(0).unwrap();
	assert!(work.errors().is_empty());
	work.call(1).unwrap();
	assert_eq!(work.errors().len(), 1);
}

#[test]
fn hook_is_removed_after_every_call() {
	let mut work = Interceptor::warning(warn_twice, Policy::Raise);
	assert_eq!(hook_depth(), 0);
	assert!(work.call("a").is_err());
	assert_eq!(hook_depth(), 0);
	assert!(work.call("b").is_err());
	assert_eq!(hook_depth(), 0);
	assert_eq!(work.errors().len(), 2);
}

#[test]
fn hook_is_removed_when_work_unwinds() {
	let mut work = Interceptor::all(
		|fail: bool| {
			emit(SeverityKind::Deprecated, "before failure");
			if fail {
				panic!("work failed");
			}
		},
		Policy::Raise,
	);
	let outcome = catch_unwind(AssertUnwindSafe(|| work.call(true)));
	assert!(outcome.is_err());
	assert_eq!(hook_depth(), 0);
	assert_eq!(work.errors().len(), 1);
	assert_eq!(work.errors().first().unwrap().message(), "before failure");
}

#[test]
fn fatal_diagnostics_propagate_through_interception() {
	let mut work = Interceptor::all(
		|()| {
			emit(SeverityKind::UserWarning, "recoverable");
			emit(SeverityKind::CompileError, "unrecoverable");
		},
		Policy::Silent,
	);
	let payload = catch_unwind(AssertUnwindSafe(|| work.call(()))).unwrap_err();
	let fatal = payload.downcast_ref::<muffle_channel::Fatal>().unwrap();
	assert_eq!(fatal.0.message, "unrecoverable");
	assert_eq!(hook_depth(), 0);
	assert_eq!(work.errors().len(), 1);
}

#[test]
fn work_failure_passes_through_unchanged() {
	#[derive(Debug, PartialEq, thiserror::Error)]
	#[error("disk full")]
	struct DiskFull;

	let mut work = Interceptor::warning(
		|()| -> Result<u8, DiskFull> {
			emit(SeverityKind::Warning, "low space");
			Err(DiskFull)
		},
		Policy::Raise,
	);
	let error = work.try_call(()).unwrap_err();
	assert!(error.diagnostics().is_none());
	assert_eq!(error.into_work(), Some(DiskFull));
	assert_eq!(work.errors().len(), 1);
}

#[test]
fn fallible_work_success_still_applies_policy() {
	let mut work = Interceptor::warning(
		|()| -> Result<u8, std::io::Error> {
			emit(SeverityKind::Warning, "slow disk");
			Ok(7)
		},
		Policy::Raise,
	);
	match work.try_call(()) {
		Err(InterceptError::Diagnostics(error)) => assert_eq!(error.first().unwrap().message(), "slow disk"),
		other => panic!("expected diagnostics error, got {other:?}"),
	}

	let mut quiet = Interceptor::warning(|()| -> Result<u8, std::io::Error> { Ok(7) }, Policy::Raise);
	assert_eq!(quiet.try_call(()).unwrap(), 7);
}

#[test]
fn nested_interceptors_capture_innermost_first() {
	let mut inner = Interceptor::warning(
		|()| {
			emit(SeverityKind::Warning, "inner");
		},
		Policy::Silent,
	);
	let mut outer = Interceptor::warning(
		move |()| {
			inner.call(()).unwrap();
			emit(SeverityKind::Warning, "outer");
			inner.errors()
		},
		Policy::Silent,
	);
	let inner_errors = outer.call(()).unwrap();
	assert_eq!(inner_errors.len(), 1);
	assert_eq!(inner_errors.first().unwrap().message(), "inner");
	assert_eq!(outer.errors().len(), 1);
	assert_eq!(outer.errors().first().unwrap().message(), "outer");
	assert_eq!(hook_depth(), 0);
}

#[test]
fn injected_default_source_drives_follow_policy() {
	let mut raising = Interceptor::notice(
		|()| {
			emit(SeverityKind::Notice, "n");
		},
		Policy::FollowGlobalDefault,
	)
	.with_default_source(true);
	assert!(raising.errors_are_thrown());
	assert!(raising.call(()).is_err());

	let mut silent = Interceptor::notice(
		|()| {
			emit(SeverityKind::Notice, "n");
		},
		Policy::FollowGlobalDefault,
	)
	.with_default_source(false);
	assert!(silent.errors_are_silenced());
	assert!(silent.call(()).is_ok());
}

#[test]
#[serial]
fn explicit_policy_overrides_global_default() {
	defaults::enable_raise_by_default();
	let mut work = Interceptor::all(warn_twice, Policy::Silent);
	assert!(work.call("foo").is_ok());
	assert_eq!(work.errors().len(), 2);
	defaults::disable_raise_by_default();

	let mut work = Interceptor::all(warn_twice, Policy::Raise);
	assert!(work.call("foo").is_err());
}

#[test]
#[serial]
fn follow_policy_reads_default_at_evaluation_time() {
	let mut work = Interceptor::all(warn_twice, Policy::FollowGlobalDefault);
	defaults::disable_raise_by_default();
	assert!(work.errors_are_silenced());
	assert!(work.call("foo").is_ok());

	defaults::enable_raise_by_default();
	assert!(work.errors_are_thrown());
	assert!(work.call("foo").is_err());
	defaults::disable_raise_by_default();
}

#[test]
fn construction_from_loose_values() {
	let work = Interceptor::from_level(|()| (), Policy::Silent, "E_USER_NOTICE").unwrap();
	assert_eq!(work.severity(), SeverityMask::user_notice());
	assert!(matches!(
		Interceptor::from_level(|()| (), Policy::Silent, -2),
		Err(CloakError::Severity(muffle_severity::SeverityError::InvalidSeverityValue(-2)))
	));
	assert!(matches!(
		Interceptor::from_raw_policy(|()| (), 7, SeverityMask::all()),
		Err(CloakError::InvalidPolicyValue(_))
	));
	let work = Interceptor::from_raw_policy(|()| (), 2, SeverityMask::all()).unwrap();
	assert_eq!(work.policy(), Policy::Raise);
}

#[test]
fn environment_constructor_snapshots_reporting() {
	let work = with_reporting(SeverityMask::deprecated(), || Interceptor::from_environment(|()| (), Policy::Silent));
	assert_eq!(work.severity(), SeverityMask::deprecated());
}
