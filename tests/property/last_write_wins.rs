//! Property-based tests for ordering guarantees

use proptest::prelude::*;
use rules_service::logging::LogLevel;
use rules_service::parameters::build_with_default_level;
use rules_service::{
    with_admin_ips, with_log_level, with_periodic_pruning, with_storage_path, Parameter,
};
use std::path::PathBuf;

fn log_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Off),
        Just(LogLevel::Error),
        Just(LogLevel::Warn),
        Just(LogLevel::Info),
        Just(LogLevel::Debug),
        Just(LogLevel::Trace),
    ]
}

fn parameter() -> impl Strategy<Value = Parameter> {
    prop_oneof![
        log_level().prop_map(with_log_level),
        "[a-z/]{0,8}".prop_map(|path| with_storage_path(path)),
        prop::collection::vec("[0-9.]{1,15}", 0..4).prop_map(|ips| with_admin_ips(ips)),
        any::<bool>().prop_map(with_periodic_pruning),
    ]
}

proptest! {
    #[test]
    fn test_result_reflects_last_setting_per_field(
        params in prop::collection::vec(parameter(), 0..12),
        default_level in log_level(),
    ) {
        let mut expected_level = default_level;
        let mut expected_path = PathBuf::new();
        let mut expected_ips: Vec<String> = Vec::new();
        let mut expected_pruning = false;
        for param in &params {
            match param {
                Parameter::LogLevel(level) => expected_level = *level,
                Parameter::StoragePath(path) => expected_path = path.clone(),
                Parameter::AdminIps(ips) => expected_ips = ips.clone(),
                Parameter::PeriodicPruning(enabled) => expected_pruning = *enabled,
            }
        }

        match build_with_default_level(default_level, params) {
            Ok(built) => {
                prop_assert!(!expected_path.as_os_str().is_empty());
                prop_assert_eq!(built.storage_path(), expected_path.as_path());
                prop_assert_eq!(built.log_level(), expected_level);
                prop_assert_eq!(built.admin_ips(), expected_ips.as_slice());
                prop_assert_eq!(built.periodic_pruning(), expected_pruning);
            }
            Err(_) => prop_assert!(expected_path.as_os_str().is_empty()),
        }
    }

    #[test]
    fn test_non_empty_trailing_storage_path_always_succeeds(
        params in prop::collection::vec(parameter(), 0..8),
        path in "[a-z]{1,12}",
    ) {
        let mut params = params;
        params.push(with_storage_path(path.clone()));

        let built = build_with_default_level(LogLevel::Info, params).unwrap();
        let expected = PathBuf::from(path);
        prop_assert_eq!(built.storage_path(), expected.as_path());
    }

    #[test]
    fn test_repeating_a_setting_changes_nothing(
        params in prop::collection::vec(parameter(), 1..8),
    ) {
        let mut repeated = params.clone();
        if let Some(last) = params.last() {
            repeated.push(last.clone());
        }

        let once = build_with_default_level(LogLevel::Info, params);
        let twice = build_with_default_level(LogLevel::Info, repeated);
        prop_assert_eq!(once, twice);
    }
}
