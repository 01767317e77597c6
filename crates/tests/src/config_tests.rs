//! Settings and engine construction tests

use std::collections::HashMap;
use std::path::PathBuf;

use deadline_engine::config::{build_engine, init_engine, Settings, DEFAULT_JURISDICTION};
use deadline_engine::{HolidayRegistry, RuleCatalog};
use pretty_assertions::assert_eq;
use shared_types::{AppError, AppErrorKind, CaseType, ConfigError};

use crate::common::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn settings_default_when_unset() {
    let settings = Settings::from_lookup(lookup(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.jurisdiction, DEFAULT_JURISDICTION);
    assert_eq!(settings.rules_path, None);
    assert_eq!(settings.holidays_path, None);
}

#[test]
fn unset_paths_use_builtin_config() {
    let settings = Settings::default();
    assert_eq!(settings.catalog().unwrap(), RuleCatalog::builtin().unwrap());
    assert_eq!(
        settings.holidays().unwrap().jurisdictions(),
        HolidayRegistry::builtin().unwrap().jurisdictions()
    );

    let builtin = build_engine(&settings).unwrap();
    let from_files = shipped_engine();
    assert_eq!(
        builtin.compute(CaseType::Motion, date(2025, 9, 5)).unwrap(),
        from_files.compute(CaseType::Motion, date(2025, 9, 5)).unwrap()
    );
    assert_eq!(builtin.calendar().len(), from_files.calendar().len());
}

#[test]
fn settings_read_overrides_and_ignore_blank_values() {
    let settings = Settings::from_lookup(lookup(&[
        ("DEADLINE_RULES_PATH", "/etc/deadlines/rules.toml"),
        ("DEADLINE_HOLIDAYS_PATH", "  "),
        ("DEADLINE_JURISDICTION", "us-federal"),
    ]));
    assert_eq!(
        settings.rules_path,
        Some(PathBuf::from("/etc/deadlines/rules.toml"))
    );
    assert_eq!(settings.holidays_path, None);
    assert_eq!(settings.jurisdiction, "us-federal");
}

#[test]
fn build_engine_uses_configured_jurisdiction() {
    let mut settings = shipped_settings();
    settings.jurisdiction = "us-federal".to_string();
    let engine = build_engine(&settings).unwrap();
    assert_eq!(engine.calendar().jurisdiction(), "us-federal");
    // Columbus Day counts as a holiday federally
    assert!(engine.calendar().is_holiday(date(2025, 10, 13)));
}

#[test]
fn build_engine_with_unknown_jurisdiction_fails() {
    let mut settings = shipped_settings();
    settings.jurisdiction = "tx-district".to_string();
    let err = build_engine(&settings).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownJurisdiction { .. }));
    let app: AppError = err.into();
    assert_eq!(app.kind, AppErrorKind::NotFound);
}

#[test]
fn build_engine_with_missing_rules_fails() {
    let mut settings = shipped_settings();
    settings.rules_path = Some(config_path("missing-rules.toml"));
    let err = build_engine(&settings).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Io { ref path, .. } if path.ends_with("missing-rules.toml")
    ));
}

#[test]
fn init_engine_returns_same_instance() {
    let first = init_engine(&shipped_settings()).unwrap();
    let second = init_engine(&Settings::default()).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(deadline_engine::config::engine().is_some());
}
