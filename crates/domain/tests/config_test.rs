use dnstest_domain::{CliOverrides, Config};

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert!(config.zone.path.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_default_config_needs_a_zone() {
    assert!(Config::default().validate().is_err());
}

#[test]
fn test_overrides_fill_in_defaults() {
    let overrides = CliOverrides {
        zone_path: Some("fixtures/example.zone".to_string()),
        log_level: None,
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dnstest.toml");
    std::fs::write(&path, "").unwrap();

    let config = Config::load(path.to_str(), overrides).unwrap();

    assert_eq!(config.zone.path.as_deref(), Some("fixtures/example.zone"));
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}
