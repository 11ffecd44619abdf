use super::*;
use crate::core::event::KeyCode;
use crate::error::Error;
use std::io::Write;

#[test]
fn defaults() {
    let config = ScreenConfig::default();
    assert_eq!(config.poll_interval(), Duration::from_millis(100));
    assert_eq!(config.exit_key().unwrap(), Key::from('q'));
    assert_eq!(config.reserved_columns, 1);
    assert!(config.log_filter.is_none());
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let config = ScreenConfig::from_json_str(r#"{ "exit_key": "ctrl+c" }"#).unwrap();
    assert_eq!(config.exit_key().unwrap(), Key::ctrl(KeyCode::Char('c')));
    assert_eq!(config.poll_interval_ms, 100);
}

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ScreenConfig::load(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, ScreenConfig::default());
}

#[test]
fn load_reads_the_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "poll_interval_ms": 20, "reserved_columns": 0, "log_filter": "nurses=trace" }}"#
    )
    .unwrap();

    let config = ScreenConfig::load(file.path()).unwrap();
    assert_eq!(config.poll_interval(), Duration::from_millis(20));
    assert_eq!(config.reserved_columns, 0);
    assert_eq!(config.log_filter.as_deref(), Some("nurses=trace"));
}

#[test]
fn malformed_files_are_configuration_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    let err = ScreenConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.is_configuration());

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "exit_key": "ctrl+" }}"#).unwrap();
    let err = ScreenConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidKey(_)));
    assert!(err.is_configuration());
}

#[test]
fn config_round_trips_through_json() {
    let config = ScreenConfig {
        exit_key: "esc".to_string(),
        ..ScreenConfig::default()
    };
    let text = serde_json::to_string(&config).unwrap();
    assert!(!text.contains("log_filter"));
    assert_eq!(ScreenConfig::from_json_str(&text).unwrap(), config);
}

#[test]
fn config_lives_under_the_app_directory() {
    if let Some(path) = config_path() {
        assert!(path.ends_with("nurses/config.json"));
    }
}
