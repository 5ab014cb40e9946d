//! Integration tests for configuration management

use cgpa_tracker::config::{Config, ConfigOverrides};
use cgpa_tracker::core::projection::ProjectionPolicy;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert!(
        !config.paths.session_file.is_empty(),
        "Default session_file should not be empty"
    );
    assert_eq!(config.academics.total_semesters, 8);
    assert!((config.academics.max_point - 10.0).abs() < f64::EPSILON);
    assert_eq!(config.auth.otp_length, 4);
    assert_eq!(config.auth.resend_secs, 30);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[api]
token = "test_token"
endpoint = "https://portal.example.com"
timeout_secs = 15

[academics]
total_semesters = 10
max_point = 4.0
projection = "front-loaded"

[paths]
reports_dir = "./reports"
session_file = "./session.json"

[grades]
"A+" = 3.7
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.api.token, "test_token");
    assert_eq!(config.api.endpoint, "https://portal.example.com");
    assert_eq!(config.api.timeout_secs, 15);
    assert_eq!(config.academics.total_semesters, 10);
    assert_eq!(config.paths.reports_dir, "./reports");
    assert_eq!(config.paths.session_file, "./session.json");
    assert_eq!(config.grades.get("A+"), Some(&3.7));
    assert_eq!(
        config.projection_policy().unwrap(),
        ProjectionPolicy::FrontLoaded
    );
}

#[test]
fn test_config_from_toml_partial() {
    // Missing sections and fields use their defaults
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.api.token, "");
    assert_eq!(config.academics.total_semesters, 8);
    assert_eq!(config.auth.otp_length, 4);
    assert!(config.grades.is_empty());
    assert_eq!(config.projection_policy().unwrap(), ProjectionPolicy::Uniform);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$CGPA_TRACKER/test.log"

[paths]
reports_dir = "$CGPA_TRACKER/reports"
session_file = "$CGPA_TRACKER/session.json"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("cgpa-tracker"));
    assert!(!config.logging.file.contains("$CGPA_TRACKER"));
    assert!(config.paths.reports_dir.contains("cgpa-tracker"));
    assert!(!config.paths.session_file.contains("$CGPA_TRACKER"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);

    config
        .set("total-semesters", "10")
        .expect("Failed to set total_semesters");
    assert_eq!(config.get("total_semesters").unwrap(), "10");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_validates_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("total_semesters", "0").is_err());
    assert!(config.set("total_semesters", "eight").is_err());
    assert!(config.set("otp_length", "0").is_err());
    assert!(config.set("projection", "random").is_err());
    assert!(config.set("verbose", "sometimes").is_err());
    assert_eq!(config.academics.total_semesters, 8);

    config.set("projection", "front-loaded").unwrap();
    assert_eq!(
        config.projection_policy().unwrap(),
        ProjectionPolicy::FrontLoaded
    );
}

#[test]
fn test_grade_keys() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    assert_eq!(config.get("grade.O").unwrap(), "10");
    assert_eq!(config.get("grade.a+").unwrap(), "9");

    config.set("grade.A+", "9.5").expect("Failed to set grade");
    assert_eq!(config.get("grade.A+").unwrap(), "9.5");
    assert_eq!(config.grade_scale().unwrap().point_of("a+"), Some(9.5));

    // Points above the maximum are rejected and leave the scale untouched
    assert!(config.set("grade.A+", "11").is_err());
    assert!(config.set("grade.Z", "5").is_err());
    assert_eq!(config.get("grade.A+").unwrap(), "9.5");

    config.unset("grade.A+", &defaults).unwrap();
    assert_eq!(config.get("grade.A+").unwrap(), "9");
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.logging.level, "debug");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert!(config.unset("unknown_key", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("grade.B", "7.5").expect("Failed to set grade");

    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert_eq!(loaded_config.grades.get("B"), Some(&7.5));
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        endpoint: Some("https://override.example.com".to_string()),
        token: Some("override_token".to_string()),
        total_semesters: Some(6),
        projection: Some("front-loaded".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.api.token, "override_token");
    assert_eq!(config.api.endpoint, "https://override.example.com");
    assert_eq!(config.academics.total_semesters, 6);
    assert_eq!(config.academics.projection, "front-loaded");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let before = config.api.endpoint.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.api.endpoint, before);
}

#[test]
fn test_config_display_format() {
    let mut config = Config::from_defaults();
    config.api.token = "super-secret".to_string();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[api]"));
    assert!(display_str.contains("[academics]"));
    assert!(display_str.contains("[auth]"));
    assert!(display_str.contains("[paths]"));

    assert!(display_str.contains("level"));
    assert!(display_str.contains("total_semesters"));
    assert!(!display_str.contains("super-secret"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
reports_dir = ""
session_file = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.paths.reports_dir, defaults.paths.reports_dir);
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
}

#[test]
fn test_get_app_dir() {
    let dir = Config::get_app_dir();

    assert!(dir.to_string_lossy().contains("cgpa-tracker"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
