//! Integration tests for configuration validation

#![allow(clippy::expect_used, clippy::unwrap_used)]

use passgen_protocol::config::{PassgenConfig, UnknownClassPolicy};
use passgen_protocol::error::ProtocolError;
use std::time::Duration;
use tracing::Level;

#[test]
fn test_default_config_validates() {
    let config = PassgenConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
    assert!(config.validate_strict().is_ok());
}

#[test]
fn test_defaults_match_protocol() {
    let config = PassgenConfig::default();
    assert_eq!(config.server.address, "127.0.0.1:8080");
    assert_eq!(config.server.unknown_class, UnknownClassPolicy::Numeric);
    assert_eq!(config.client.server_address(), "127.0.0.1:8080");
    assert_eq!(config.client.default_length, 8);
    assert!(config.client.response_timeout.is_none());
    assert!(config.generator.seed.is_none());
}

#[test]
fn test_invalid_server_address() {
    let mut config = PassgenConfig::default();
    config.server.address = "invalid_address".to_string();

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Invalid server address")));
}

#[test]
fn test_empty_server_address() {
    let mut config = PassgenConfig::default();
    config.server.address = String::new();

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("cannot be empty")));
}

#[test]
fn test_client_problems_are_all_reported() {
    let config = PassgenConfig::default_with_overrides(|c| {
        c.client.host = "  ".to_string();
        c.client.port = 0;
        c.client.default_length = 40;
        c.client.response_timeout = Some(Duration::from_millis(1));
    });

    let errors = config.validate();
    assert_eq!(errors.len(), 4, "{errors:?}");
    assert!(errors.iter().any(|e| e.contains("host cannot be empty")));
    assert!(errors.iter().any(|e| e.contains("port must be greater than 0")));
    assert!(errors.iter().any(|e| e.contains("Default length 40")));
    assert!(errors.iter().any(|e| e.contains("too short")));
}

#[test]
fn test_long_timeout_rejected() {
    let mut config = PassgenConfig::default();
    config.client.response_timeout = Some(Duration::from_secs(301));
    assert!(config.validate().iter().any(|e| e.contains("too long")));
}

#[test]
fn test_fixed_seed_warns() {
    let mut config = PassgenConfig::default();
    config.generator.seed = Some(1);

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.starts_with("WARNING")));
    assert!(matches!(
        config.validate_strict(),
        Err(ProtocolError::ConfigError(_))
    ));
}

#[test]
fn test_ipv6_host_is_bracketed() {
    let mut config = PassgenConfig::default();
    config.client.host = "::1".to_string();
    assert_eq!(config.client.server_address(), "[::1]:8080");
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = PassgenConfig::from_toml(
        r#"
        [server]
        unknown_class = "reject"

        [client]
        host = "passwdgen.example.org"
        response_timeout = 2500

        [logging]
        log_level = "debug"
        "#,
    )
    .expect("partial config should parse");

    assert_eq!(config.server.unknown_class, UnknownClassPolicy::Reject);
    assert_eq!(config.server.address, "127.0.0.1:8080");
    assert_eq!(config.client.host, "passwdgen.example.org");
    assert_eq!(config.client.port, 8080);
    assert_eq!(
        config.client.response_timeout,
        Some(Duration::from_millis(2500))
    );
    assert_eq!(config.logging.log_level, Level::DEBUG);
}

#[test]
fn test_bad_toml_is_config_error() {
    assert!(matches!(
        PassgenConfig::from_toml("[server]\nunknown_class = \"maybe\""),
        Err(ProtocolError::ConfigError(_))
    ));
    assert!(matches!(
        PassgenConfig::from_toml("[logging]\nlog_level = \"loud\""),
        Err(ProtocolError::ConfigError(_))
    ));
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("passgen.toml");

    let config = PassgenConfig::default_with_overrides(|c| {
        c.server.address = "0.0.0.0:9000".to_string();
        c.client.response_timeout = Some(Duration::from_secs(3));
        c.logging.json_format = true;
    });
    config.save_to_file(&path).expect("save");

    let loaded = PassgenConfig::from_file(&path).expect("reload");
    assert_eq!(loaded.server.address, "0.0.0.0:9000");
    assert_eq!(loaded.client.response_timeout, Some(Duration::from_secs(3)));
    assert!(loaded.logging.json_format);
    assert!(loaded.generator.seed.is_none());
}

#[test]
fn test_example_config_parses() {
    let example = PassgenConfig::example_config();
    assert!(example.contains("[server]"));
    let parsed = PassgenConfig::from_toml(&example).expect("example config should parse");
    assert!(parsed.validate().is_empty());
}

#[test]
fn test_missing_file_is_config_error() {
    assert!(matches!(
        PassgenConfig::from_file("/nonexistent/passgen.toml"),
        Err(ProtocolError::ConfigError(_))
    ));
}
