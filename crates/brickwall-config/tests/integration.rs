//! Integration tests for brickwall-config.
//!
//! Loads limiter settings from files on disk and drives the resulting engine.

use std::io::Write;

use brickwall_config::{ConfigError, LimiterConfig, LinkSetting};
use brickwall_core::{ChannelLink, Smoothing};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn load_from_file() {
    let file = write_config(
        r#"
        threshold = 0.5
        attack = "1ms"
        release = 0.001
        lookahead = 12
        buffer_capacity = 24
        link = "independent"
        "#,
    );

    let config = LimiterConfig::load(file.path()).unwrap();
    assert_eq!(config.link, LinkSetting::Independent);
    assert_eq!(config.buffer_capacity, Some(24));

    let params = config.limiter_params().unwrap();
    assert_eq!(params.threshold, 0.5);
    assert_eq!(params.attack, Smoothing::TimeMs(1.0));
    assert_eq!(params.release, Smoothing::Coefficient(0.001));
    assert_eq!(params.link, ChannelLink::Independent);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = LimiterConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_config("threshold = = 0.5");
    assert!(matches!(
        LimiterConfig::load(file.path()),
        Err(ConfigError::TomlParse(_))
    ));
}

#[test]
fn saved_defaults_load_back() {
    let text = LimiterConfig::default().to_toml_string().unwrap();
    let file = write_config(&text);
    assert_eq!(
        LimiterConfig::load(file.path()).unwrap(),
        LimiterConfig::default()
    );
}

#[test]
fn engine_from_file_limits_audio() {
    let file = write_config(
        r#"
        threshold = "50%"
        attack = 0.9
        release = 0.01
        lookahead = 4
        "#,
    );
    let config = LimiterConfig::load(file.path()).unwrap();
    let mut limiter = config.build_engine(2, 48000.0).unwrap();

    let mut block = vec![vec![1.0_f32; 1024], vec![-1.0_f32; 1024]];
    limiter.process(&mut block);

    assert!(block[0][..4].iter().all(|&s| s == 0.0));
    assert!((block[0][1023] - 0.5).abs() < 1e-3);
    assert!((block[1][1023] + 0.5).abs() < 1e-3);
}
