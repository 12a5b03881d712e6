//! Tests for TOML configuration loading.

use simon_says::{BoardConfig, SimonConfig};
use std::io::Write;
use strictly_simon::Timing;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_defaults_match_classic_game() {
    let config = SimonConfig::default();
    assert_eq!(
        config.board(),
        &BoardConfig {
            width: 1024,
            height: 768
        }
    );
    assert_eq!(config.timing(), &Timing::default());
    assert_eq!(config.timing().highlight_ms, 400);
    assert_eq!(config.timing().gap_ms, 200);
    assert_eq!(config.timing().transition_ms, 1000);
    assert_eq!(config.seed(), &None);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = write_config(
        r#"
seed = 99

[timing]
highlight_ms = 250
"#,
    );

    let config = SimonConfig::from_file(file.path()).expect("valid config");
    assert_eq!(config.seed(), &Some(99));
    assert_eq!(config.timing().highlight_ms, 250);
    assert_eq!(config.timing().gap_ms, 200);
    assert_eq!(config.board().width, 1024);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = SimonConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, SimonConfig::default());
}

#[test]
fn test_malformed_file_is_rejected() {
    let file = write_config("board = \"wide\"");
    let err = SimonConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_tiny_board_is_rejected() {
    let file = write_config("[board]\nwidth = 1\nheight = 768\n");
    let err = SimonConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("at least 2x2"));
}

#[test]
fn test_excessive_delay_is_rejected() {
    let file = write_config("[timing]\ntransition_ms = 60000\n");
    let err = SimonConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("transition_ms"));
}

#[test]
fn test_cli_seed_overrides_file() {
    let file = write_config("seed = 1\n");
    let config = SimonConfig::from_file(file.path())
        .unwrap()
        .with_seed(Some(2));
    assert_eq!(config.seed(), &Some(2));

    let kept = SimonConfig::from_file(file.path()).unwrap().with_seed(None);
    assert_eq!(kept.seed(), &Some(1));
}
