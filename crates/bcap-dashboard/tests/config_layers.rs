//! Precedence of the settings layers with a real TOML file.

use std::path::PathBuf;

use bcap_dashboard::cli::{Cli, LogFormat};
use bcap_dashboard::config::{Config, ENV_LOCALE, ENV_MODEL_PATH};
use bcap_dashboard::error::{AppError, ConfigError};

fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("battery-capacity.toml");
    std::fs::write(&path, contents).expect("write config");
    (dir, path)
}

#[test]
fn file_fills_what_cli_and_env_leave_unset() {
    let (_dir, path) = write_config(
        r#"
            model_path = "from-file.json"
            locale = "ko"
            log_filter = "debug"
            log_format = "json"
        "#,
    );
    let cli = Cli {
        config: Some(path),
        ..Cli::default()
    };
    let env = |key: &str| (key == ENV_MODEL_PATH).then(|| "from-env.json".to_string());
    let config = Config::resolve(&cli, env).expect("resolve");

    assert_eq!(config.model_path, PathBuf::from("from-env.json"));
    assert_eq!(config.locale, "ko");
    assert_eq!(config.log_filter, "debug");
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.log_file, None);
}

#[test]
fn cli_beats_every_other_layer() {
    let (_dir, path) = write_config("locale = \"ko\"\n");
    let cli = Cli {
        config: Some(path),
        locale: Some("en".into()),
        ..Cli::default()
    };
    let env = |key: &str| (key == ENV_LOCALE).then(|| "ko".to_string());
    assert_eq!(Config::resolve(&cli, env).expect("resolve").locale, "en");
}

#[test]
fn unreadable_config_is_a_usage_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cli = Cli {
        config: Some(dir.path().join("missing.toml")),
        ..Cli::default()
    };
    let err = Config::resolve(&cli, |_: &str| None).expect_err("missing file");
    assert!(matches!(err, ConfigError::Read { .. }));
    assert_eq!(AppError::from(err).exit_code(), 2);
}

#[test]
fn malformed_config_reports_the_path() {
    let (_dir, path) = write_config("locale = [\n");
    let cli = Cli {
        config: Some(path.clone()),
        ..Cli::default()
    };
    let err = Config::resolve(&cli, |_: &str| None).expect_err("bad toml");
    assert!(err.to_string().contains(&path.display().to_string()));
}
