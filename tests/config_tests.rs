use std::io::Write;

use voicebank::config::{AssistantConfig, ENV_RECOGNIZER_URL};
use voicebank::registry::CommandKind;

#[test]
fn test_defaults_without_file() {
    let config = AssistantConfig::default();

    assert_eq!(config.recognizer.url, "http://localhost:8000/recognize");
    assert_eq!(config.recognizer.timeout_ms, 10_000);
    assert_eq!(config.recognizer.file_field, "file");
    assert_eq!(config.recognizer.file_name, "recording.wav");
    assert_eq!(config.capture.max_seconds, 30);
    assert!(config.aliases.is_empty());
    assert_eq!(config.registry().len(), 4);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = AssistantConfig::from_toml_str(
        r#"
        log_filter = "voicebank=debug"

        [recognizer]
        url = "http://asr.internal:9000/v1/recognize"

        [capture]
        max_seconds = 12
        "#,
    )
    .unwrap();

    assert_eq!(config.recognizer.url, "http://asr.internal:9000/v1/recognize");
    assert_eq!(config.recognizer.timeout_ms, 10_000);
    assert_eq!(config.capture.max_seconds, 12);
    assert_eq!(config.capture.sample_rate_hint, Some(16_000));
    assert_eq!(config.log_filter.as_deref(), Some("voicebank=debug"));
}

#[test]
fn test_configured_aliases_reach_the_registry() {
    let config = AssistantConfig::from_toml_str(
        r#"
        [aliases]
        transfer = "transfer"
        "top up" = "mobileCharge"
        balance = "remainderCheck"
        "#,
    )
    .unwrap();

    let registry = config.registry();
    assert_eq!(registry.resolve_alias("Transfer"), Ok(CommandKind::Transfer));
    assert_eq!(registry.resolve_alias("top up"), Ok(CommandKind::MobileCharge));
    assert_eq!(registry.resolve_alias("balance"), Ok(CommandKind::RemainderCheck));
    // Built-ins survive
    assert_eq!(registry.resolve_alias("چک"), Ok(CommandKind::CheckNumberValidation));
}

#[test]
fn test_unknown_command_in_aliases_is_an_error() {
    let result = AssistantConfig::from_toml_str(
        r#"
        [aliases]
        wire = "wireTransfer"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn test_load_from_file_with_env_override() {
    let mut file = std::env::temp_dir();
    file.push(format!("voicebank-config-{}.toml", uuid::Uuid::new_v4()));
    {
        let mut handle = std::fs::File::create(&file).unwrap();
        writeln!(handle, "[recognizer]\nurl = \"http://from-file/recognize\"\ntimeout_ms = 500").unwrap();
    }

    std::env::set_var(ENV_RECOGNIZER_URL, "http://from-env/recognize");
    let config = AssistantConfig::load(Some(file.as_path()));
    std::env::remove_var(ENV_RECOGNIZER_URL);
    std::fs::remove_file(&file).unwrap();

    let config = config.unwrap();
    assert_eq!(config.recognizer.url, "http://from-env/recognize");
    assert_eq!(config.recognizer.timeout_ms, 500);
}

#[test]
fn test_missing_file_is_reported() {
    let err = AssistantConfig::from_file(std::path::Path::new("/nonexistent/voicebank.toml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/voicebank.toml"));
}

#[test]
fn test_cli_path_wins() {
    let path = AssistantConfig::resolve_path(Some("assistant.toml".to_string()));
    assert_eq!(path.as_deref(), Some(std::path::Path::new("assistant.toml")));
}
