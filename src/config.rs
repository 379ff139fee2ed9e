use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::registry::{CommandKind, CommandRegistry};

pub const ENV_CONFIG_PATH: &str = "VOICEBANK_CONFIG";
pub const ENV_RECOGNIZER_URL: &str = "VOICEBANK_RECOGNIZER_URL";

/// Top-level configuration, usually read from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub recognizer: RecognizerConfig,
    pub capture: CaptureConfig,
    /// Extra spoken aliases, e.g. `transfer = "transfer"` or `"انتقال" = "transfer"`.
    pub aliases: HashMap<String, CommandKind>,
    /// `EnvFilter` directive. `RUST_LOG` takes precedence.
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub url: String,
    pub timeout_ms: u64,
    /// Multipart field carrying the audio.
    pub file_field: String,
    pub file_name: String,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/recognize".to_string(),
            timeout_ms: 10_000,
            file_field: "file".to_string(),
            file_name: "recording.wav".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Longest clip kept per utterance.
    pub max_seconds: u32,
    /// Preferred input rate; the device default is used when unsupported.
    pub sample_rate_hint: Option<u32>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_seconds: 30,
            sample_rate_hint: Some(16_000),
        }
    }
}

impl AssistantConfig {
    /// Load from `path` (or defaults), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_RECOGNIZER_URL) {
            if !url.trim().is_empty() {
                self.recognizer.url = url.trim().to_string();
            }
        }
    }

    /// Config path from the CLI argument, falling back to `VOICEBANK_CONFIG`.
    pub fn resolve_path(cli_arg: Option<String>) -> Option<PathBuf> {
        cli_arg
            .or_else(|| std::env::var(ENV_CONFIG_PATH).ok())
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    }

    pub fn registry(&self) -> CommandRegistry {
        CommandRegistry::with_aliases(self.aliases.iter().map(|(token, kind)| (token.as_str(), *kind)))
    }
}
