//! Speech/command recognition collaborator.
//!
//! The dialogue engine only sees [`Recognizer::recognize`]; how the audio is
//! shipped and which model reads it stays behind this trait.

pub mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::audio::AudioSample;

pub use client::HttpRecognizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecognitionMode {
    /// Classify the utterance as one of the command aliases.
    ClassifyCommand,
    /// Transcribe the utterance as a slot value.
    ExtractValue,
}

impl RecognitionMode {
    pub fn is_command(&self) -> bool {
        matches!(self, RecognitionMode::ClassifyCommand)
    }
}

/// What the recognizer understood. Only the field matching the request mode is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl RecognitionResult {
    pub fn command(token: impl Into<String>) -> Self {
        Self { command: Some(token.into()), text: None }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self { command: None, text: Some(text.into()) }
    }

    pub fn command_token(&self) -> Option<&str> {
        non_blank(self.command.as_deref())
    }

    pub fn value_text(&self) -> Option<&str> {
        non_blank(self.text.as_deref())
    }

    /// Whether the field expected for `mode` carries something usable.
    pub fn satisfies(&self, mode: RecognitionMode) -> bool {
        match mode {
            RecognitionMode::ClassifyCommand => self.command_token().is_some(),
            RecognitionMode::ExtractValue => self.value_text().is_some(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("recognizer returned status {0}")]
    Status(u16),

    #[error("recognizer response has no `{0}`")]
    MissingField(&'static str),
}

/// Pluggable recognition backend. Must be `Send + Sync`; the engine shares it behind an `Arc`.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(
        &self,
        sample: &AudioSample,
        mode: RecognitionMode,
    ) -> Result<RecognitionResult, RecognitionError>;
}
