use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{RecognitionError, RecognitionMode, RecognitionResult, Recognizer};
use crate::audio::AudioSample;
use crate::config::RecognizerConfig;

/// Recognition service reached over HTTP.
///
/// Each utterance is POSTed as a multipart upload with
/// `?is_command=true|false` selecting classification or transcription.
#[derive(Clone)]
pub struct HttpRecognizer {
    client: Client,
    url: String,
    file_field: String,
    file_name: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    command: Option<String>,
    #[serde(default)]
    text: Option<String>,
    // The reference backend names the transcript `extracted_audio`
    #[serde(default)]
    extracted_audio: Option<String>,
}

impl RecognizeResponse {
    fn into_result(self) -> RecognitionResult {
        RecognitionResult {
            command: self.command,
            text: [self.text, self.extracted_audio]
                .into_iter()
                .flatten()
                .find(|t| !t.trim().is_empty()),
        }
    }
}

impl HttpRecognizer {
    pub fn new(url: impl Into<String>) -> Self {
        let defaults = RecognizerConfig::default();
        Self {
            client: Client::builder()
                .timeout(Duration::from_millis(defaults.timeout_ms))
                .build()
                .unwrap_or_default(),
            url: url.into(),
            file_field: defaults.file_field,
            file_name: defaults.file_name,
        }
    }

    pub fn from_config(config: &RecognizerConfig) -> Result<Self, RecognitionError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms)) // Network level timeout
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            file_field: config.file_field.clone(),
            file_name: config.file_name.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Recognizer for HttpRecognizer {
    async fn recognize(
        &self,
        sample: &AudioSample,
        mode: RecognitionMode,
    ) -> Result<RecognitionResult, RecognitionError> {
        debug!(
            url = %self.url,
            mode = ?mode,
            audio_bytes = sample.len(),
            "sending utterance to recognizer"
        );

        let part = Part::bytes(sample.bytes().to_vec())
            .file_name(self.file_name.clone())
            .mime_str(sample.mime())?;
        let form = Form::new().part(self.file_field.clone(), part);

        let response = self
            .client
            .post(&self.url)
            .query(&[("is_command", mode.is_command())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Recognizer request failed: {}", e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Recognizer Error: {}", status);
            return Err(RecognitionError::Status(status.as_u16()));
        }

        let body: RecognizeResponse = response.json().await?;
        let result = body.into_result();

        if !result.satisfies(mode) {
            let field = if mode.is_command() { "command" } else { "text" };
            debug!(mode = ?mode, "recognizer response has no usable {}", field);
            return Err(RecognitionError::MissingField(field));
        }

        debug!(mode = ?mode, "recognizer answered");
        Ok(result)
    }
}
