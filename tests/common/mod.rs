#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use voicebank::audio::AudioSample;
use voicebank::registry::CommandRegistry;
use voicebank::services::recognizer::{RecognitionError, RecognitionMode, RecognitionResult, Recognizer};
use voicebank::DialogueEngine;

/// Recognizer that replays canned answers in order and records the modes it was asked for.
#[derive(Default)]
pub struct ScriptedRecognizer {
    answers: Mutex<VecDeque<Result<RecognitionResult, RecognitionError>>>,
    modes: Mutex<Vec<RecognitionMode>>,
    calls: AtomicUsize,
    /// Signalled when a call starts.
    pub started: Arc<Notify>,
    /// When set, each call waits for a permit before answering.
    gate: Option<Arc<Notify>>,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn then(self, answer: RecognitionResult) -> Self {
        self.answers.lock().unwrap().push_back(Ok(answer));
        self
    }

    pub fn then_command(self, token: &str) -> Self {
        self.then(RecognitionResult::command(token))
    }

    pub fn then_text(self, text: &str) -> Self {
        self.then(RecognitionResult::text(text))
    }

    pub fn then_status(self, status: u16) -> Self {
        self.answers.lock().unwrap().push_back(Err(RecognitionError::Status(status)));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn modes(&self) -> Vec<RecognitionMode> {
        self.modes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Recognizer for ScriptedRecognizer {
    async fn recognize(
        &self,
        _sample: &AudioSample,
        mode: RecognitionMode,
    ) -> Result<RecognitionResult, RecognitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.modes.lock().unwrap().push(mode);
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(RecognitionResult::default()))
    }
}

pub fn sample() -> AudioSample {
    AudioSample::new(vec![0x52, 0x49, 0x46, 0x46, 0x01, 0x02], "audio/wav")
}

pub fn engine_with(recognizer: Arc<ScriptedRecognizer>) -> DialogueEngine {
    DialogueEngine::new(Arc::new(CommandRegistry::builtin()), recognizer)
}
