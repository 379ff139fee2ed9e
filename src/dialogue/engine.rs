//! The dialogue engine.
//!
//! # Invariants
//! - One session per engine. It mutates only through [`SessionDelta`], and
//!   only the engine applies deltas.
//! - At most one `submit_utterance` is in flight; a second one fails with
//!   [`DialogueError::SessionBusy`] instead of interleaving.
//! - The recognizer call is the only suspension point. Nothing is written
//!   before it returns, so a cancelled or dropped submit leaves the session
//!   exactly as it was.
//! - A result computed against a session version that has since moved on
//!   (a `reset` landed mid-flight) is discarded.
//! - Observers see committed sessions only.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::coerce::{coerce, CoercionWarning};
use super::error::DialogueError;
use super::prompt::Prompt;
use super::session::{
    CollectedValue, CommandRecord, DialogueSession, DialogueState, SessionDelta, SessionSnapshot, SlotValue,
};
use crate::audio::AudioSample;
use crate::registry::{CommandKind, CommandRegistry, RegistryError, SlotSpec};
use crate::services::recognizer::{RecognitionMode, RecognitionResult, Recognizer};

/// What a successful submit did to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmitOutcome {
    /// The token is not a known alias. The session stays in `AwaitingCommand`.
    InvalidCommand { token: String },
    CommandSelected { kind: CommandKind },
    SlotFilled {
        slot: SlotSpec,
        value: SlotValue,
        next: SlotSpec,
        warning: Option<CoercionWarning>,
    },
    AllSlotsFilled {
        record: CommandRecord,
        warning: Option<CoercionWarning>,
    },
}

/// A planned step: the delta to commit and the outcome to report once it is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub delta: SessionDelta,
    pub outcome: SubmitOutcome,
}

/// Which recognition the current state needs; `None` once complete.
pub fn mode_for(state: DialogueState) -> Option<RecognitionMode> {
    match state {
        DialogueState::AwaitingCommand => Some(RecognitionMode::ClassifyCommand),
        DialogueState::AwaitingSlot(_) => Some(RecognitionMode::ExtractValue),
        DialogueState::Complete => None,
    }
}

/// Pure transition: Session + Recognition -> Transition. Does not mutate.
pub fn advance(
    session: &DialogueSession,
    registry: &CommandRegistry,
    recognition: &RecognitionResult,
) -> Result<Transition, DialogueError> {
    match (session.selected_command(), session.state()) {
        (_, DialogueState::Complete) => Err(DialogueError::SessionComplete),

        (Some(kind), DialogueState::AwaitingSlot(k)) => {
            let raw = recognition.value_text().ok_or(DialogueError::RecognitionFailed)?;
            let slots = registry.slots_for(kind);
            let slot = *slots.get(k - 1).ok_or(DialogueError::SessionComplete)?;

            let (value, warning) = coerce(slot, raw);
            let collected = CollectedValue { slot, value: value.clone() };

            let outcome = match slots.get(k) {
                Some(&next) => SubmitOutcome::SlotFilled { slot, value, next, warning },
                None => {
                    let mut values = session.collected_values().to_vec();
                    values.push(collected.clone());
                    SubmitOutcome::AllSlotsFilled {
                        record: CommandRecord { kind, values },
                        warning,
                    }
                }
            };

            Ok(Transition {
                delta: SessionDelta::SlotFilled(collected),
                outcome,
            })
        }

        _ => {
            let token = recognition.command_token().ok_or(DialogueError::RecognitionFailed)?;
            match registry.resolve_alias(token) {
                Ok(kind) => Ok(Transition {
                    delta: SessionDelta::CommandSelected(kind),
                    outcome: SubmitOutcome::CommandSelected { kind },
                }),
                Err(RegistryError::UnrecognizedCommand(token)) => Ok(Transition {
                    delta: SessionDelta::CommandRejected,
                    outcome: SubmitOutcome::InvalidCommand { token },
                }),
            }
        }
    }
}

// Released on drop, so an abandoned submit future frees the session too.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives one slot-filling conversation.
pub struct DialogueEngine {
    id: Uuid,
    registry: Arc<CommandRegistry>,
    recognizer: Arc<dyn Recognizer>,
    session: watch::Sender<DialogueSession>,
    in_flight: AtomicBool,
}

impl DialogueEngine {
    pub fn new(registry: Arc<CommandRegistry>, recognizer: Arc<dyn Recognizer>) -> Self {
        let (session, _) = watch::channel(DialogueSession::new());
        Self {
            id: Uuid::new_v4(),
            registry,
            recognizer,
            session,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Receiver that observes every committed session.
    pub fn subscribe(&self) -> watch::Receiver<DialogueSession> {
        self.session.subscribe()
    }

    pub fn session(&self) -> DialogueSession {
        self.session.borrow().clone()
    }

    pub fn state(&self) -> DialogueState {
        self.session.borrow().state()
    }

    pub fn current_prompt(&self) -> Prompt {
        self.session.borrow().prompt()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.borrow().snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Recognize one utterance and advance the session with the result.
    pub async fn submit_utterance(&self, sample: &AudioSample) -> Result<SubmitOutcome, DialogueError> {
        self.submit(sample, None).await
    }

    /// Like [`submit_utterance`](Self::submit_utterance), but gives up with
    /// `Cancelled` when `cancel` fires before the recognizer answers.
    pub async fn submit_utterance_with_cancel(
        &self,
        sample: &AudioSample,
        cancel: &CancellationToken,
    ) -> Result<SubmitOutcome, DialogueError> {
        self.submit(sample, Some(cancel)).await
    }

    /// Abandon the current command. Always succeeds, from any state.
    pub fn reset(&self) {
        self.session.send_modify(|session| session.reduce(SessionDelta::Reset));
    }

    /// Acknowledge a completed command: returns it and starts over.
    pub fn confirm(&self) -> Result<CommandRecord, DialogueError> {
        let mut confirmed = None;
        self.session.send_if_modified(|session| match session.record() {
            Some(record) => {
                confirmed = Some(record);
                session.reduce(SessionDelta::Reset);
                true
            }
            None => false,
        });
        confirmed.ok_or(DialogueError::NotComplete)
    }

    async fn submit(
        &self,
        sample: &AudioSample,
        cancel: Option<&CancellationToken>,
    ) -> Result<SubmitOutcome, DialogueError> {
        if sample.is_empty() {
            return Err(DialogueError::EmptyInput);
        }

        let _guard = self.acquire()?;

        let observed = self.session();
        let mode = mode_for(observed.state()).ok_or(DialogueError::SessionComplete)?;

        let recognition = self.recognize(sample, mode, cancel).await?;
        let transition = advance(&observed, &self.registry, &recognition)?;

        self.commit(observed.version(), transition.delta)?;
        Ok(transition.outcome)
    }

    fn acquire(&self) -> Result<InFlightGuard<'_>, DialogueError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightGuard(&self.in_flight))
            .map_err(|_| DialogueError::SessionBusy)
    }

    async fn recognize(
        &self,
        sample: &AudioSample,
        mode: RecognitionMode,
        cancel: Option<&CancellationToken>,
    ) -> Result<RecognitionResult, DialogueError> {
        let call = self.recognizer.recognize(sample, mode);

        let result = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(DialogueError::Cancelled),
                result = call => result,
            },
            None => call.await,
        };

        // Service down and nothing understood are the same thing to the dialogue
        result.map_err(|_| DialogueError::RecognitionFailed)
    }

    /// STALE REJECTION: only commit if nothing else touched the session meanwhile.
    fn commit(&self, observed_version: u64, delta: SessionDelta) -> Result<(), DialogueError> {
        let mut superseded = false;
        self.session.send_if_modified(|session| {
            if session.version() != observed_version {
                superseded = true;
                return false;
            }
            session.reduce(delta);
            true
        });

        if superseded {
            Err(DialogueError::Superseded)
        } else {
            Ok(())
        }
    }
}
