use serde::Serialize;
use std::fmt;

use super::prompt::Prompt;
use crate::registry::{CommandKind, SlotSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SlotValue {
    Text(String),
    Number(u64),
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotValue::Text(text) => f.write_str(text),
            SlotValue::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedValue {
    pub slot: SlotSpec,
    pub value: SlotValue,
}

/// A command with every slot filled, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRecord {
    pub kind: CommandKind,
    pub values: Vec<CollectedValue>,
}

impl CommandRecord {
    pub fn get(&self, slot_name: &str) -> Option<&SlotValue> {
        self.values
            .iter()
            .find(|collected| collected.slot.name == slot_name)
            .map(|collected| &collected.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DialogueState {
    AwaitingCommand,
    /// Waiting for the value of slot `k - 1` (1-based stage).
    AwaitingSlot(usize),
    /// Every slot is filled. Only `reset` or `confirm` leave this state.
    Complete,
}

/// Strict session delta. This is the ONLY way a session mutates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionDelta {
    CommandRejected,
    CommandSelected(CommandKind),
    SlotFilled(CollectedValue),
    Reset,
}

/// State of one conversation.
///
/// The stage is derived from the selected command and the number of
/// collected values, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueSession {
    selected: Option<CommandKind>,
    collected: Vec<CollectedValue>,
    command_valid: bool,
    // Monotonic version for epoch validation of in-flight recognitions
    version: u64,
}

impl Default for DialogueSession {
    fn default() -> Self {
        Self {
            selected: None,
            collected: Vec::new(),
            command_valid: true,
            version: 0,
        }
    }
}

impl DialogueSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_command(&self) -> Option<CommandKind> {
        self.selected
    }

    pub fn collected_values(&self) -> &[CollectedValue] {
        &self.collected
    }

    pub fn command_valid(&self) -> bool {
        self.command_valid
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// 0 while no command is selected, otherwise 1 + number of filled slots.
    pub fn stage(&self) -> usize {
        match self.selected {
            None => 0,
            Some(_) => self.collected.len() + 1,
        }
    }

    pub fn state(&self) -> DialogueState {
        match self.selected {
            None => DialogueState::AwaitingCommand,
            Some(kind) if self.collected.len() >= kind.slots().len() => DialogueState::Complete,
            Some(_) => DialogueState::AwaitingSlot(self.stage()),
        }
    }

    /// The slot the next utterance fills, if any.
    pub fn pending_slot(&self) -> Option<SlotSpec> {
        match (self.selected, self.state()) {
            (Some(kind), DialogueState::AwaitingSlot(k)) => kind.slots().get(k - 1).copied(),
            _ => None,
        }
    }

    pub fn prompt(&self) -> Prompt {
        match self.state() {
            DialogueState::AwaitingCommand => Prompt::SpeakCommand,
            DialogueState::Complete => Prompt::ConfirmOrReset,
            DialogueState::AwaitingSlot(_) => match self.pending_slot() {
                Some(slot) => Prompt::SpeakSlot { slot },
                None => Prompt::ConfirmOrReset,
            },
        }
    }

    /// The finished command; only available once the session is complete.
    pub fn record(&self) -> Option<CommandRecord> {
        match (self.selected, self.state()) {
            (Some(kind), DialogueState::Complete) => Some(CommandRecord {
                kind,
                values: self.collected.clone(),
            }),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: self.version,
            state: self.state(),
            stage: self.stage(),
            selected_command: self.selected,
            prompt: self.prompt(),
            collected: self.collected.clone(),
            command_valid: self.command_valid,
        }
    }

    /// Pure reduction: Session + Delta -> Mutated Session
    pub fn reduce(&mut self, delta: SessionDelta) {
        self.version += 1;

        match delta {
            SessionDelta::CommandRejected => {
                self.command_valid = false;
            }
            SessionDelta::CommandSelected(kind) => {
                self.selected = Some(kind);
                self.collected.clear();
                self.command_valid = true;
            }
            SessionDelta::SlotFilled(value) => {
                debug_assert_eq!(self.pending_slot(), Some(value.slot), "slot filled out of order");
                self.collected.push(value);
            }
            SessionDelta::Reset => {
                self.selected = None;
                self.collected.clear();
                self.command_valid = true;
            }
        }
    }
}

/// Read-only projection handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub version: u64,
    pub state: DialogueState,
    pub stage: usize,
    pub selected_command: Option<CommandKind>,
    pub prompt: Prompt,
    pub collected: Vec<CollectedValue>,
    pub command_valid: bool,
}
