use serde::Serialize;
use std::fmt;

use crate::registry::SlotSpec;

/// What the dialogue should ask the user for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "prompt", rename_all = "snake_case")]
pub enum Prompt {
    SpeakCommand,
    SpeakSlot { slot: SlotSpec },
    ConfirmOrReset,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::SpeakCommand => f.write_str("Speak a command"),
            Prompt::SpeakSlot { slot } => write!(f, "Say this: {}", slot.label),
            Prompt::ConfirmOrReset => f.write_str("Confirm or reset"),
        }
    }
}
