use std::fmt::Write;

use crate::dialogue::{DialogueError, SessionSnapshot, SubmitOutcome};

/// PURE FUNCTION: one line describing what a submit did.
pub fn render_outcome(outcome: &SubmitOutcome) -> String {
    let mut line = match outcome {
        SubmitOutcome::InvalidCommand { token } => {
            format!("Invalid command {:?}! Please record again.", token)
        }
        SubmitOutcome::CommandSelected { kind } => format!("Command selected: {}", kind),
        SubmitOutcome::SlotFilled { slot, value, next, .. } => {
            format!("{}: {} (next: {})", slot.label, value, next.label)
        }
        SubmitOutcome::AllSlotsFilled { record, .. } => {
            format!("All {} fields of {} collected.", record.values.len(), record.kind)
        }
    };

    let warning = match outcome {
        SubmitOutcome::SlotFilled { warning, .. } | SubmitOutcome::AllSlotsFilled { warning, .. } => warning.as_ref(),
        _ => None,
    };
    if let Some(w) = warning {
        let _ = write!(line, " [{} kept as text: {:?} is not a number]", w.slot.label, w.raw);
    }
    line
}

pub fn render_error(error: &DialogueError) -> String {
    match error {
        DialogueError::EmptyInput => "Nothing was recorded.".to_string(),
        DialogueError::RecognitionFailed => "Could not understand that. Please try again.".to_string(),
        DialogueError::SessionComplete => "All fields are filled. Confirm or reset.".to_string(),
        DialogueError::SessionBusy => "Still working on the previous recording.".to_string(),
        other => format!("{}.", capitalize(&other.to_string())),
    }
}

/// PURE FUNCTION: multi-line view of the session for console front ends.
pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();

    if let Some(kind) = snapshot.selected_command {
        let _ = writeln!(out, "Command selected: {}", kind);
    }
    if !snapshot.command_valid {
        let _ = writeln!(out, "Invalid command! Please record again.");
    }
    if !snapshot.collected.is_empty() {
        let _ = writeln!(out, "Extracted Texts:");
        for collected in &snapshot.collected {
            let _ = writeln!(out, "  {}: {}", collected.slot.label, collected.value);
        }
    }
    let _ = write!(out, "{}", snapshot.prompt);
    out
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
