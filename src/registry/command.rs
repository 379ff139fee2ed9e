use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of commands the assistant can carry out.
/// Serialized with the canonical identifiers the recognizer backend and
/// config files use (`transfer`, `mobileCharge`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    Transfer,
    MobileCharge,
    CheckNumberValidation,
    RemainderCheck,
}

impl CommandKind {
    pub const ALL: [CommandKind; 4] = [
        CommandKind::Transfer,
        CommandKind::MobileCharge,
        CommandKind::CheckNumberValidation,
        CommandKind::RemainderCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Transfer => "transfer",
            CommandKind::MobileCharge => "mobileCharge",
            CommandKind::CheckNumberValidation => "checkNumberValidation",
            CommandKind::RemainderCheck => "remainderCheck",
        }
    }

    /// Ordered slot schema. Order is the order the dialogue asks for values.
    pub fn slots(&self) -> &'static [SlotSpec] {
        match self {
            CommandKind::Transfer => TRANSFER_SLOTS,
            CommandKind::MobileCharge => MOBILE_CHARGE_SLOTS,
            CommandKind::CheckNumberValidation => CHECK_NUMBER_SLOTS,
            CommandKind::RemainderCheck => REMAINDER_CHECK_SLOTS,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    /// Spoken numbers are coerced to an integer value.
    Number,
}

/// One named field of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SlotSpec {
    pub name: &'static str,
    /// What the user is asked to say.
    pub label: &'static str,
    pub value_kind: ValueKind,
}

impl SlotSpec {
    const fn text(name: &'static str, label: &'static str) -> Self {
        Self { name, label, value_kind: ValueKind::Text }
    }

    const fn number(name: &'static str, label: &'static str) -> Self {
        Self { name, label, value_kind: ValueKind::Number }
    }
}

const TRANSFER_SLOTS: &[SlotSpec] = &[
    SlotSpec::text("source_account", "Source Account"),
    SlotSpec::text("destination_account", "Destination Account"),
    SlotSpec::number("amount", "Amount"),
];

// Phone numbers keep their leading zero, so they stay text.
const MOBILE_CHARGE_SLOTS: &[SlotSpec] = &[
    SlotSpec::text("number", "Number"),
    SlotSpec::number("amount", "Amount"),
];

const CHECK_NUMBER_SLOTS: &[SlotSpec] = &[SlotSpec::text("check_number", "Check Number")];

const REMAINDER_CHECK_SLOTS: &[SlotSpec] = &[SlotSpec::text("source_account", "Source Account")];
