use std::collections::HashMap;

use super::command::{CommandKind, SlotSpec};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unrecognized command: {0:?}")]
    UnrecognizedCommand(String),
}

/// Spoken aliases shipped with the assistant (Persian).
const BUILTIN_ALIASES: &[(&str, CommandKind)] = &[
    ("انتقال", CommandKind::Transfer),
    ("شارژ", CommandKind::MobileCharge),
    ("چک", CommandKind::CheckNumberValidation),
    ("موجودی", CommandKind::RemainderCheck),
];

/// Static lookup table from spoken aliases to commands.
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    aliases: HashMap<String, CommandKind>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandRegistry {
    pub fn builtin() -> Self {
        Self::with_aliases(std::iter::empty::<(&str, CommandKind)>())
    }

    /// Built-in aliases plus `extra`. An extra alias replaces a built-in one with the same token.
    pub fn with_aliases<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = (S, CommandKind)>,
        S: AsRef<str>,
    {
        let mut aliases: HashMap<String, CommandKind> = BUILTIN_ALIASES
            .iter()
            .map(|(token, kind)| (normalize_token(token), *kind))
            .collect();

        for (token, kind) in extra {
            let token = normalize_token(token.as_ref());
            if !token.is_empty() {
                aliases.insert(token, kind);
            }
        }

        Self { aliases }
    }

    pub fn resolve_alias(&self, token: &str) -> Result<CommandKind, RegistryError> {
        self.aliases
            .get(&normalize_token(token))
            .copied()
            .ok_or_else(|| RegistryError::UnrecognizedCommand(token.to_string()))
    }

    pub fn slots_for(&self, kind: CommandKind) -> &'static [SlotSpec] {
        kind.slots()
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, CommandKind)> {
        self.aliases.iter().map(|(token, kind)| (token.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

// Recognizers tend to add stray punctuation around single-word commands.
fn normalize_token(token: &str) -> String {
    token
        .trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation() || matches!(c, '؟' | '،' | '؛'))
        .chars()
        .filter(|c| *c != '\u{200c}')
        .map(fold_persian_letter)
        .collect::<String>()
        .to_lowercase()
}

/// Arabic kaf and yeh, as some recognizers emit them, read as their Persian forms.
pub(crate) fn fold_persian_letter(c: char) -> char {
    match c {
        'ك' => 'ک',
        'ي' | 'ى' => 'ی',
        _ => c,
    }
}
