/// Recoverable conditions reported by the dialogue engine.
/// None of them tears the session down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DialogueError {
    #[error("empty audio sample")]
    EmptyInput,

    /// The recognizer was unreachable, failed, or understood nothing.
    #[error("recognition failed")]
    RecognitionFailed,

    #[error("all slots are filled; confirm or reset first")]
    SessionComplete,

    #[error("another utterance is still being recognized")]
    SessionBusy,

    #[error("recognition cancelled")]
    Cancelled,

    /// The session was reset while recognition was in flight; the late result was dropped.
    #[error("session changed while recognition was in flight")]
    Superseded,

    #[error("command is not complete")]
    NotComplete,
}
