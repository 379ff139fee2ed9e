pub mod coerce;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod session;

pub use coerce::{parse_spoken_number, CoercionWarning};
pub use engine::{DialogueEngine, SubmitOutcome};
pub use error::DialogueError;
pub use prompt::Prompt;
pub use session::{
    CollectedValue, CommandRecord, DialogueSession, DialogueState, SessionDelta, SessionSnapshot, SlotValue,
};
