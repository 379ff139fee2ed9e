pub mod command;
pub mod table;

pub use command::{CommandKind, SlotSpec, ValueKind};
pub use table::{CommandRegistry, RegistryError};
