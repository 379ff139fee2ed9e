pub mod audio;
pub mod config;
pub mod dialogue;
pub mod logging;
pub mod outputs;
pub mod registry;
pub mod services;

// Re-export specific items for convenient access
pub use dialogue::engine::DialogueEngine;
