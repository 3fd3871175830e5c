//! Subprocess supervision: spawn, capture, classify the exit.

pub mod run;
pub mod types;

pub use run::{exec, is_available, shell};
pub use types::{CommandResult, CommandSpec};
