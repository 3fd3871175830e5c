pub mod commands;
pub mod orchestrator;
mod types;

pub use commands::{lint_checks, workflow_steps};
pub use orchestrator::{run_checks, run_steps};
pub use types::{RunReport, Summary};
