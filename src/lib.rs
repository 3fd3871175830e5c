//! Re-run GitHub Actions lint steps and linters locally.
//!
//! Workflow steps are lifted out of `.github/workflows/*.yml` and replayed
//! with bash; flake8, shellcheck and mypy run against either the whole
//! repository or just the files changed since a base ref. Linters run as
//! subprocesses on one cooperative task, so their waits overlap.

pub mod checks;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod vcs;
pub mod workflow;

pub use error::{Error, Result};
