use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors. Lint findings are never reported through this type; they
/// travel in a [`CheckReport`](crate::checks::CheckReport) instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read workflow {path}: {source}")]
    WorkflowRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed workflow {path}: {source}")]
    WorkflowParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("top level key 'jobs' not found in {0}")]
    MissingJobs(PathBuf),

    #[error("job '{job}' not found in {path}")]
    JobNotFound { job: String, path: PathBuf },

    #[error("steps not found in job '{job}': {}", missing.join(", "))]
    MissingSteps { job: String, missing: Vec<String> },

    #[error("no steps requested; pass at least one --step")]
    NoSteps,

    #[error("unknown lint task '{0}' (expected flake8, shellcheck or mypy)")]
    UnknownTask(String),

    #[error("`{tool}` not found; is it installed and on PATH?")]
    ToolNotFound { tool: String },

    #[error("failed to run `{tool}`: {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },

    #[error("git {args} failed: {stderr}")]
    Git { args: String, stderr: String },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid argument list '{input}': {source}")]
    Args {
        input: String,
        source: shell_words::ParseError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
