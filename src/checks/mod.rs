//! Runnable lint tasks.
//!
//! A [`Check`] runs one external tool either against an explicit file list
//! (`quick`) or against the whole repository (`full`) and turns the result
//! into a [`CheckReport`].

pub mod files;
mod flake8;
mod mypy;
mod report;
mod shellcheck;
mod yaml_step;

pub use flake8::Flake8;
pub use mypy::Mypy;
pub use report::CheckReport;
pub use shellcheck::ShellCheck;
pub use yaml_step::YamlStep;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use tracing::info;

use crate::config::{Config, ToolCommand};
use crate::diagnostics::Diagnostic;
use crate::error::{Error, Result};
use crate::process::{CommandResult, CommandSpec};

/// State shared by every check in one run.
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub root: PathBuf,
    pub config: Config,
    /// Quiet mode trims workflow scripts and does not echo commands.
    pub quiet: bool,
}

impl CheckContext {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
            quiet: true,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Launch `tool` from the repository root with the configured timeout.
    pub fn command(&self, tool: &ToolCommand) -> CommandSpec {
        CommandSpec::new(&tool.program)
            .args(tool.args.iter().cloned())
            .cwd(&self.root)
            .timeout(self.config.timeout())
    }
}

#[async_trait]
pub trait Check: Send + Sync {
    /// Label printed after the pass/fail marker.
    fn name(&self) -> &str;

    fn context(&self) -> &CheckContext;

    /// Candidate files, or `None` to check the whole repository.
    fn files(&self) -> Option<&[String]>;

    /// Keep only the files this tool should see.
    fn filter_files(&self, files: &[String]) -> Vec<String> {
        files.to_vec()
    }

    /// Turn tool output into diagnostics. Tools without a known format
    /// report raw output instead.
    fn parse(&self, _output: &str) -> Vec<Diagnostic> {
        Vec::new()
    }

    async fn quick(&self, files: &[String]) -> Result<CommandResult>;

    async fn full(&self) -> Result<CommandResult>;

    /// Dispatch to `quick` or `full`. An explicit file list with nothing
    /// relevant in it passes without spawning anything.
    async fn run_helper(&self) -> Result<CommandResult> {
        match self.files() {
            Some(files) => {
                let relevant = self.filter_files(files);
                if relevant.is_empty() {
                    return Ok(CommandResult::skipped());
                }
                self.quick(&relevant).await
            }
            None => self.full().await,
        }
    }

    async fn run(&self) -> Result<CheckReport> {
        let result = self.run_helper().await?;
        let diagnostics = if result.passed {
            Vec::new()
        } else {
            self.parse(&result.stdout)
        };
        info!(
            check = self.name(),
            passed = result.passed,
            skipped = result.skipped,
            diagnostics = diagnostics.len(),
            "check finished"
        );

        let mut report = CheckReport::new(self.name(), &result, diagnostics);
        if !self.context().quiet && !result.command.is_empty() {
            report.commands.push(result.command);
        }
        Ok(report)
    }
}

/// The lint tasks that can run without a workflow file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintTask {
    Flake8,
    ShellCheck,
    Mypy,
}

impl LintTask {
    pub const DEFAULT: &'static [LintTask] = &[LintTask::Flake8, LintTask::ShellCheck];

    pub fn as_str(&self) -> &'static str {
        match self {
            LintTask::Flake8 => "flake8",
            LintTask::ShellCheck => "shellcheck",
            LintTask::Mypy => "mypy",
        }
    }

    /// Build the check. `files` of `None` means the whole repository.
    pub fn build(self, ctx: &CheckContext, files: Option<Vec<String>>) -> Result<Box<dyn Check>> {
        Ok(match self {
            LintTask::Flake8 => Box::new(Flake8::new(ctx.clone(), files)?),
            LintTask::ShellCheck => Box::new(ShellCheck::new(ctx.clone(), files)?),
            LintTask::Mypy => Box::new(Mypy::new(ctx.clone(), files)?),
        })
    }
}

impl FromStr for LintTask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flake8" | "flake8-py3" => Ok(LintTask::Flake8),
            "shellcheck" => Ok(LintTask::ShellCheck),
            "mypy" => Ok(LintTask::Mypy),
            _ => Err(Error::UnknownTask(s.to_string())),
        }
    }
}

impl fmt::Display for LintTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
