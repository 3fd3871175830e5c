use async_trait::async_trait;

use super::files::filter_ext;
use super::{Check, CheckContext};
use crate::config::ToolCommand;
use crate::diagnostics::{Diagnostic, parse_mypy};
use crate::error::Result;
use crate::process::{self, CommandResult};

/// Runs mypy. Without a file list, mypy's own config decides what to check.
pub struct Mypy {
    ctx: CheckContext,
    files: Option<Vec<String>>,
    tool: ToolCommand,
}

impl Mypy {
    pub fn new(ctx: CheckContext, files: Option<Vec<String>>) -> Result<Self> {
        let tool = ctx.config.mypy()?;
        Ok(Self { ctx, files, tool })
    }
}

#[async_trait]
impl Check for Mypy {
    fn name(&self) -> &str {
        "mypy"
    }

    fn context(&self) -> &CheckContext {
        &self.ctx
    }

    fn files(&self) -> Option<&[String]> {
        self.files.as_deref()
    }

    fn filter_files(&self, files: &[String]) -> Vec<String> {
        filter_ext(files, &self.ctx.config.python_extensions)
    }

    fn parse(&self, output: &str) -> Vec<Diagnostic> {
        parse_mypy(output)
    }

    async fn quick(&self, files: &[String]) -> Result<CommandResult> {
        let spec = self.ctx.command(&self.tool).args(files.iter().cloned());
        process::exec(spec).await
    }

    async fn full(&self) -> Result<CommandResult> {
        process::exec(self.ctx.command(&self.tool)).await
    }
}
