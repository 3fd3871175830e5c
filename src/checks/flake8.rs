use async_trait::async_trait;

use super::files::{Excludes, filter_ext};
use super::{Check, CheckContext};
use crate::config::{self, ToolCommand};
use crate::diagnostics::{Diagnostic, parse_flake8};
use crate::error::Result;
use crate::process::{self, CommandResult, CommandSpec};

/// Runs flake8 over Python sources and stubs.
pub struct Flake8 {
    ctx: CheckContext,
    files: Option<Vec<String>>,
    excludes: Excludes,
    tool: ToolCommand,
}

impl Flake8 {
    /// Excludes come from `flake8_exclude` in the config, or from the
    /// repository's `.flake8` when the config lists none.
    pub fn new(ctx: CheckContext, files: Option<Vec<String>>) -> Result<Self> {
        let excludes = if ctx.config.flake8_exclude.is_empty() {
            Excludes::new(&config::flake8_excludes(&ctx.root))
        } else {
            Excludes::new(&ctx.config.flake8_exclude)
        };
        let tool = ctx.config.flake8()?;
        Ok(Self {
            ctx,
            files,
            excludes,
            tool,
        })
    }

    /// flake8 picks up `.flake8` by itself; excludes from our own config
    /// have to be handed over.
    fn full_spec(&self) -> CommandSpec {
        let exclude = &self.ctx.config.flake8_exclude;
        let extend = (!exclude.is_empty()).then(|| {
            let entries: Vec<&str> = exclude.iter().map(|e| e.trim()).collect();
            format!("--extend-exclude={}", entries.join(","))
        });
        self.ctx.command(&self.tool).args(extend)
    }
}

#[async_trait]
impl Check for Flake8 {
    fn name(&self) -> &str {
        "flake8"
    }

    fn context(&self) -> &CheckContext {
        &self.ctx
    }

    fn files(&self) -> Option<&[String]> {
        self.files.as_deref()
    }

    fn filter_files(&self, files: &[String]) -> Vec<String> {
        self.excludes
            .retain(filter_ext(files, &self.ctx.config.python_extensions))
    }

    fn parse(&self, output: &str) -> Vec<Diagnostic> {
        parse_flake8(output)
    }

    async fn quick(&self, files: &[String]) -> Result<CommandResult> {
        let spec = self.ctx.command(&self.tool).args(files.iter().cloned());
        process::exec(spec).await
    }

    async fn full(&self) -> Result<CommandResult> {
        process::exec(self.full_spec()).await
    }
}
