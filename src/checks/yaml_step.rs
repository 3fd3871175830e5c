use std::borrow::Cow;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Check, CheckContext};
use crate::error::Result;
use crate::process::{self, CommandResult};
use crate::workflow::Step;

static LEADING_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^time ").expect("valid regex"));

/// One `run:` step lifted out of a workflow job.
pub struct YamlStep {
    ctx: CheckContext,
    step: Step,
    name: String,
}

impl YamlStep {
    pub fn new(step: Step, job_name: &str, ctx: CheckContext) -> Self {
        let name = format!("{job_name}: {}", step.label());
        Self { ctx, step, name }
    }

    /// The script that will actually run. Quiet mode drops `set -x` tracing
    /// and `time` prefixes so passing steps stay silent.
    pub fn script(&self) -> Option<Cow<'_, str>> {
        let script = self.step.run.as_deref()?;
        if !self.ctx.quiet {
            return Some(Cow::Borrowed(script));
        }
        let untraced = script.replace("set -eux", "set -eu");
        Some(Cow::Owned(
            LEADING_TIME.replace_all(&untraced, "").into_owned(),
        ))
    }
}

#[async_trait]
impl Check for YamlStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn context(&self) -> &CheckContext {
        &self.ctx
    }

    fn files(&self) -> Option<&[String]> {
        None
    }

    async fn quick(&self, _files: &[String]) -> Result<CommandResult> {
        self.full().await
    }

    async fn full(&self) -> Result<CommandResult> {
        let Some(script) = self.script() else {
            return Ok(CommandResult::skipped());
        };

        // Step env comes last so a step may override the workspace.
        let workspace = std::env::temp_dir().to_string_lossy().into_owned();
        let mut env = vec![("GITHUB_WORKSPACE".to_string(), workspace)];
        env.extend(self.step.env_vars());
        let spec =
            process::shell(&script, &self.ctx.root, env).timeout(self.ctx.config.timeout());
        process::exec(spec).await
    }
}
