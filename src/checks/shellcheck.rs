use async_trait::async_trait;

use super::files::{Excludes, filter_ext, walk_files};
use super::{Check, CheckContext};
use crate::config::ToolCommand;
use crate::diagnostics::{Diagnostic, parse_shellcheck};
use crate::error::Result;
use crate::process::{self, CommandResult};

/// Runs shellcheck over shell scripts.
pub struct ShellCheck {
    ctx: CheckContext,
    files: Option<Vec<String>>,
    excludes: Excludes,
    tool: ToolCommand,
}

impl ShellCheck {
    /// Skips `shellcheck_exclude` plus the extracted workflow scripts, whose
    /// expression placeholders only make sense when linted on their own.
    pub fn new(ctx: CheckContext, files: Option<Vec<String>>) -> Result<Self> {
        let mut entries = ctx.config.shellcheck_exclude.clone();
        entries.push(ctx.config.extracted_scripts_dir.clone());
        let excludes = Excludes::new(&entries);
        let tool = ctx.config.shellcheck()?;
        Ok(Self {
            ctx,
            files,
            excludes,
            tool,
        })
    }

    async fn check(&self, files: &[String]) -> Result<CommandResult> {
        let spec = self
            .ctx
            .command(&self.tool)
            .args(["--format=gcc", "--external-sources"])
            .args(files.iter().cloned());
        process::exec(spec).await
    }
}

#[async_trait]
impl Check for ShellCheck {
    fn name(&self) -> &str {
        "shellcheck"
    }

    fn context(&self) -> &CheckContext {
        &self.ctx
    }

    fn files(&self) -> Option<&[String]> {
        self.files.as_deref()
    }

    fn filter_files(&self, files: &[String]) -> Vec<String> {
        self.excludes
            .retain(filter_ext(files, &self.ctx.config.shell_extensions))
    }

    fn parse(&self, output: &str) -> Vec<Diagnostic> {
        parse_shellcheck(output)
    }

    async fn quick(&self, files: &[String]) -> Result<CommandResult> {
        self.check(files).await
    }

    /// shellcheck has no project mode, so walk the tree for scripts.
    async fn full(&self) -> Result<CommandResult> {
        let scripts = walk_files(
            &self.ctx.root,
            &self.ctx.config.shell_extensions,
            &self.excludes,
        );
        if scripts.is_empty() {
            return Ok(CommandResult::skipped());
        }
        self.check(&scripts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::process::is_available;
    use std::fs;

    const BAD_SCRIPT: &str = "\nsome_variable = '2'\nsome_variable = None\nsome_variable = 11.2";

    #[test]
    fn routes_only_shell_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let check = ShellCheck::new(CheckContext::new(dir.path(), Config::default()), None).unwrap();
        let files = vec!["torch/a.py".to_string(), "test.sh".to_string(), "ci/build.sh".to_string()];
        assert_eq!(check.filter_files(&files), vec!["test.sh", "ci/build.sh"]);
    }

    #[tokio::test]
    async fn full_mode_with_no_scripts_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        let check = ShellCheck::new(CheckContext::new(dir.path(), Config::default()), None).unwrap();
        let report = check.run().await.unwrap();
        assert!(report.passed);
        assert!(report.skipped);
    }

    /// Stand-in shellcheck: two gcc-format findings per script argument.
    const FAKE_SHELLCHECK: &str = r#"for f in "$@"; do
  case "$f" in
    *.sh)
      echo "$f:1:1: error: Tips depend on target shell and yours is unknown. Add a shebang or a 'shell' directive. [SC2148]"
      echo "$f:2:15: error: Remove spaces around = to assign (or use [ ] to compare, or quote '=' if literal). [SC2283]"
      failed=1 ;;
  esac
done
exit "${failed:-0}"
"#;

    fn with_fake_shellcheck(dir: &tempfile::TempDir, cfg: Config) -> Config {
        let fake = dir.path().join("fake-shellcheck");
        fs::write(&fake, FAKE_SHELLCHECK).unwrap();
        Config {
            shellcheck_command: shell_words::join(["bash", fake.to_str().unwrap()]),
            ..cfg
        }
    }

    fn write_scripts(dir: &tempfile::TempDir, paths: &[&str]) {
        for path in paths {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, BAD_SCRIPT).unwrap();
        }
    }

    #[tokio::test]
    async fn full_mode_skips_configured_and_extracted_dirs() {
        let dir = tempfile::tempdir().unwrap();
        write_scripts(
            &dir,
            &["test.sh", "legacy/old.sh", ".extracted_scripts/lint__job__0.sh"],
        );
        let cfg = with_fake_shellcheck(
            &dir,
            Config {
                shellcheck_exclude: vec!["legacy".into()],
                ..Config::default()
            },
        );

        let report = ShellCheck::new(CheckContext::new(dir.path(), cfg), None)
            .unwrap()
            .run()
            .await
            .unwrap();

        assert!(!report.passed);
        let paths: Vec<&str> = report.diagnostics.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["test.sh", "test.sh"]);
    }

    #[tokio::test]
    async fn changed_files_under_excluded_dirs_are_not_checked() {
        let dir = tempfile::tempdir().unwrap();
        write_scripts(&dir, &["legacy/old.sh"]);
        let cfg = with_fake_shellcheck(
            &dir,
            Config {
                shellcheck_exclude: vec!["./legacy".into()],
                ..Config::default()
            },
        );

        let report = ShellCheck::new(
            CheckContext::new(dir.path(), cfg),
            Some(vec!["legacy/old.sh".into()]),
        )
        .unwrap()
        .run()
        .await
        .unwrap();

        assert!(report.passed);
        assert!(report.skipped);
    }

    #[tokio::test]
    async fn fake_shellcheck_output_renders_rule_codes() {
        let dir = tempfile::tempdir().unwrap();
        write_scripts(&dir, &["test.sh"]);
        let cfg = with_fake_shellcheck(&dir, Config::default());

        let report = ShellCheck::new(
            CheckContext::new(dir.path(), cfg),
            Some(vec!["test.sh".into(), "a.py".into()]),
        )
        .unwrap()
        .run()
        .await
        .unwrap();

        let codes: Vec<&str> = report.diagnostics.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["SC2148", "SC2283"]);
        assert!(report.render(false).starts_with(
            "x shellcheck\ntest.sh:1:1: SC2148 Tips depend on target shell"
        ));
    }

    #[tokio::test]
    async fn reports_rule_codes_for_a_bad_script() {
        if !is_available("shellcheck").await {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("test.sh"), BAD_SCRIPT).unwrap();

        let check = ShellCheck::new(
            CheckContext::new(dir.path(), Config::default()),
            Some(vec!["test.sh".into()]),
        )
        .unwrap();
        let report = check.run().await.unwrap();
        let rendered = report.render(false);

        assert!(!report.passed);
        assert!(rendered.starts_with("x shellcheck\n"));
        assert!(rendered.contains("SC2148"));
        assert!(rendered.contains("Tips depend on target shell"));
        assert!(rendered.contains("SC2283"));
        assert!(rendered.contains("Remove spaces around = to assign"));
    }
}
