use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use super::types::{CommandResult, CommandSpec};
use crate::error::{Error, Result};

/// Spawn a subprocess and wait for it, capturing stdout and stderr.
///
/// The future yields while the child runs, so several `exec` calls polled
/// together overlap their waiting. A missing executable is a fatal
/// [`Error::ToolNotFound`]; a non-zero exit, a signal, or a timeout is a
/// failing [`CommandResult`].
pub async fn exec(spec: CommandSpec) -> Result<CommandResult> {
    debug!(command = %spec.display(), "spawning");

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = &spec.cwd {
        cmd.current_dir(dir);
    }
    for (key, value) in &spec.env {
        cmd.env(key, value);
    }

    let child = cmd.spawn().map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::ToolNotFound {
            tool: spec.program.clone(),
        },
        _ => Error::Spawn {
            tool: spec.program.clone(),
            source,
        },
    })?;

    let waited = match spec.timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(output) => output,
            Err(_) => {
                // Dropping the future drops the child, and kill_on_drop reaps it.
                warn!(command = %spec.display(), ?limit, "timed out");
                return Ok(CommandResult {
                    command: spec.display(),
                    passed: false,
                    exit_code: None,
                    stdout: String::new(),
                    stderr: format!("`{}` timed out after {:?}", spec.program, limit),
                    signaled: false,
                    timed_out: true,
                    skipped: false,
                });
            }
        },
        None => child.wait_with_output().await,
    };
    let output = waited.map_err(|source| Error::Spawn {
        tool: spec.program.clone(),
        source,
    })?;

    let exit_code = output.status.code();
    let signaled = exit_code.is_none();
    let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if signaled {
        if !stderr.is_empty() && !stderr.ends_with('\n') {
            stderr.push('\n');
        }
        stderr.push_str(&format!("`{}` terminated by {}", spec.program, output.status));
    }

    debug!(command = %spec.program, ?exit_code, "finished");

    Ok(CommandResult {
        command: spec.display(),
        passed: exit_code == Some(0),
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr,
        signaled,
        timed_out: false,
        skipped: false,
    })
}

/// Build a `bash -c <script>` invocation with extra environment.
pub fn shell<I, K, V>(script: &str, cwd: &Path, env: I) -> CommandSpec
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    env.into_iter().fold(
        CommandSpec::new("bash").args(["-c", script]).cwd(cwd),
        |spec, (key, value)| spec.env(key, value),
    )
}

/// Probe whether `tool` can be launched at all.
pub async fn is_available(tool: &str) -> bool {
    Command::new(tool)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .is_ok()
}
