use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::parser::load_workflow;
use crate::error::Result;

/// Stand-in for `${{ ... }}` expressions so the script is valid shell.
pub const EXPRESSION_PLACEHOLDER: &str = "GHA_EXPRESSION";

static EXPRESSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{\{[^}]*\}\}").expect("valid regex"));

/// Write every shell `run:` script in `workflows_dir` to its own file under
/// `out_dir`, named `<workflow>__<job>__<step index>.sh`.
///
/// Scripts get a `#!/bin/bash` shebang so ShellCheck knows the dialect.
/// Steps running under a non-POSIX shell (pwsh, python, ...) are skipped.
/// Returns the written paths, sorted.
pub fn extract_scripts(workflows_dir: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    let entries = WalkDir::new(workflows_dir)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file() && is_yaml(e.path()));

    for entry in entries {
        let workflow = load_workflow(entry.path())?;
        let stem = entry
            .path()
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        for (job_name, job) in &workflow.jobs {
            for (index, step) in job.steps.iter().enumerate() {
                let Some(script) = step.run.as_deref() else {
                    continue;
                };
                if !step.is_posix_shell() {
                    debug!(job = %job_name, step = step.label(), "skipping non-posix shell step");
                    continue;
                }
                let path = out_dir.join(format!("{stem}__{job_name}__{index}.sh"));
                fs::write(&path, render_script(step.label(), script))?;
                written.push(path);
            }
        }
    }

    info!(count = written.len(), out = %out_dir.display(), "extracted workflow scripts");
    written.sort();
    Ok(written)
}

fn render_script(label: &str, script: &str) -> String {
    let body = EXPRESSION.replace_all(script, EXPRESSION_PLACEHOLDER);
    let mut out = format!("#!/bin/bash\n# {label}\n{body}");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml" | "YAML" | "YML")
    )
}
