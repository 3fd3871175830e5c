//! Git queries: repository root and the changed-file set.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::process::{self, CommandSpec};

/// Run `git <args>` in `cwd` and return its stdout.
async fn git(cwd: &Path, args: &[&str]) -> Result<String> {
    let spec = CommandSpec::new("git").args(args.iter().copied()).cwd(cwd);
    let result = process::exec(spec).await?;
    if !result.passed {
        return Err(Error::Git {
            args: args.join(" "),
            stderr: result.stderr.trim().to_string(),
        });
    }
    Ok(result.stdout)
}

/// Run a `-z` query and split its NUL-terminated records.
async fn git_records(cwd: &Path, args: &[&str]) -> Result<Vec<String>> {
    let out = git(cwd, args).await?;
    Ok(out
        .split('\0')
        .filter(|record| !record.is_empty())
        .map(String::from)
        .collect())
}

/// Top level of the work tree containing `start`.
pub async fn repo_root(start: &Path) -> Result<PathBuf> {
    let out = git(start, &["rev-parse", "--show-toplevel"]).await?;
    match out.lines().next().map(str::trim) {
        Some(top) if !top.is_empty() => Ok(PathBuf::from(top)),
        _ => Err(Error::Git {
            args: "rev-parse --show-toplevel".into(),
            stderr: "no work tree".into(),
        }),
    }
}

/// Repo-relative paths that differ from `base_ref`.
///
/// The union of untracked files, unstaged and staged modifications, and
/// everything committed since the merge-base of `base_ref` and `HEAD`.
/// Paths that no longer exist (deletions) are dropped. The result is sorted
/// and free of duplicates.
pub async fn find_changed_files(root: &Path, base_ref: &str) -> Result<Vec<String>> {
    // Rename records are followed by a bare source path; only `?? ` matters.
    let untracked = git_records(
        root,
        &["status", "--porcelain", "-z", "--untracked-files=all"],
    )
    .await?
    .into_iter()
    .filter_map(|record| record.strip_prefix("?? ").map(String::from));
    let modified = git_records(root, &["diff", "--name-only", "-z"]).await?;
    let cached = git_records(root, &["diff", "--cached", "--name-only", "-z"]).await?;

    let merge_base = git(root, &["merge-base", base_ref, "HEAD"]).await?;
    let committed = git_records(
        root,
        &["diff", "--name-only", "-z", merge_base.trim(), "HEAD"],
    )
    .await?;

    let files: BTreeSet<String> = untracked
        .chain(modified)
        .chain(cached)
        .chain(committed)
        .filter(|f| root.join(f).exists())
        .collect();

    debug!(count = files.len(), base_ref, "changed files");
    Ok(files.into_iter().collect())
}

/// [`find_changed_files`], or `None` when git cannot answer, in which case
/// callers lint the whole repository instead.
pub async fn changed_files_or_all(root: &Path, base_ref: &str) -> Option<Vec<String>> {
    match find_changed_files(root, base_ref).await {
        Ok(files) => Some(files),
        Err(err) => {
            warn!(%err, "could not query git for changed files, falling back to all files");
            None
        }
    }
}
