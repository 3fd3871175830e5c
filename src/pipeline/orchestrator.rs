use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use super::types::RunReport;
use crate::checks::Check;
use crate::error::Result;

/// Run independent checks concurrently, at most `jobs` linters at a time.
///
/// Everything is polled on the calling task, so checks only interleave
/// while waiting on their subprocesses. Reports keep submission order. The
/// first fatal error (a linter that cannot be launched) aborts the run and
/// kills whatever is still in flight.
pub async fn run_checks(checks: &[Box<dyn Check>], jobs: usize) -> Result<RunReport> {
    info!(count = checks.len(), jobs, "running checks");
    let reports = stream::iter(checks.iter().map(|check| check.run()))
        .buffered(jobs.max(1))
        .try_collect::<Vec<_>>()
        .await?;
    Ok(RunReport::from_checks(reports))
}

/// Run workflow steps one after another in the given order. Later steps may
/// rely on earlier ones, so a failure does not stop the sequence.
pub async fn run_steps(steps: &[Box<dyn Check>]) -> Result<RunReport> {
    let mut reports = Vec::with_capacity(steps.len());
    for step in steps {
        reports.push(step.run().await?);
    }
    Ok(RunReport::from_checks(reports))
}
