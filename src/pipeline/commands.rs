use std::path::Path;

use crate::checks::{Check, CheckContext, LintTask, YamlStep};
use crate::error::{Error, Result};
use crate::workflow::{self, grab_specific_steps, missing_steps};

/// Build the requested lint tasks. Duplicates collapse to one check each,
/// in first-mention order; an empty request means the default set.
pub fn lint_checks(
    ctx: &CheckContext,
    tasks: &[LintTask],
    files: Option<Vec<String>>,
) -> Result<Vec<Box<dyn Check>>> {
    let mut selected: Vec<LintTask> = Vec::new();
    let requested = if tasks.is_empty() {
        LintTask::DEFAULT
    } else {
        tasks
    };
    for task in requested {
        if !selected.contains(task) {
            selected.push(*task);
        }
    }

    selected
        .into_iter()
        .map(|task| task.build(ctx, files.clone()))
        .collect()
}

/// Load `job` from the workflow at `path` and wrap each requested step.
///
/// Every requested name must exist in the job; steps run in job order.
pub fn workflow_steps<S: AsRef<str>>(
    ctx: &CheckContext,
    path: &Path,
    job_name: &str,
    step_names: &[S],
) -> Result<Vec<Box<dyn Check>>> {
    if step_names.is_empty() {
        return Err(Error::NoSteps);
    }
    let workflow = workflow::load_workflow(path)?;
    let job = workflow.job(job_name)?;

    let missing = missing_steps(step_names, job);
    if !missing.is_empty() {
        return Err(Error::MissingSteps {
            job: job_name.to_string(),
            missing,
        });
    }

    Ok(grab_specific_steps(step_names, job)
        .into_iter()
        .map(|step| Box::new(YamlStep::new(step, job_name, ctx.clone())) as Box<dyn Check>)
        .collect())
}
