use std::path::Path;

use super::types::{Job, Step, Workflow};
use crate::error::{Error, Result};

/// Read and parse a workflow file.
pub fn load_workflow(path: &Path) -> Result<Workflow> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::WorkflowRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_workflow(&raw, path)
}

/// Parse workflow YAML. `path` only labels errors.
pub fn parse_workflow(raw: &str, path: &Path) -> Result<Workflow> {
    let parse_err = |source: serde_yaml::Error| Error::WorkflowParse {
        path: path.to_path_buf(),
        source,
    };

    let doc: serde_yaml::Value = serde_yaml::from_str(raw).map_err(parse_err)?;
    let has_jobs = doc
        .as_mapping()
        .is_some_and(|mapping| mapping.contains_key("jobs"));
    if !has_jobs {
        return Err(Error::MissingJobs(path.to_path_buf()));
    }

    let mut workflow: Workflow = serde_yaml::from_value(doc).map_err(parse_err)?;
    workflow.source = path.to_path_buf();
    Ok(workflow)
}

/// Steps of `job` whose name matches any of `names`, in the job's order.
///
/// Matching ignores case and surrounding whitespace. Each step appears at
/// most once no matter how many requested names match it.
pub fn grab_specific_steps<S: AsRef<str>>(names: &[S], job: &Job) -> Vec<Step> {
    let wanted: Vec<String> = names.iter().map(|n| normalize(n.as_ref())).collect();
    job.steps
        .iter()
        .filter(|step| {
            step.name
                .as_deref()
                .is_some_and(|name| wanted.contains(&normalize(name)))
        })
        .cloned()
        .collect()
}

/// Requested names that match no step of `job`, in request order.
pub fn missing_steps<S: AsRef<str>>(names: &[S], job: &Job) -> Vec<String> {
    let mut missing = Vec::new();
    for requested in names {
        let requested: &str = requested.as_ref();
        let wanted = normalize(requested);
        let found = job
            .steps
            .iter()
            .filter_map(|step| step.name.as_deref())
            .any(|name| normalize(name) == wanted);
        if !found {
            missing.push(requested.to_string());
        }
    }
    missing
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
