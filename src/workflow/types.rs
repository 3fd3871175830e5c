use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The subset of a GitHub Actions workflow needed to replay `run:` steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workflow {
    #[serde(default)]
    pub name: Option<String>,
    pub jobs: BTreeMap<String, Job>,
    /// Where the workflow was read from, for error messages.
    #[serde(skip)]
    pub source: PathBuf,
}

impl Workflow {
    pub fn job(&self, name: &str) -> Result<&Job> {
        self.jobs.get(name).ok_or_else(|| Error::JobNotFound {
            job: name.to_string(),
            path: self.source.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub run: Option<String>,
    #[serde(default)]
    pub uses: Option<String>,
    #[serde(default)]
    pub shell: Option<String>,
    #[serde(default)]
    pub env: BTreeMap<String, serde_yaml::Value>,
}

impl Step {
    /// Display label: the step name, else the action it uses, else `unnamed`.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.uses.as_deref())
            .unwrap_or("unnamed")
    }

    /// Scalar `env:` entries as strings. `${{ }}` expressions are passed
    /// through untouched; nested values are dropped.
    pub fn env_vars(&self) -> Vec<(String, String)> {
        self.env
            .iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => String::new(),
                    _ => return None,
                };
                Some((key.clone(), value))
            })
            .collect()
    }

    /// Whether the `run` script is meant for a POSIX shell. Steps without an
    /// explicit `shell` run under bash on Linux runners.
    pub fn is_posix_shell(&self) -> bool {
        match self.shell.as_deref() {
            None => true,
            Some(shell) => {
                let program = shell.split_whitespace().next().unwrap_or_default();
                matches!(program, "bash" | "sh")
            }
        }
    }
}
