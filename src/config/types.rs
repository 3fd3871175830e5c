use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Upper bound on concurrently running linter processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jobs {
    Auto,
    Fixed(usize),
}

impl Jobs {
    pub fn resolve(self) -> usize {
        match self {
            Jobs::Fixed(n) => n,
            Jobs::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

impl Serialize for Jobs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Jobs::Auto => serializer.serialize_str("auto"),
            Jobs::Fixed(n) => serializer.serialize_u64(*n as u64),
        }
    }
}

impl<'de> Deserialize<'de> for Jobs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct JobsVisitor;

        impl<'de> Visitor<'de> for JobsVisitor {
            type Value = Jobs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"auto\" or a positive integer")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Jobs, E> {
                if value == 0 {
                    return Err(E::custom("jobs must be a positive integer"));
                }
                Ok(Jobs::Fixed(value as usize))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Jobs, E> {
                let value = u64::try_from(value)
                    .map_err(|_| E::custom("jobs must be a positive integer"))?;
                self.visit_u64(value)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Jobs, E> {
                if value.eq_ignore_ascii_case("auto") {
                    Ok(Jobs::Auto)
                } else {
                    Err(E::custom("jobs must be \"auto\" or a positive integer"))
                }
            }
        }

        deserializer.deserialize_any(JobsVisitor)
    }
}

/// Contents of `.quicklint.yaml`. Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ref whose merge-base with `HEAD` bounds the changed-file set.
    pub base_ref: String,
    pub python_extensions: Vec<String>,
    pub shell_extensions: Vec<String>,
    /// Paths and globs flake8 must never see. Empty means "read `.flake8`".
    pub flake8_exclude: Vec<String>,
    /// Directories and globs the shellcheck walk and file routing skip.
    pub shellcheck_exclude: Vec<String>,
    /// How to launch each linter, e.g. `python3 -m flake8`.
    pub flake8_command: String,
    pub shellcheck_command: String,
    pub mypy_command: String,
    /// Extra arguments appended after the command.
    pub flake8_args: String,
    pub shellcheck_args: String,
    pub mypy_args: String,
    pub workflows_dir: String,
    /// Where `extract` writes workflow scripts. Never walked by shellcheck.
    pub extracted_scripts_dir: String,
    /// Per-process timeout in seconds. `None` waits for the process to exit.
    pub timeout: Option<u64>,
    pub jobs: Jobs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_ref: "origin/master".to_string(),
            python_extensions: vec![".py".to_string(), ".pyi".to_string()],
            shell_extensions: vec![".sh".to_string()],
            flake8_exclude: Vec::new(),
            shellcheck_exclude: Vec::new(),
            flake8_command: "flake8".to_string(),
            shellcheck_command: "shellcheck".to_string(),
            mypy_command: "mypy".to_string(),
            flake8_args: String::new(),
            shellcheck_args: String::new(),
            mypy_args: String::new(),
            workflows_dir: ".github/workflows".to_string(),
            extracted_scripts_dir: ".extracted_scripts".to_string(),
            timeout: None,
            jobs: Jobs::Auto,
        }
    }
}

/// A linter launch line: program plus leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Config {
    /// `flake8_command` followed by `flake8_args`.
    pub fn flake8(&self) -> Result<ToolCommand> {
        tool_command(&self.flake8_command, "flake8", self.flake8_args()?)
    }

    pub fn shellcheck(&self) -> Result<ToolCommand> {
        tool_command(&self.shellcheck_command, "shellcheck", self.shellcheck_args()?)
    }

    pub fn mypy(&self) -> Result<ToolCommand> {
        tool_command(&self.mypy_command, "mypy", self.mypy_args()?)
    }

    pub fn flake8_args(&self) -> Result<Vec<String>> {
        split_args(&self.flake8_args)
    }

    pub fn shellcheck_args(&self) -> Result<Vec<String>> {
        split_args(&self.shellcheck_args)
    }

    pub fn mypy_args(&self) -> Result<Vec<String>> {
        split_args(&self.mypy_args)
    }

    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout.map(std::time::Duration::from_secs)
    }
}

/// An empty command falls back to the bare tool name.
fn tool_command(command: &str, default: &str, extra: Vec<String>) -> Result<ToolCommand> {
    let mut words = split_args(command)?.into_iter();
    let program = words.next().unwrap_or_else(|| default.to_string());
    let mut args: Vec<String> = words.collect();
    args.extend(extra);
    Ok(ToolCommand { program, args })
}

fn split_args(input: &str) -> Result<Vec<String>> {
    shell_words::split(input).map_err(|source| Error::Args {
        input: input.to_string(),
        source,
    })
}
