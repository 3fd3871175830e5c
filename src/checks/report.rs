use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::process::CommandResult;

/// What one check found.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckReport {
    pub name: String,
    pub passed: bool,
    pub skipped: bool,
    /// Command lines that were run. Only recorded outside quiet mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// Tool output that did not parse into diagnostics, trimmed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw: Vec<String>,
}

impl CheckReport {
    pub fn new(name: impl Into<String>, result: &CommandResult, diagnostics: Vec<Diagnostic>) -> Self {
        let mut raw = Vec::new();
        if !result.passed {
            let mut streams = vec![result.stderr.as_str()];
            // Diagnostics already carry what stdout said.
            if diagnostics.is_empty() {
                streams.push(result.stdout.as_str());
            }
            raw.extend(
                streams
                    .into_iter()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            );
        }
        Self {
            name: name.into(),
            passed: result.passed,
            skipped: result.skipped,
            commands: Vec::new(),
            diagnostics,
            raw,
        }
    }

    /// Render as a header line (`x name` / `✓ name`) followed, on failure,
    /// by one line per diagnostic and any unparsed output.
    pub fn render(&self, color: bool) -> String {
        let mut out = String::new();
        let (icon, name) = match (self.passed, color) {
            (true, true) => ("✓".green().to_string(), self.name.blue().to_string()),
            (false, true) => ("x".red().to_string(), self.name.blue().to_string()),
            (true, false) => ("✓".to_string(), self.name.clone()),
            (false, false) => ("x".to_string(), self.name.clone()),
        };
        out.push_str(&format!("{icon} {name}\n"));

        for command in &self.commands {
            out.push_str(&format!("$ {command}\n"));
        }
        if self.passed {
            return out;
        }
        for diag in &self.diagnostics {
            out.push_str(&format!("{diag}\n"));
        }
        for block in &self.raw {
            out.push_str(block);
            out.push('\n');
        }
        out
    }
}
