//! Linter output parsing: flake8, shellcheck (gcc format) and mypy lines to
//! structured diagnostics.

mod parse;

pub use parse::{parse_flake8, parse_mypy, parse_shellcheck};

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Style,
}

impl Severity {
    fn rank(self) -> u8 {
        match self {
            Self::Error => 3,
            Self::Warning => 2,
            Self::Info => 1,
            Self::Style => 0,
        }
    }

    fn from_str_lossy(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "error" | "fatal" => Self::Error,
            "warning" => Self::Warning,
            "info" | "note" => Self::Info,
            "style" => Self::Style,
            _ => Self::Warning,
        }
    }

    /// pycodestyle/pyflakes code prefixes: `E`/`F` are errors, `W` warnings.
    fn from_flake8_code(code: &str) -> Self {
        match code.chars().next() {
            Some('E' | 'F') => Self::Error,
            Some('W') => Self::Warning,
            _ => Self::Info,
        }
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
            Self::Info => f.write_str("info"),
            Self::Style => f.write_str("style"),
        }
    }
}

/// A single finding reported by a linter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub path: String,
    pub line: usize,
    pub col: Option<usize>,
    pub severity: Severity,
    pub code: String,
    pub message: String,
}

/// `path:line:col: CODE message`, the flake8 layout, used for every tool.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:", self.path, self.line)?;
        if let Some(col) = self.col {
            write!(f, "{col}:")?;
        }
        write!(f, " {} {}", self.code, self.message)
    }
}
