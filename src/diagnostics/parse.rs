use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{Diagnostic, Severity};

static FLAKE8_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<path>.+?):(?P<line>\d+):(?P<col>\d+): (?P<code>[A-Z]+\d+) (?P<msg>.*)$")
        .expect("valid regex")
});

static SHELLCHECK_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<path>.+?):(?P<line>\d+):(?P<col>\d+): (?P<level>[a-z]+): (?P<msg>.*?) ?\[(?P<code>SC\d+)\]$",
    )
    .expect("valid regex")
});

static MYPY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<path>.+?):(?P<line>\d+):(?:(?P<col>\d+):)? (?P<level>error|warning|note): (?P<msg>.*?)(?:\s+\[(?P<code>[a-z0-9-]+)\])?$",
    )
    .expect("valid regex")
});

/// Parse flake8's default output format.
///
/// ```text
/// torch/some_cool_file.py:4:21: W292 no newline at end of file
/// ```
pub fn parse_flake8(raw: &str) -> Vec<Diagnostic> {
    raw.lines()
        .filter_map(|line| {
            let caps = FLAKE8_LINE.captures(line.trim_end())?;
            let code = caps["code"].to_string();
            Some(Diagnostic {
                path: caps["path"].to_string(),
                line: number(&caps, "line")?,
                col: number(&caps, "col"),
                severity: Severity::from_flake8_code(&code),
                code,
                message: caps["msg"].trim().to_string(),
            })
        })
        .collect()
}

/// Parse `shellcheck --format=gcc` output.
///
/// ```text
/// test.sh:1:1: error: Tips depend on target shell and yours is unknown. Add a shebang. [SC2148]
/// ```
pub fn parse_shellcheck(raw: &str) -> Vec<Diagnostic> {
    raw.lines()
        .filter_map(|line| {
            let caps = SHELLCHECK_LINE.captures(line.trim_end())?;
            Some(Diagnostic {
                path: caps["path"].to_string(),
                line: number(&caps, "line")?,
                col: number(&caps, "col"),
                severity: Severity::from_str_lossy(&caps["level"]),
                code: caps["code"].to_string(),
                message: caps["msg"].trim().to_string(),
            })
        })
        .collect()
}

/// Parse mypy output. `note:` lines only elaborate on a preceding error and
/// are dropped; the trailing summary line never matches.
///
/// ```text
/// torch/foo.py:12: error: Incompatible types in assignment  [assignment]
/// ```
pub fn parse_mypy(raw: &str) -> Vec<Diagnostic> {
    raw.lines()
        .filter_map(|line| {
            let caps = MYPY_LINE.captures(line.trim_end())?;
            if &caps["level"] == "note" {
                return None;
            }
            Some(Diagnostic {
                path: caps["path"].to_string(),
                line: number(&caps, "line")?,
                col: number(&caps, "col"),
                severity: Severity::from_str_lossy(&caps["level"]),
                code: caps
                    .name("code")
                    .map_or_else(|| "mypy".to_string(), |m| m.as_str().to_string()),
                message: caps["msg"].trim().to_string(),
            })
        })
        .collect()
}

fn number(caps: &Captures<'_>, group: &str) -> Option<usize> {
    caps.name(group)?.as_str().parse().ok()
}
