use std::path::Path;

use tracing::debug;

use super::types::Config;
use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = ".quicklint.yaml";

/// Load `.quicklint.yaml` from the repository root, or the defaults when the
/// file does not exist.
pub fn load(root: &Path) -> Result<Config> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| Error::Config { path, source })
}

/// Read the `exclude` option of the `[flake8]` section in `.flake8`.
///
/// Continuation lines (indented lines after the key) are folded in, and the
/// value is split on commas. A missing file or section yields no excludes.
pub fn flake8_excludes(root: &Path) -> Vec<String> {
    match std::fs::read_to_string(root.join(".flake8")) {
        Ok(raw) => parse_flake8_excludes(&raw),
        Err(_) => Vec::new(),
    }
}

fn parse_flake8_excludes(raw: &str) -> Vec<String> {
    let mut in_section = false;
    let mut collecting = false;
    let mut value = String::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            in_section = trimmed.eq_ignore_ascii_case("[flake8]");
            collecting = false;
            continue;
        }
        if !in_section || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }
        let continuation = line.starts_with(' ') || line.starts_with('\t');
        if collecting && continuation {
            value.push(',');
            value.push_str(trimmed);
            continue;
        }
        collecting = false;
        if let Some((key, rest)) = trimmed.split_once(['=', ':'])
            && key.trim() == "exclude"
        {
            value.push_str(rest.trim());
            collecting = true;
        }
    }

    value
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load(dir.path()).unwrap();
        assert_eq!(cfg.base_ref, Config::default().base_ref);
    }

    #[test]
    fn reads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "base_ref: upstream/main\nflake8_exclude:\n  - caffe2\n  - third_party\n",
        )
        .unwrap();
        let cfg = load(dir.path()).unwrap();
        assert_eq!(cfg.base_ref, "upstream/main");
        assert_eq!(cfg.flake8_exclude, vec!["caffe2", "third_party"]);
    }

    #[test]
    fn malformed_yaml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "jobs: [unterminated\n").unwrap();
        let err = load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn flake8_excludes_fold_continuation_lines() {
        let raw = "\
[flake8]
select = B,C,E,F,P,T4,W,B9
max-line-length = 120
exclude =
    ./.git,
    ./build_code_analyzer,
    ./caffe2,
    ./third_party/*,
    *.pyi
per-file-ignores = __init__.py: F401
";
        assert_eq!(
            parse_flake8_excludes(raw),
            vec![
                "./.git",
                "./build_code_analyzer",
                "./caffe2",
                "./third_party/*",
                "*.pyi"
            ]
        );
    }

    #[test]
    fn flake8_excludes_single_line() {
        let raw = "[flake8]\nexclude = docs, caffe2 ,vendor\n";
        assert_eq!(parse_flake8_excludes(raw), vec!["docs", "caffe2", "vendor"]);
    }

    #[test]
    fn other_sections_are_ignored() {
        let raw = "[mypy]\nexclude = caffe2\n[flake8]\nmax-line-length = 120\n";
        assert!(parse_flake8_excludes(raw).is_empty());
    }
}
