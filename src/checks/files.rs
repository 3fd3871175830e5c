use std::path::Path;

use walkdir::WalkDir;

/// Files whose name ends with one of `extensions` (`.py`, `.sh`, ...).
pub fn filter_ext<S: AsRef<str>>(files: &[String], extensions: &[S]) -> Vec<String> {
    files
        .iter()
        .filter(|f| extensions.iter().any(|ext| f.ends_with(ext.as_ref())))
        .cloned()
        .collect()
}

/// Exclusion list in flake8 `exclude` syntax: directory prefixes and globs,
/// either of which may be written with a leading `./`.
#[derive(Debug, Clone, Default)]
pub struct Excludes {
    prefixes: Vec<String>,
    globs: Vec<glob::Pattern>,
}

impl Excludes {
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let mut excludes = Self::default();
        for entry in entries {
            let entry = strip_dot_slash(entry.as_ref().trim()).trim_end_matches('/');
            if entry.is_empty() {
                continue;
            }
            if entry.contains(['*', '?', '[']) {
                if let Ok(pattern) = glob::Pattern::new(entry) {
                    excludes.globs.push(pattern);
                }
            } else {
                excludes.prefixes.push(entry.to_string());
            }
        }
        excludes
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.globs.is_empty()
    }

    /// Whether a repo-relative path falls under an excluded entry.
    pub fn is_excluded(&self, path: &str) -> bool {
        let path = strip_dot_slash(path);
        let file_name = path.rsplit('/').next().unwrap_or(path);

        let under_prefix = self.prefixes.iter().any(|prefix| {
            path == prefix
                || path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        });
        under_prefix
            || self
                .globs
                .iter()
                .any(|glob| glob.matches(path) || glob.matches(file_name))
    }

    pub fn retain(&self, files: Vec<String>) -> Vec<String> {
        files.into_iter().filter(|f| !self.is_excluded(f)).collect()
    }
}

fn strip_dot_slash(path: &str) -> &str {
    path.strip_prefix("./").unwrap_or(path)
}

/// Walk `root` for files with one of `extensions`, returning sorted
/// repo-relative paths. VCS, build, and vendored dependency directories are
/// never entered, and neither is anything `excludes` covers.
pub fn walk_files<S: AsRef<str>>(root: &Path, extensions: &[S], excludes: &Excludes) -> Vec<String> {
    let mut matches = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !should_skip(e, root, excludes));

    for entry in walker.filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            let rel = rel.to_string_lossy().replace('\\', "/");
            if extensions.iter().any(|ext| rel.ends_with(ext.as_ref())) && !excludes.is_excluded(&rel) {
                matches.push(rel);
            }
        }
    }

    matches.sort();
    matches
}

fn should_skip(entry: &walkdir::DirEntry, root: &Path, excludes: &Excludes) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let skip_by_name = matches!(
        entry.file_name().to_str().unwrap_or_default(),
        ".git" | "target" | "node_modules" | "build" | ".tox" | ".venv"
    );
    skip_by_name
        || entry
            .path()
            .strip_prefix(root)
            .is_ok_and(|rel| excludes.is_excluded(&rel.to_string_lossy().replace('\\', "/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn files() -> Vec<String> {
        [
            "caffe2/some_cool_file.py",
            "torch/some_cool_file.py",
            "aten/some_cool_file.py",
            "torch/some_stubs.pyi",
            "test.sh",
            "README.md",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    #[test]
    fn routes_by_extension() {
        assert_eq!(
            filter_ext(&files(), &[".py", ".pyi"]),
            vec![
                "caffe2/some_cool_file.py",
                "torch/some_cool_file.py",
                "aten/some_cool_file.py",
                "torch/some_stubs.pyi"
            ]
        );
        assert_eq!(filter_ext(&files(), &[".sh"]), vec!["test.sh"]);
        assert!(filter_ext::<&str>(&files(), &[]).is_empty());
    }

    #[test]
    fn excludes_directory_prefixes_with_or_without_dot_slash() {
        for entry in ["caffe2", "./caffe2", "./caffe2/"] {
            let excludes = Excludes::new(&[entry]);
            assert!(excludes.is_excluded("caffe2/some_cool_file.py"), "{entry}");
            assert!(!excludes.is_excluded("torch/some_cool_file.py"), "{entry}");
        }
    }

    #[test]
    fn prefix_match_respects_path_components() {
        let excludes = Excludes::new(&["caffe2"]);
        assert!(!excludes.is_excluded("caffe2_extra/file.py"));
        assert!(excludes.is_excluded("caffe2"));
    }

    #[test]
    fn glob_entries_match_paths_and_names() {
        let excludes = Excludes::new(&["./third_party/*", "*.pyi"]);
        assert!(excludes.is_excluded("third_party/pybind11/setup.py"));
        assert!(excludes.is_excluded("torch/some_stubs.pyi"));
        assert!(!excludes.is_excluded("torch/some_cool_file.py"));
    }

    #[test]
    fn empty_excludes_keep_everything() {
        let excludes = Excludes::new::<&str>(&[]);
        assert!(excludes.is_empty());
        assert_eq!(excludes.retain(files()).len(), files().len());
    }

    #[test]
    fn walk_finds_nested_files_and_skips_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for path in [
            "tools/run.sh",
            "scripts/build/inner.sh",
            ".git/hooks/pre-commit.sh",
            "node_modules/pkg/install.sh",
            "legacy/old.sh",
            "top.sh",
            "notes.txt",
        ] {
            let full = root.join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, "echo hi\n").unwrap();
        }

        let found = walk_files(root, &[".sh"], &Excludes::new(&["legacy"]));
        assert_eq!(found, vec!["tools/run.sh", "top.sh"]);
    }
}
