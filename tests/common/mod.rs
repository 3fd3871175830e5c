//! Stand-in linters for deterministic end-to-end runs.
//!
//! Each fake is a bash script that prints what the real tool prints for the
//! scratch tree's bad code, so routing, excludes, parsing and rendering run
//! without flake8 or shellcheck installed.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// flake8 lookalike: one W292 per Python file. With no file arguments it
/// walks `.` itself, honouring `--extend-exclude` directory entries.
pub const FAKE_FLAKE8: &str = r#"excludes=""
files=()
for a in "$@"; do
  case "$a" in
    --extend-exclude=*) excludes="${a#--extend-exclude=}" ;;
    -*) ;;
    *) files+=("$a") ;;
  esac
done
if [ ${#files[@]} -eq 0 ]; then
  while IFS= read -r f; do files+=("${f#./}"); done < <(find . -name '*.py' | sort)
fi
IFS=, read -ra dirs <<< "$excludes"
status=0
for f in "${files[@]}"; do
  skip=""
  for d in "${dirs[@]}"; do
    d="${d#./}"
    case "$f" in "$d"/*) skip=1 ;; esac
  done
  [ -n "$skip" ] && continue
  echo "$f:4:21: W292 no newline at end of file"
  status=1
done
exit $status
"#;

/// shellcheck lookalike: SC2148 and SC2283 for every script argument.
pub const FAKE_SHELLCHECK: &str = r#"status=0
for f in "$@"; do
  case "$f" in
    *.sh)
      echo "$f:1:1: error: Tips depend on target shell and yours is unknown. Add a shebang or a 'shell' directive. [SC2148]"
      echo "$f:2:15: error: Remove spaces around = to assign (or use [ ] to compare, or quote '=' if literal). [SC2283]"
      status=1 ;;
  esac
done
exit $status
"#;

/// Write `script` under `bin_dir` and return a launch line for the config.
pub fn install(bin_dir: &Path, name: &str, script: &str) -> String {
    let path = bin_dir.join(name);
    fs::write(&path, script).unwrap();
    shell_words::join(["bash", path.to_str().unwrap()])
}
