use std::path::PathBuf;
use std::time::Duration;

/// Describes one subprocess invocation.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            timeout: None,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The command line as a shell would print it, for `--no-quiet` echoing.
    pub fn display(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }
}

/// Outcome of a finished subprocess.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    /// The command line that produced this result; empty when skipped.
    pub command: String,
    pub passed: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Terminated by a signal rather than exiting.
    pub signaled: bool,
    pub timed_out: bool,
    /// Nothing needed running (no relevant files, or no `run:` script).
    pub skipped: bool,
}

impl CommandResult {
    /// A passing result for work that never needed a process.
    pub fn skipped() -> Self {
        Self {
            passed: true,
            exit_code: Some(0),
            skipped: true,
            ..Self::default()
        }
    }
}
