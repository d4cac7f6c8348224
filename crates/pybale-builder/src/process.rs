//! Subprocess invocation seam.
//!
//! Every external tool the pipeline touches (interpreter, pip, apt-get) goes
//! through `ToolRunner`, so tests can swap in a recording runner and the
//! pipeline logic stays independent of the host image.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One fully-described subprocess invocation: program, arguments, extra
/// environment, working directory. Built once, then handed to a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn arg_path(self, path: impl AsRef<Path>) -> Self {
        let rendered = path.as_ref().to_string_lossy().into_owned();
        self.arg(rendered)
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn envs(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(vars);
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

/// Captured output of a finished invocation. `status_code` is `None` when
/// the process was killed by a signal.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

/// Runs invocations synchronously. `Err` means the process could not be
/// spawned; a spawned process that exits non-zero is an `Ok` with a failing
/// status.
pub trait ToolRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput>;
}

/// Default runner backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &invocation.cwd {
            cmd.current_dir(dir);
        }
        tracing::debug!(program = %invocation.program.display(), args = ?invocation.args, "spawning");
        let out = cmd.output()?;
        Ok(ToolOutput {
            status_code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}

const TAIL_LINES: usize = 20;

/// Last lines of a tool's output, for error reporting.
pub(crate) fn output_tail(text: &str) -> String {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    if lines.len() <= TAIL_LINES {
        return lines.join("\n");
    }
    lines[lines.len() - TAIL_LINES..].join("\n")
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every invocation instead of spawning it. Invocations whose
    /// arguments contain `fail_matching` report exit 1 with stderr "boom".
    #[derive(Clone, Default)]
    pub(crate) struct RecordingRunner {
        pub(crate) log: Arc<Mutex<Vec<Invocation>>>,
        pub(crate) fail_matching: Option<&'static str>,
    }

    impl RecordingRunner {
        pub(crate) fn failing_on(needle: &'static str) -> Self {
            Self {
                log: Arc::default(),
                fail_matching: Some(needle),
            }
        }

        pub(crate) fn invocations(&self) -> Vec<Invocation> {
            self.log.lock().unwrap().clone()
        }
    }

    impl ToolRunner for RecordingRunner {
        fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
            self.log.lock().unwrap().push(invocation.clone());
            let fails = self
                .fail_matching
                .is_some_and(|needle| invocation.args.iter().any(|a| a.contains(needle)));
            Ok(ToolOutput {
                status_code: Some(if fails { 1 } else { 0 }),
                stdout: String::new(),
                stderr: if fails { "boom".into() } else { String::new() },
            })
        }
    }
}
