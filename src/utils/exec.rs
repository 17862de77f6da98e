//! External command execution utilities.
//!
//! Provides a Builder-based API for running the `typst` binary and the PDF
//! viewer with proper output handling.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! // Capture output, inspect exit status yourself
//! let output = Cmd::new("typst").args(["query", "--format", "json"]).output()?;
//!
//! // Fail with stderr in the error message on non-zero exit
//! Cmd::new("typst").args(["compile", "note.typ"]).run()?;
//!
//! // Fire and forget (viewers)
//! Cmd::new("zathura").arg("note.pdf").spawn_detached()?;
//! ```
//!
//! Code that must be testable without the real binaries goes through a
//! [`CommandRunner`] instead of calling [`Cmd::output`] directly.

use crate::debug;
use anyhow::{Context, Result};
use regex::Regex;
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
    sync::OnceLock,
};

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default, Clone)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Create from a command array (e.g., `["zathura"]` or `["flatpak", "run", "org.gnome.Evince"]`).
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        let mut iter = cmd.iter();
        let program = iter
            .next()
            .map(|s| s.as_ref().to_owned())
            .unwrap_or_default();
        let args: Vec<_> = iter.map(|s| s.as_ref().to_owned()).collect();
        Self {
            program,
            args,
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if !arg.is_empty() {
                self.args.push(arg.to_owned());
            }
        }
        self
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Get the program name for error messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Command line as a single display string (for debug logs).
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Execute and capture output without judging the exit status.
    pub fn output(&self) -> Result<Output> {
        let name = self.program_name();
        debug!("exec"; "{}", self.display());
        self.build()
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute `{name}`"))
    }

    /// Execute the command, returning an error on non-zero exit.
    pub fn run(&self) -> Result<Output> {
        let output = self.output()?;
        if !output.status.success() {
            anyhow::bail!(format_error(&self.program_name(), &output));
        }
        Ok(output)
    }

    /// Spawn without waiting (GUI viewers outlive us).
    pub fn spawn_detached(&self) -> Result<()> {
        let name = self.program_name();
        debug!("exec"; "spawn {}", self.display());
        self.build()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to spawn `{name}`"))?;
        Ok(())
    }
}

// ============================================================================
// Runner seam
// ============================================================================

/// Captured result of one process run.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Both streams; typst may print warnings on either side of its output.
    pub fn text(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Exit status plus stderr without ANSI codes, for error messages.
    pub fn failure_message(&self, name: &str) -> String {
        let status = self
            .code
            .map_or_else(|| "a signal".to_string(), |c| format!("exit status {c}"));
        let mut msg = format!("`{name}` failed with {status}");
        let stderr = strip_ansi(self.stderr.trim());
        if !stderr.is_empty() {
            msg.push('\n');
            msg.push_str(&stderr);
        }
        msg
    }
}

/// Executes external commands; swapped for a recording fake in tests.
pub trait CommandRunner: Send + Sync {
    /// Whether `program` can be found on the search path.
    fn is_available(&self, program: &OsStr) -> bool;

    /// Run to completion and capture the output.
    fn run(&self, cmd: &Cmd) -> Result<ProcessOutput>;
}

/// Runs real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn is_available(&self, program: &OsStr) -> bool {
        which::which(program).is_ok()
    }

    fn run(&self, cmd: &Cmd) -> Result<ProcessOutput> {
        let output = cmd.output()?;
        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes from string.
pub fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").unwrap());
    re.replace_all(s, "")
}

/// Format error message for failed command.
fn format_error(name: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let mut msg = format!("Command `{name}` failed with {}", output.status);

    let stderr = strip_ansi(stderr.trim());
    if !stderr.is_empty() {
        msg.push('\n');
        msg.push_str(&stderr);
    }

    let stdout = strip_ansi(stdout.trim());
    if !stdout.is_empty() {
        msg.push_str("\nStdout:\n");
        msg.push_str(&stdout);
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================

/// Test doubles for [`CommandRunner`].
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a canned output and records every command it is asked to run.
    pub(crate) struct RecordingRunner {
        pub available: bool,
        pub output: ProcessOutput,
        calls: AtomicUsize,
        commands: Mutex<Vec<String>>,
    }

    impl RecordingRunner {
        pub fn new(available: bool, code: i32, stdout: &str) -> Self {
            Self {
                available,
                output: ProcessOutput {
                    code: Some(code),
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                },
                calls: AtomicUsize::new(0),
                commands: Mutex::new(Vec::new()),
            }
        }

        pub fn with_stderr(mut self, stderr: &str) -> Self {
            self.output.stderr = stderr.to_string();
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn commands(&self) -> Vec<String> {
            self.commands.lock().clone()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn is_available(&self, _: &OsStr) -> bool {
            self.available
        }

        fn run(&self, cmd: &Cmd) -> Result<ProcessOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.commands.lock().push(cmd.display());
            Ok(self.output.clone())
        }
    }
}
