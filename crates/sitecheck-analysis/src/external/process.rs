//! Bounded subprocess execution with captured output.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver};
use sitecheck_core::errors::ValidatorError;
use tracing::{debug, warn};

/// Poll interval while waiting for a child to exit.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long to wait for pipe readers after the child exits.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// One command to run.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory. `None` inherits the current one.
    pub cwd: Option<PathBuf>,
    pub timeout: Duration,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            timeout,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// `program arg…` for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a tool that ran to completion.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed_ms: u64,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout followed by stderr, verbatim.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

/// Run `invocation` to completion or until its timeout.
///
/// A tool that cannot be found yields `ValidatorError::ToolMissing`; one that
/// exceeds the timeout is killed and yields `ValidatorError::TimedOut`. A
/// non-zero exit is not an error here.
pub fn run_tool(invocation: &ToolInvocation) -> Result<ToolOutput, ValidatorError> {
    let tool = invocation.program.clone();

    if let Some(ref cwd) = invocation.cwd {
        if !cwd.is_dir() {
            return Err(ValidatorError::SpawnFailed {
                tool,
                message: format!("working directory {} does not exist", cwd.display()),
            });
        }
    }

    let mut command = Command::new(&invocation.program);
    command
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(ref cwd) = invocation.cwd {
        command.current_dir(cwd);
    }

    debug!(command = %invocation.command_line(), "spawning tool");
    let start = Instant::now();
    let mut child = command.spawn().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ValidatorError::ToolMissing { tool: tool.clone() },
        _ => ValidatorError::SpawnFailed {
            tool: tool.clone(),
            message: e.to_string(),
        },
    })?;

    let output_rx = spawn_readers(&mut child);

    let status = match wait_with_timeout(&mut child, invocation.timeout) {
        Ok(Some(status)) => status,
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            warn!(tool = %tool, timeout_secs = invocation.timeout.as_secs(), "tool timed out");
            return Err(ValidatorError::TimedOut {
                tool,
                timeout_secs: invocation.timeout.as_secs(),
            });
        }
        Err(e) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ValidatorError::SpawnFailed {
                tool,
                message: e.to_string(),
            });
        }
    };

    let (stdout, stderr) = collect_output(&output_rx);
    let elapsed_ms = start.elapsed().as_millis() as u64;
    debug!(tool = %tool, code = ?status.code(), elapsed_ms, "tool finished");

    Ok(ToolOutput {
        exit_code: status.code(),
        stdout,
        stderr,
        elapsed_ms,
    })
}

/// Drain both pipes on background threads so a chatty tool never blocks on
/// a full pipe buffer.
fn spawn_readers(child: &mut Child) -> Receiver<(Stream, Vec<u8>)> {
    let (tx, rx) = bounded(2);
    if let Some(mut out) = child.stdout.take() {
        let tx = tx.clone();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = out.read_to_end(&mut buf);
            let _ = tx.send((Stream::Stdout, buf));
        });
    }
    if let Some(mut err) = child.stderr.take() {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = err.read_to_end(&mut buf);
            let _ = tx.send((Stream::Stderr, buf));
        });
    }
    rx
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Readers that outlive the grace period (a grandchild holding the pipe)
/// are abandoned; whatever arrived is kept.
fn collect_output(rx: &Receiver<(Stream, Vec<u8>)>) -> (String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let deadline = Instant::now() + DRAIN_GRACE;
    for _ in 0..2 {
        match rx.recv_deadline(deadline) {
            Ok((Stream::Stdout, buf)) => stdout = buf,
            Ok((Stream::Stderr, buf)) => stderr = buf,
            Err(_) => break,
        }
    }
    (
        String::from_utf8_lossy(&stdout).into_owned(),
        String::from_utf8_lossy(&stderr).into_owned(),
    )
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn captures_exit_code_and_both_streams() {
        let inv = ToolInvocation::new("sh", secs(10))
            .arg("-c")
            .arg("echo out; echo err >&2; exit 3");
        let out = run_tool(&inv).unwrap();
        assert_eq!(out.exit_code, Some(3));
        assert!(!out.success());
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
        assert_eq!(out.combined(), "out\nerr\n");
    }

    #[test]
    fn missing_program_is_tool_missing() {
        let inv = ToolInvocation::new("sitecheck-no-such-tool-8d1f", secs(5));
        assert!(matches!(
            run_tool(&inv),
            Err(ValidatorError::ToolMissing { ref tool }) if tool == "sitecheck-no-such-tool-8d1f"
        ));
    }

    #[test]
    fn slow_program_times_out() {
        let inv = ToolInvocation::new("sleep", Duration::from_millis(200)).arg("5");
        let start = Instant::now();
        assert!(matches!(run_tool(&inv), Err(ValidatorError::TimedOut { .. })));
        assert!(start.elapsed() < secs(4));
    }

    #[test]
    fn runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let inv = ToolInvocation::new("ls", secs(5)).current_dir(dir.path());
        let out = run_tool(&inv).unwrap();
        assert!(out.success());
        assert!(out.stdout.contains("marker.txt"));
    }

    #[test]
    fn missing_working_directory_is_spawn_failure() {
        let inv = ToolInvocation::new("ls", secs(5)).current_dir("/nonexistent/sitecheck/dir");
        assert!(matches!(run_tool(&inv), Err(ValidatorError::SpawnFailed { .. })));
    }
}
