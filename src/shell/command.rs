//! Child-process execution with concurrent pipe drainage.
//!
//! Both output pipes of a child are read by dedicated threads while the
//! child runs. This is a correctness requirement, not a style choice: a
//! TeX compiler can emit more log than one OS pipe buffer holds, and a
//! parent that waits before reading would deadlock the child. Lines from
//! both pipes are funnelled through a channel into one ordered buffer;
//! line boundaries are preserved, exact stdout/stderr interleaving is not.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;

use crate::error::{Result, TexmendError};
use crate::shell::heartbeat::Heartbeat;

/// Result of running a child process to completion.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Combined stdout and stderr, one line per entry order of arrival.
    pub output: String,

    /// Exit code (None if killed by a signal).
    pub exit_code: Option<i32>,

    /// Whether the child exited with status zero.
    pub success: bool,
}

impl RunResult {
    fn from_status(output: String, status: std::process::ExitStatus) -> Self {
        Self {
            output,
            exit_code: status.code(),
            success: status.success(),
        }
    }
}

/// A line read from one of the child's pipes.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Run a command, capturing merged output while ticking a heartbeat.
///
/// The heartbeat prints one dot per ten scanned lines; the captured
/// buffer is returned for diagnosis and is not shown to the user here.
/// A spawn failure (binary missing or not executable) is returned as
/// [`TexmendError::Launch`] so callers can tell it apart from a child
/// that ran and exited non-zero.
pub fn run_captured(program: &str, args: &[String]) -> Result<RunResult> {
    run(program, args, Mode::Captured)
}

/// Run a command, echoing every output line live.
///
/// Used for installers: they can take minutes and may print prompts, so
/// the user has to see their output as it happens. The merged buffer is
/// still returned.
pub fn run_streaming(program: &str, args: &[String]) -> Result<RunResult> {
    run(program, args, Mode::Streaming)
}

#[derive(Clone, Copy)]
enum Mode {
    Captured,
    Streaming,
}

fn run(program: &str, args: &[String], mode: Mode) -> Result<RunResult> {
    let mut child = spawn(program, args)?;

    // Pipes were requested in spawn(); take() cannot fail here.
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| TexmendError::Launch {
            command: program.to_string(),
            message: "child stdout pipe missing".to_string(),
        })?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| TexmendError::Launch {
            command: program.to_string(),
            message: "child stderr pipe missing".to_string(),
        })?;

    let (tx, rx) = mpsc::channel();
    let tx_stdout = tx.clone();
    let tx_stderr = tx;

    let stdout_handle = thread::spawn(move || {
        let reader = BufReader::new(stdout);
        for line in reader.lines().map_while(std::result::Result::ok) {
            if tx_stdout.send(OutputLine::Stdout(line)).is_err() {
                break;
            }
        }
    });

    let stderr_handle = thread::spawn(move || {
        let reader = BufReader::new(stderr);
        for line in reader.lines().map_while(std::result::Result::ok) {
            if tx_stderr.send(OutputLine::Stderr(line)).is_err() {
                break;
            }
        }
    });

    // The receive loop ends when both readers hang up their senders,
    // which happens exactly when both pipes hit EOF.
    let mut heartbeat = Heartbeat::new();
    let mut output = String::new();
    for line in rx {
        let text = match line {
            OutputLine::Stdout(text) | OutputLine::Stderr(text) => text,
        };
        match mode {
            Mode::Captured => heartbeat.tick(),
            Mode::Streaming => println!("{}", text),
        }
        output.push_str(&text);
        output.push('\n');
    }
    if matches!(mode, Mode::Captured) {
        heartbeat.finish();
    }

    // Join before wait: both readers must be done before we return.
    let _ = stdout_handle.join();
    let _ = stderr_handle.join();

    let status = child.wait()?;
    Ok(RunResult::from_status(output, status))
}

fn spawn(program: &str, args: &[String]) -> Result<Child> {
    Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| TexmendError::Launch {
            command: program.to_string(),
            message: e.to_string(),
        })
}
