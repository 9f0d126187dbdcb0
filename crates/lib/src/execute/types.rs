use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Which output stream of a child process a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
  StdOut,
  StdErr,
}

impl fmt::Display for OutputStream {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OutputStream::StdOut => f.write_str("StdOut"),
      OutputStream::StdErr => f.write_str("StdErr"),
    }
  }
}

/// Errors from running a child process.
#[derive(Debug, Error)]
pub enum ExecError {
  /// The executable could not be started.
  #[error("failed to start {}: {source}", .program.display())]
  Spawn { program: PathBuf, source: std::io::Error },

  /// Waiting for the child to exit failed.
  #[error("failed to wait for {} to complete: {source}", .program.display())]
  Wait { program: PathBuf, source: std::io::Error },

  /// Reading one of the child's output streams failed.
  #[error("failed to forward {stream} of {}: {message}", .program.display())]
  Forward {
    program: PathBuf,
    stream: OutputStream,
    message: String,
  },

  /// The child exited unsuccessfully.
  #[error("{} {}", .program.display(), exit_description(.code))]
  Failed { program: PathBuf, code: Option<i32> },
}

fn exit_description(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exited with status {}", code),
    None => "was terminated by a signal".to_string(),
  }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
  /// Lines forwarded from stdout.
  pub stdout_lines: usize,
  /// Lines forwarded from stderr.
  pub stderr_lines: usize,
  /// Wall time from spawn until both streams were drained.
  pub elapsed: Duration,
}
