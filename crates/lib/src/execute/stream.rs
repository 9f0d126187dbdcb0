//! Process execution with streamed output.

use std::ffi::OsStr;
use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{Instrument, Span, debug, info};

use super::types::{ExecError, OutputStream, RunSummary};

/// Run `program` with `args` and wait for it to finish.
///
/// The child inherits the current environment and working directory, with
/// stdin connected to the null device. Each line the child writes to stdout
/// or stderr is logged at INFO as it arrives, tagged with its stream. Order
/// is preserved within a stream but not across the two.
///
/// Returns only once the child has exited *and* both streams have reached
/// end-of-file, so no output is lost to an early return. There is no
/// timeout: a child that never exits blocks forever.
pub async fn run_streaming<I, S>(program: &Path, args: I) -> Result<RunSummary, ExecError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let start = Instant::now();

  let mut command = Command::new(program);
  command
    .args(args)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

  debug!(program = %program.display(), "spawning process");

  let mut child = command.spawn().map_err(|source| ExecError::Spawn {
    program: program.to_path_buf(),
    source,
  })?;

  let stdout = spawn_forwarder(child.stdout.take(), OutputStream::StdOut);
  let stderr = spawn_forwarder(child.stderr.take(), OutputStream::StdErr);

  let status = child.wait().await;
  let stdout_lines = join_forwarder(stdout).await;
  let stderr_lines = join_forwarder(stderr).await;

  let status = status.map_err(|source| ExecError::Wait {
    program: program.to_path_buf(),
    source,
  })?;

  if !status.success() {
    return Err(ExecError::Failed {
      program: program.to_path_buf(),
      code: status.code(),
    });
  }

  let forward_err = |(stream, message): (OutputStream, String)| ExecError::Forward {
    program: program.to_path_buf(),
    stream,
    message,
  };
  let summary = RunSummary {
    stdout_lines: stdout_lines.map_err(forward_err)?,
    stderr_lines: stderr_lines.map_err(forward_err)?,
    elapsed: start.elapsed(),
  };

  debug!(
    program = %program.display(),
    stdout_lines = summary.stdout_lines,
    stderr_lines = summary.stderr_lines,
    "process completed"
  );

  Ok(summary)
}

type Forwarder = (OutputStream, JoinHandle<io::Result<usize>>);

fn spawn_forwarder<R>(reader: Option<R>, stream: OutputStream) -> Forwarder
where
  R: AsyncRead + Unpin + Send + 'static,
{
  let task = tokio::spawn(forward_lines(reader, stream).instrument(Span::current()));
  (stream, task)
}

async fn join_forwarder((stream, task): Forwarder) -> Result<usize, (OutputStream, String)> {
  match task.await {
    Ok(Ok(lines)) => Ok(lines),
    Ok(Err(e)) => Err((stream, e.to_string())),
    Err(e) => Err((stream, format!("forwarding task failed: {}", e))),
  }
}

/// Log every line of `reader` until end-of-file, returning the line count.
async fn forward_lines<R>(reader: Option<R>, stream: OutputStream) -> io::Result<usize>
where
  R: AsyncRead + Unpin,
{
  let Some(reader) = reader else {
    return Ok(0);
  };

  let mut reader = BufReader::new(reader);
  let mut buf = Vec::new();
  let mut count = 0;

  loop {
    buf.clear();
    if reader.read_until(b'\n', &mut buf).await? == 0 {
      break;
    }
    let line = String::from_utf8_lossy(trim_line_ending(&buf));
    info!(stream = %stream, line = %line, "process output");
    count += 1;
  }

  Ok(count)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
  let line = line.strip_suffix(b"\n").unwrap_or(line);
  line.strip_suffix(b"\r").unwrap_or(line)
}
