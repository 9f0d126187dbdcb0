//! Running external processes.
//!
//! The only entry point is [`run_streaming`], which forwards a child's
//! output to the logger line by line while it runs.

mod stream;
mod types;

pub use stream::run_streaming;
pub use types::{ExecError, OutputStream, RunSummary};
