//! Interrupt handling.
//!
//! The first Ctrl-C is only logged: the running installer receives the same
//! signal from the terminal and decides for itself how to stop, and an
//! in-progress store write always completes. A second Ctrl-C exits
//! immediately.

use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Exit status used when a second interrupt forces termination (128 + SIGINT).
const FORCED_EXIT_CODE: i32 = 130;

pub fn spawn_observer() -> JoinHandle<()> {
  tokio::spawn(async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      warn!(error = %e, "unable to listen for interrupt signal");
      return;
    }
    info!("received interrupt signal, will exit once the current operation completes (press Ctrl-C again to force)");

    if tokio::signal::ctrl_c().await.is_ok() {
      warn!("received second interrupt signal, exiting now");
      std::process::exit(FORCED_EXIT_CODE);
    }
  })
}
