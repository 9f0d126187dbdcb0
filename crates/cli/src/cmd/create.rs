//! Implementation of `ocauto --create`.

use std::time::Instant;

use anyhow::{Context, Result};

use ocauto_lib::automate::Automator;
use ocauto_lib::platform::Platform;

use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success};

/// Provision a new cluster on `platform` and record it in the store.
pub async fn cmd_create(automator: &Automator, platform: Platform, dry_run: bool, output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let outcome = automator
    .create(platform, dry_run)
    .await
    .context("failed to create cluster")?;

  if output.is_json() {
    return print_json(&outcome);
  }

  if outcome.dry_run {
    print_info("Dry run - no changes made");
    print_stat("Would exec", &outcome.invocation);
  } else {
    print_success(&format!("Created cluster {}", outcome.cluster.name));
    print_stat("Platform", outcome.cluster.platform.as_str());
    print_stat("Directory", &outcome.cluster.dir.display().to_string());
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  Ok(())
}
