//! Implementation of `ocauto --destroy <NAME>`.

use std::time::Instant;

use anyhow::{Context, Result};

use ocauto_lib::automate::Automator;
use ocauto_lib::platform::Platform;

use crate::output::{
  OutputFormat, format_duration, print_info, print_json, print_stat, print_success, print_warning,
};

/// Tear down cluster `name` on `platform` and remove it from the store.
pub async fn cmd_destroy(
  automator: &Automator,
  name: &str,
  platform: Platform,
  dry_run: bool,
  output: OutputFormat,
) -> Result<()> {
  let start = Instant::now();

  let outcome = automator
    .destroy(name, platform, dry_run)
    .await
    .with_context(|| format!("failed to destroy cluster {}", name))?;

  if output.is_json() {
    return print_json(&outcome);
  }

  if !outcome.found {
    print_warning(&format!(
      "Cluster {} is not recorded; used default directory {}",
      name,
      outcome.cluster.dir.display()
    ));
  }

  if outcome.dry_run {
    print_info("Dry run - no changes made");
    print_stat("Would exec", &outcome.invocation);
  } else {
    print_success(&format!("Destroyed cluster {}", outcome.cluster.name));
    print_stat("Platform", outcome.cluster.platform.as_str());
    print_stat("Record removed", if outcome.removed { "yes" } else { "no" });
    print_stat("Duration", &format_duration(start.elapsed()));
  }

  Ok(())
}
