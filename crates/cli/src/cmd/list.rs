use anyhow::{Context, Result};

use ocauto_lib::platform::Platform;
use ocauto_lib::store::StoreFile;

use crate::output::{OutputFormat, print_info, print_json, symbols};

pub fn cmd_list(store: &StoreFile, platform: Option<Platform>, output: OutputFormat) -> Result<()> {
  let records = store.list(platform).context("failed to list clusters")?;

  if output.is_json() {
    return print_json(&records);
  }

  if records.is_empty() {
    match platform {
      Some(platform) => print_info(&format!("No clusters recorded on {}", platform)),
      None => print_info("No clusters recorded"),
    }
    return Ok(());
  }

  println!("Clusters:");
  for record in &records {
    println!(
      "  {} {} ({}) {}",
      symbols::INFO,
      record.name,
      record.platform,
      record.dir.display()
    );
  }

  Ok(())
}
