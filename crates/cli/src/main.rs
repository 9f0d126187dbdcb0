mod cmd;
mod interrupt;
mod output;

use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ocauto_lib::automate::Automator;
use ocauto_lib::config::Config;
use ocauto_lib::installer::InstallerScript;
use ocauto_lib::platform::{Platform, parse_platform};
use ocauto_lib::store::StoreFile;

use crate::output::{OutputFormat, print_error, print_warning};

/// ocauto - create and destroy OpenShift clusters through the installer script
#[derive(Parser, Debug)]
#[command(name = "ocauto")]
#[command(author, version, about, long_about = None)]
#[command(
  after_help = "ENVIRONMENT:\n  APP_CLUSTERNAMEPREFIX, APP_OCSTOREPATH, APP_CLUSTERPULLSECRET, APP_SSHKEY and APP_PLATFORM\n  are required. A .env file in the working directory is read if present."
)]
struct Cli {
  /// Create a new cluster
  #[arg(long)]
  create: bool,

  /// Destroy the named cluster
  #[arg(long, value_name = "NAME")]
  destroy: Option<String>,

  /// Show what would be executed without running the installer or touching the store
  #[arg(long, visible_alias = "dry-run")]
  dryrun: bool,

  /// Platform to create the cluster on (aws/azure)
  #[arg(long)]
  platform: Option<String>,

  /// List recorded clusters (all platforms unless --platform is given)
  #[arg(long)]
  list: bool,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  output: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn provisions(&self) -> bool {
    self.create || self.destroy.is_some()
  }
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if let Err(err) = run(cli) {
    print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .init();
}

fn run(cli: Cli) -> Result<()> {
  // Validated before anything touches the environment, filesystem or installer.
  let platform = match cli.platform.as_deref() {
    Some(value) => Some(parse_platform(Some(value))?),
    None if cli.provisions() => Some(parse_platform(None)?),
    None => None,
  };

  if !cli.provisions() && !cli.list {
    print_warning("Nothing to do. Pass --create, --destroy <NAME> or --list.");
    return Ok(());
  }

  let mut store_dir = None;

  if cli.provisions()
    && let Some(platform) = platform
  {
    let config = Config::load().context("failed to load configuration")?;
    debug!(?config, "loaded configuration");
    provision(&cli, &config, platform)?;
    store_dir = Some(config.store_dir());
  }

  if cli.list {
    let store_dir = match store_dir {
      Some(dir) => dir,
      None => Config::load_store_dir().context("failed to load configuration")?,
    };
    cmd::cmd_list(&StoreFile::new(store_dir), platform, cli.output)?;
  }

  Ok(())
}

fn provision(cli: &Cli, config: &Config, platform: Platform) -> Result<()> {
  let cwd = std::env::current_dir().context("failed to get working directory")?;
  let installer = InstallerScript::locate(&cwd)?;

  let automator = Automator::from_config(config, installer);
  automator.prepare()?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  rt.block_on(async {
    interrupt::spawn_observer();

    if cli.create {
      cmd::cmd_create(&automator, platform, cli.dryrun, cli.output).await?;
    }
    if let Some(name) = &cli.destroy {
      cmd::cmd_destroy(&automator, name, platform, cli.dryrun, cli.output).await?;
    }
    Ok(())
  })
}
