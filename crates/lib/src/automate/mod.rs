//! Create and destroy clusters.
//!
//! Each operation is a short, linear flow: decide on the cluster record,
//! run the installer (unless this is a dry run), then update the store.
//! Errors are returned to the caller; nothing here exits the process.
//!
//! A failure after a successful installer run (e.g. the store cannot be
//! written) leaves a provisioned cluster that is not recorded. That state is
//! reported but not repaired.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{info, warn};

use crate::cluster::{ClusterRecord, generate_name};
use crate::config::Config;
use crate::installer::{InstallAction, InstallerError, InstallerScript};
use crate::platform::Platform;
use crate::store::{StoreError, StoreFile};

#[derive(Debug, Error)]
pub enum AutomateError {
  #[error("unable to create directory {}: {source}", .path.display())]
  CreateDir { path: PathBuf, source: io::Error },

  #[error(transparent)]
  Store(#[from] StoreError),

  #[error(transparent)]
  Installer(#[from] InstallerError),

  #[error("cluster store update did not complete: {0}")]
  StoreTask(#[source] JoinError),
}

/// Result of a create request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOutcome {
  pub cluster: ClusterRecord,
  /// The installer invocation that was (or, on a dry run, would have been) executed.
  pub invocation: String,
  pub dry_run: bool,
}

/// Result of a destroy request.
#[derive(Debug, Clone, Serialize)]
pub struct DestroyOutcome {
  pub cluster: ClusterRecord,
  pub invocation: String,
  pub dry_run: bool,
  /// Whether the cluster was found in the store (otherwise the default directory was used).
  pub found: bool,
  /// Whether a record was removed from the store.
  pub removed: bool,
}

/// Drives the installer and keeps the cluster store in sync with it.
#[derive(Debug, Clone)]
pub struct Automator {
  installer: InstallerScript,
  store: StoreFile,
  name_prefix: String,
}

impl Automator {
  pub fn new(name_prefix: impl Into<String>, store_dir: impl Into<PathBuf>, installer: InstallerScript) -> Self {
    Self {
      installer,
      store: StoreFile::new(store_dir),
      name_prefix: name_prefix.into(),
    }
  }

  /// Build from configuration: names use the configured prefix and records
  /// live under [`Config::store_dir`].
  pub fn from_config(config: &Config, installer: InstallerScript) -> Self {
    Self::new(&config.cluster_name_prefix, config.store_dir(), installer)
  }

  pub fn store(&self) -> &StoreFile {
    &self.store
  }

  pub fn store_dir(&self) -> &Path {
    self.store.dir()
  }

  /// Create the store directory (mode 0755) if it does not exist.
  pub fn prepare(&self) -> Result<(), AutomateError> {
    let dir = self.store_dir();
    if dir.is_dir() {
      return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
      use std::os::unix::fs::DirBuilderExt;
      builder.mode(0o755);
    }

    builder.create(dir).map_err(|source| AutomateError::CreateDir {
      path: dir.to_path_buf(),
      source,
    })?;
    info!(directory = %dir.display(), "created store directory");
    Ok(())
  }

  /// Provision a new cluster on `platform` and record it.
  ///
  /// The store is only updated after the installer succeeds. A dry run logs
  /// the invocation and touches nothing.
  pub async fn create(&self, platform: Platform, dry_run: bool) -> Result<CreateOutcome, AutomateError> {
    info!(platform = %platform, "execute OpenShift install create");

    let cluster = ClusterRecord::new(
      generate_name(&self.name_prefix, platform),
      self.store_dir(),
      platform,
    );
    let invocation = self.installer.describe(InstallAction::Create, &cluster);

    if dry_run {
      info!(invocation = %invocation, "dry run, would exec installer");
      return Ok(CreateOutcome {
        cluster,
        invocation,
        dry_run,
      });
    }

    self.installer.run(InstallAction::Create, &cluster).await?;
    info!(cluster = %cluster.name, "created cluster");

    let record = cluster.clone();
    self
      .update_store(move |store| store.append_record(&record))
      .await?;

    Ok(CreateOutcome {
      cluster,
      invocation,
      dry_run,
    })
  }

  /// Tear down the cluster `name` on `platform` and forget it.
  ///
  /// The store must exist. A name that is not recorded is still destroyed,
  /// using the default store directory.
  pub async fn destroy(&self, name: &str, platform: Platform, dry_run: bool) -> Result<DestroyOutcome, AutomateError> {
    info!(platform = %platform, cluster = %name, "execute OpenShift install destroy");

    let store = self.store.load()?;

    let current = store.records(platform);
    info!(platform = %platform, count = current.len(), "current clusters on platform");
    for record in current {
      info!(cluster = %record.name, dir = %record.dir.display(), "cluster");
    }

    let (cluster, found) = match store.find(platform, name) {
      Some(record) => (record.clone(), true),
      None => {
        warn!(
          cluster = %name,
          dir = %self.store_dir().display(),
          "cluster not found, trying to delete cluster in default directory"
        );
        (ClusterRecord::new(name, self.store_dir(), platform), false)
      }
    };
    let invocation = self.installer.describe(InstallAction::Delete, &cluster);

    if dry_run {
      info!(invocation = %invocation, "dry run, would exec installer");
      return Ok(DestroyOutcome {
        cluster,
        invocation,
        dry_run,
        found,
        removed: false,
      });
    }

    self.installer.run(InstallAction::Delete, &cluster).await?;
    info!(cluster = %cluster.name, "destroyed cluster");

    let record = cluster.clone();
    let removed = self
      .update_store(move |store| store.remove_record(&record))
      .await?;

    Ok(DestroyOutcome {
      cluster,
      invocation,
      dry_run,
      found,
      removed,
    })
  }

  /// Run a store read-modify-write on the blocking pool, since waiting for
  /// the store lock blocks the calling thread.
  async fn update_store<T, F>(&self, update: F) -> Result<T, AutomateError>
  where
    F: FnOnce(&StoreFile) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
  {
    let store = self.store.clone();
    let result = tokio::task::spawn_blocking(move || update(&store))
      .await
      .map_err(AutomateError::StoreTask)?;
    Ok(result?)
  }
}
