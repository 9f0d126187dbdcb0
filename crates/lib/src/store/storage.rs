//! Reading and writing the cluster store file.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::cluster::ClusterRecord;
use crate::consts::STORE_FILENAME;
use crate::platform::Platform;

use super::lock::{StoreLock, StoreLockError};
use super::types::ClusterStore;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("cluster store {} does not exist", .0.display())]
  NotFound(PathBuf),

  #[error("unable to read cluster store {}: {source}", .path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("unable to parse cluster store {}: {source}", .path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("unable to serialize cluster store: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("unable to write cluster store {}: {source}", .path.display())]
  Write { path: PathBuf, source: io::Error },

  #[error(transparent)]
  Lock(#[from] StoreLockError),
}

/// Load the store at `path`.
///
/// A missing file is [`StoreError::NotFound`].
pub fn load(path: &Path) -> Result<ClusterStore, StoreError> {
  let content = fs::read_to_string(path).map_err(|e| {
    if e.kind() == io::ErrorKind::NotFound {
      StoreError::NotFound(path.to_path_buf())
    } else {
      StoreError::Read {
        path: path.to_path_buf(),
        source: e,
      }
    }
  })?;

  serde_json::from_str(&content).map_err(|e| StoreError::Parse {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Load the store at `path`, treating a missing file as an empty store.
pub fn load_or_default(path: &Path) -> Result<ClusterStore, StoreError> {
  match load(path) {
    Err(StoreError::NotFound(_)) => Ok(ClusterStore::new()),
    other => other,
  }
}

/// Write `store` to `path`, replacing the whole file.
///
/// Writes to a sibling `.tmp` file first and renames it into place, so
/// readers never observe a partially written store.
pub fn save(store: &ClusterStore, path: &Path) -> Result<(), StoreError> {
  let content = serde_json::to_string_pretty(store).map_err(StoreError::Serialize)?;
  let temp_path = temp_path(path);

  fs::write(&temp_path, &content).map_err(|e| StoreError::Write {
    path: temp_path.clone(),
    source: e,
  })?;
  fs::rename(&temp_path, path).map_err(|e| StoreError::Write {
    path: path.to_path_buf(),
    source: e,
  })?;

  debug!(path = %path.display(), clusters = store.len(), "saved cluster store");
  Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(OsString::from).unwrap_or_default();
  name.push(".tmp");
  path.with_file_name(name)
}

/// The cluster store file inside a store directory.
///
/// Mutations run under an exclusive [`StoreLock`] spanning the whole
/// read-modify-write, so concurrent invocations cannot lose each other's
/// updates.
#[derive(Debug, Clone)]
pub struct StoreFile {
  dir: PathBuf,
}

impl StoreFile {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Path to `clusterinfo.json`.
  pub fn path(&self) -> PathBuf {
    self.dir.join(STORE_FILENAME)
  }

  pub fn load(&self) -> Result<ClusterStore, StoreError> {
    load(&self.path())
  }

  pub fn load_or_default(&self) -> Result<ClusterStore, StoreError> {
    load_or_default(&self.path())
  }

  /// Recorded clusters on `platform`, or on every platform when `None`.
  ///
  /// A store that was never written lists nothing.
  pub fn list(&self, platform: Option<Platform>) -> Result<Vec<ClusterRecord>, StoreError> {
    let store = self.load_or_default()?;
    let records = match platform {
      Some(platform) => store.records(platform).to_vec(),
      None => store.iter().cloned().collect(),
    };
    Ok(records)
  }

  /// Record a newly created cluster, creating the store file if needed.
  pub fn append_record(&self, record: &ClusterRecord) -> Result<(), StoreError> {
    let _lock = StoreLock::acquire(&self.dir, "create")?;

    let path = self.path();
    let mut store = load_or_default(&path)?;
    store.append(record.clone());
    save(&store, &path)
  }

  /// Forget a destroyed cluster.
  ///
  /// The store file must exist. Returns whether a matching record was found;
  /// the file is rewritten either way.
  pub fn remove_record(&self, record: &ClusterRecord) -> Result<bool, StoreError> {
    let _lock = StoreLock::acquire(&self.dir, "destroy")?;

    let path = self.path();
    let mut store = load(&path)?;
    let removed = store.remove_matching(record);
    save(&store, &path)?;
    Ok(removed)
  }
}
