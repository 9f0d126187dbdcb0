use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Stored metadata for one provisioned cluster.
///
/// Records have no surrogate identifier: two records are the same cluster
/// when name, directory and platform all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterRecord {
  pub name: String,
  pub dir: PathBuf,
  pub platform: Platform,
}

impl ClusterRecord {
  pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>, platform: Platform) -> Self {
    Self {
      name: name.into(),
      dir: dir.into(),
      platform,
    }
  }
}
