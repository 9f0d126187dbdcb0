//! The external installer script.
//!
//! Provisioning and teardown are delegated entirely to
//! `scripts/run-openshift-install.sh`, invoked as:
//!
//! ```text
//! run-openshift-install.sh -s <dir> -a <create|delete> -n <name> -p <platform>
//! ```

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use humantime::format_duration;
use thiserror::Error;
use tracing::{Instrument, error, info, info_span};

use crate::cluster::ClusterRecord;
use crate::consts::INSTALL_SCRIPT;
use crate::execute::{ExecError, RunSummary, run_streaming};

/// What the installer should do with a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
  Create,
  Delete,
}

impl InstallAction {
  pub fn as_str(&self) -> &'static str {
    match self {
      InstallAction::Create => "create",
      InstallAction::Delete => "delete",
    }
  }
}

impl fmt::Display for InstallAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error)]
pub enum InstallerError {
  #[error("failed to stat {}: {source}", .path.display())]
  Missing { path: PathBuf, source: io::Error },

  #[error("failed to {action} cluster {name}: {source}")]
  Run {
    action: InstallAction,
    name: String,
    source: ExecError,
  },
}

/// Handle to the installer script.
#[derive(Debug, Clone)]
pub struct InstallerScript {
  path: PathBuf,
}

impl InstallerScript {
  /// Find the installer under `cwd`, failing if it does not exist.
  pub fn locate(cwd: &Path) -> Result<Self, InstallerError> {
    let path = cwd.join(INSTALL_SCRIPT);
    let path = dunce::canonicalize(&path).map_err(|source| InstallerError::Missing { path, source })?;
    Ok(Self { path })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Positional arguments for `action` on `record`.
  pub fn args(action: InstallAction, record: &ClusterRecord) -> Vec<OsString> {
    vec![
      "-s".into(),
      record.dir.clone().into_os_string(),
      "-a".into(),
      action.as_str().into(),
      "-n".into(),
      record.name.clone().into(),
      "-p".into(),
      record.platform.as_str().into(),
    ]
  }

  /// Shell-like rendering of the invocation, for dry runs and logs.
  pub fn describe(&self, action: InstallAction, record: &ClusterRecord) -> String {
    format!(
      "{} -s {} -a {} -n {} -p {}",
      self.path.display(),
      record.dir.display(),
      action,
      record.name,
      record.platform
    )
  }

  /// Run the installer for `action` on `record`, streaming its output.
  pub async fn run(&self, action: InstallAction, record: &ClusterRecord) -> Result<RunSummary, InstallerError> {
    let span = info_span!("install", action = %action, cluster = %record.name);

    async {
      info!(script = %self.path.display(), platform = %record.platform, "running installer");

      match run_streaming(&self.path, Self::args(action, record)).await {
        Ok(summary) => {
          info!(
            elapsed = %format_duration(round_secs(summary.elapsed)),
            "installer finished"
          );
          Ok(summary)
        }
        Err(source) => {
          error!(error = %source, "installer failed");
          Err(InstallerError::Run {
            action,
            name: record.name.clone(),
            source,
          })
        }
      }
    }
    .instrument(span)
    .await
  }
}

fn round_secs(elapsed: std::time::Duration) -> std::time::Duration {
  std::time::Duration::from_secs(elapsed.as_secs())
}
