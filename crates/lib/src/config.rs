//! Environment-derived configuration.
//!
//! Every setting is required and read from an `APP_`-prefixed variable:
//!
//! | Variable                 | Field                 |
//! |--------------------------|-----------------------|
//! | `APP_CLUSTERNAMEPREFIX`  | `cluster_name_prefix` |
//! | `APP_OCSTOREPATH`        | `oc_store_path`       |
//! | `APP_CLUSTERPULLSECRET`  | `cluster_pull_secret` |
//! | `APP_SSHKEY`             | `ssh_key`             |
//! | `APP_PLATFORM`           | `platform`            |
//!
//! [`Config::load`] first reads an optional `.env` file. Values from it are
//! exported into the process environment, so the installer script sees them too.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::consts::{ENV_PREFIX, STORE_DIR_NAME};

const CLUSTER_NAME_PREFIX: &str = "CLUSTERNAMEPREFIX";
const OC_STORE_PATH: &str = "OCSTOREPATH";
const CLUSTER_PULL_SECRET: &str = "CLUSTERPULLSECRET";
const SSH_KEY: &str = "SSHKEY";
const PLATFORM: &str = "PLATFORM";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("missing required environment variables: {}", .0.join(", "))]
  Missing(Vec<String>),

  #[error("failed to read .env file: {0}")]
  DotEnv(#[source] dotenvy::Error),
}

/// Application configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
  /// Prefix of every generated cluster name.
  pub cluster_name_prefix: String,
  /// Root under which cluster credentials and metadata are stored.
  pub oc_store_path: PathBuf,
  /// Pull secret handed to the installer.
  pub cluster_pull_secret: String,
  /// SSH public key handed to the installer.
  pub ssh_key: String,
  pub platform: String,
}

impl Config {
  /// Load configuration from an optional `.env` file and the environment.
  ///
  /// Variables already set in the environment take precedence over `.env`.
  pub fn load() -> Result<Self, ConfigError> {
    load_dotenv()?;
    Self::from_env()
  }

  /// Resolve only the store directory, from an optional `.env` file and the
  /// environment.
  ///
  /// Read-only commands need nothing but `APP_OCSTOREPATH`.
  pub fn load_store_dir() -> Result<PathBuf, ConfigError> {
    load_dotenv()?;
    Self::store_dir_from_env()
  }

  /// Like [`Config::load_store_dir`], without reading `.env`.
  pub fn store_dir_from_env() -> Result<PathBuf, ConfigError> {
    let key = env_key(OC_STORE_PATH);
    match std::env::var(&key) {
      Ok(value) if !value.is_empty() => Ok(PathBuf::from(value).join(STORE_DIR_NAME)),
      _ => Err(ConfigError::Missing(vec![key])),
    }
  }

  /// Load configuration from the process environment only.
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut missing = Vec::new();
    let mut require = |name: &str| {
      let key = env_key(name);
      match lookup(&key) {
        Some(value) if !value.is_empty() => value,
        _ => {
          missing.push(key);
          String::new()
        }
      }
    };

    let config = Config {
      cluster_name_prefix: require(CLUSTER_NAME_PREFIX),
      oc_store_path: PathBuf::from(require(OC_STORE_PATH)),
      cluster_pull_secret: require(CLUSTER_PULL_SECRET),
      ssh_key: require(SSH_KEY),
      platform: require(PLATFORM),
    };

    if !missing.is_empty() {
      return Err(ConfigError::Missing(missing));
    }
    Ok(config)
  }

  /// Directory holding the cluster metadata file (`<oc_store_path>/OCClusterAutomator`).
  pub fn store_dir(&self) -> PathBuf {
    self.oc_store_path.join(STORE_DIR_NAME)
  }
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("cluster_name_prefix", &self.cluster_name_prefix)
      .field("oc_store_path", &self.oc_store_path)
      .field("cluster_pull_secret", &"<redacted>")
      .field("ssh_key", &"<redacted>")
      .field("platform", &self.platform)
      .finish()
  }
}

fn load_dotenv() -> Result<(), ConfigError> {
  match dotenvy::dotenv() {
    Ok(path) => debug!(path = %path.display(), "loaded .env file"),
    Err(e) if e.not_found() => {}
    Err(e) => return Err(ConfigError::DotEnv(e)),
  }
  Ok(())
}

fn env_key(name: &str) -> String {
  format!("{}_{}", ENV_PREFIX, name)
}
