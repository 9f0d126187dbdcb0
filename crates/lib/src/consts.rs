//! Names shared across the crate.

/// Application name, used in lock metadata and log output.
pub const APP_NAME: &str = "ocauto";

/// Prefix of every configuration environment variable (`APP_*`).
pub const ENV_PREFIX: &str = "APP";

/// Directory created under the configured store path to hold cluster metadata.
pub const STORE_DIR_NAME: &str = "OCClusterAutomator";

/// Cluster metadata file inside the store directory.
pub const STORE_FILENAME: &str = "clusterinfo.json";

/// Advisory lock file guarding read-modify-write of [`STORE_FILENAME`].
pub const LOCK_FILENAME: &str = ".clusterinfo.lock";

/// Installer script location, relative to the working directory.
pub const INSTALL_SCRIPT: &str = "scripts/run-openshift-install.sh";
