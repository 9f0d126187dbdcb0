//! Test utilities for ocauto-lib.
//!
//! Helpers for tests that spawn real processes, including a fake installer
//! script that records how it was invoked.

use std::fs;
use std::path::{Path, PathBuf};

use crate::consts::INSTALL_SCRIPT;

/// Name of the file the recording installer appends its arguments to.
pub const INVOCATIONS_LOG: &str = "invocations.log";

/// Installer body that records its arguments and reports progress on both streams.
pub const RECORDING_INSTALLER: &str = r#"
echo "$@" >> "$(dirname "$0")/invocations.log"
echo "installer starting"
echo "installer warning" >&2
"#;

/// Installer body that records its arguments, then fails.
pub const FAILING_INSTALLER: &str = r#"
echo "$@" >> "$(dirname "$0")/invocations.log"
echo "provisioning failed" >&2
exit 4
"#;

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

/// Write an executable installer script at `<root>/scripts/run-openshift-install.sh`.
#[cfg(unix)]
pub fn write_installer(root: &Path, body: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = root.join(INSTALL_SCRIPT);
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
  fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Argument lines recorded by [`RECORDING_INSTALLER`] / [`FAILING_INSTALLER`].
pub fn recorded_invocations(root: &Path) -> Vec<String> {
  let log = root.join(INSTALL_SCRIPT).with_file_name(INVOCATIONS_LOG);
  match fs::read_to_string(log) {
    Ok(content) => content.lines().map(str::to_string).collect(),
    Err(_) => Vec::new(),
  }
}
