//! ocauto-lib: core logic for the OpenShift cluster automator.
//!
//! This crate provides everything the `ocauto` binary does, without process
//! exit side effects:
//! - `Config`: required settings read from `APP_*` environment variables
//! - `ClusterRecord` / `ClusterStore`: cluster metadata persisted as JSON
//! - `run_streaming`: subprocess execution with output forwarded to the logger
//! - `InstallerScript`: the external provisioning script contract
//! - `Automator`: the create / destroy flows tying them together

pub mod automate;
pub mod cluster;
pub mod config;
pub mod consts;
pub mod execute;
pub mod installer;
pub mod platform;
pub mod store;
pub mod util;
