//! Shared utilities.
//!
//! Currently only helpers for tests that need to spawn real processes.

#[cfg(test)]
pub mod testutil;
