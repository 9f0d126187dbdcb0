//! Cluster name generation.
//!
//! Names look like `<prefix>-<platform>-<suffix>`. The suffix alternates
//! digits drawn from the current nanosecond timestamp (even positions) with
//! lowercase alphanumerics (odd positions), e.g. `6p7l0`.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::platform::Platform;

/// Length of the generated suffix.
pub const SUFFIX_LEN: usize = 5;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a fresh cluster name for `platform`.
pub fn generate_name(prefix: &str, platform: Platform) -> String {
  let nanos = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .unwrap_or_default()
    .as_nanos();
  let suffix = suffix_from(&mut rand::thread_rng(), nanos, SUFFIX_LEN);
  format!("{}-{}-{}", prefix, platform, suffix)
}

fn suffix_from<R: Rng>(rng: &mut R, nanos: u128, len: usize) -> String {
  let digits = nanos.to_string().into_bytes();

  (0..len)
    .map(|i| {
      let pool = if i % 2 == 1 { ALPHABET } else { digits.as_slice() };
      pool[rng.gen_range(0..pool.len())] as char
    })
    .collect()
}
