use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::cluster::ClusterRecord;
use crate::platform::Platform;

/// In-memory view of every recorded cluster, bucketed by platform.
///
/// Equality ignores empty buckets, so a store that gained and then lost a
/// record compares equal to the store it started as.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterStore {
  #[serde(default, deserialize_with = "null_as_empty")]
  pub clusters: BTreeMap<Platform, Vec<ClusterRecord>>,
}

impl ClusterStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append `record` to the end of its platform bucket.
  ///
  /// Duplicates are not rejected.
  pub fn append(&mut self, record: ClusterRecord) {
    self.clusters.entry(record.platform).or_default().push(record);
  }

  /// Remove the last record structurally equal to `record`.
  ///
  /// This undoes a preceding [`append`](Self::append) of the same record.
  /// Returns `false` and leaves the store untouched when nothing matches.
  pub fn remove_matching(&mut self, record: &ClusterRecord) -> bool {
    let Some(bucket) = self.clusters.get_mut(&record.platform) else {
      return false;
    };
    match bucket.iter().rposition(|r| r == record) {
      Some(index) => {
        bucket.remove(index);
        true
      }
      None => false,
    }
  }

  /// Records for `platform`, in insertion order.
  pub fn records(&self, platform: Platform) -> &[ClusterRecord] {
    self.clusters.get(&platform).map(Vec::as_slice).unwrap_or_default()
  }

  /// Last record on `platform` named `name`.
  pub fn find(&self, platform: Platform, name: &str) -> Option<&ClusterRecord> {
    self.records(platform).iter().rev().find(|r| r.name == name)
  }

  /// Total number of records across all platforms.
  pub fn len(&self) -> usize {
    self.clusters.values().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Iterate over all records, grouped by platform.
  pub fn iter(&self) -> impl Iterator<Item = &ClusterRecord> {
    self.clusters.values().flatten()
  }

  fn non_empty_buckets(&self) -> impl Iterator<Item = (&Platform, &Vec<ClusterRecord>)> {
    self.clusters.iter().filter(|(_, records)| !records.is_empty())
  }
}

impl PartialEq for ClusterStore {
  fn eq(&self, other: &Self) -> bool {
    self.non_empty_buckets().eq(other.non_empty_buckets())
  }
}

impl Eq for ClusterStore {}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<Platform, Vec<ClusterRecord>>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
