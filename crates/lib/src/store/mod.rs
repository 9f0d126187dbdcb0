//! Cluster record store.
//!
//! The store is a single JSON file mapping platform name to an ordered list
//! of cluster records:
//!
//! ```text
//! {store_dir}/
//! ├── clusterinfo.json     # {"clusters": {"aws": [{"name", "dir", "platform"}]}}
//! └── .clusterinfo.lock    # advisory lock held during read-modify-write
//! ```

mod lock;
mod storage;
mod types;

pub use lock::{LockMetadata, StoreLock, StoreLockError};
pub use storage::{StoreError, StoreFile, load, load_or_default, save};
pub use types::ClusterStore;
