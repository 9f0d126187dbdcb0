//! Cluster records and naming.

mod name;
mod types;

pub use name::{SUFFIX_LEN, generate_name};
pub use types::ClusterRecord;
