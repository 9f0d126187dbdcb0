//! Cloud platforms a cluster can be provisioned on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A supported cloud platform.
///
/// Serializes as the lowercase name, which is also the key used to bucket
/// records in the cluster store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  Aws,
  Azure,
}

impl Platform {
  pub const ALL: [Platform; 2] = [Platform::Aws, Platform::Azure];

  pub fn as_str(&self) -> &'static str {
    match self {
      Platform::Aws => "aws",
      Platform::Azure => "azure",
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
  #[error("Please enter a platform to create the cluster on")]
  Missing,

  #[error("Platform '{0}' is not supported. Try aws/azure")]
  Unsupported(String),
}

impl FromStr for Platform {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "aws" => Ok(Platform::Aws),
      "azure" => Ok(Platform::Azure),
      "" => Err(PlatformError::Missing),
      other => Err(PlatformError::Unsupported(other.to_string())),
    }
  }
}

/// Parse an optional platform argument, treating `None` like an empty value.
pub fn parse_platform(value: Option<&str>) -> Result<Platform, PlatformError> {
  value.unwrap_or_default().parse()
}
