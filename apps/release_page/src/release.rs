//! The release version descriptor shown on the page.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The descriptor compiled into the binary.
const BUNDLED_VERSION_JSON: &str = include_str!("../assets/version.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid release version document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Release version descriptor.
///
/// Only `version` is read; other fields of the document are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseVersion {
    version: String,
}

impl ReleaseVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let release = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), version = release.version(), "loaded release version");
        Ok(release)
    }

    /// The `assets/version.json` embedded at build time.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(BUNDLED_VERSION_JSON)
    }
}
