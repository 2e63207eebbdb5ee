//! Configuration for file-backed repositories.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::persistence::Codec;

/// Where and how a repository persists its records.
///
/// ```json
/// { "path": "data/groceries.json", "codec": "json", "autosave": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Location of the single text artifact.
    pub path: PathBuf,

    #[serde(default)]
    pub codec: Codec,

    /// Write the artifact after every successful mutation.
    #[serde(default)]
    pub autosave: bool,
}

impl PersistenceConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            codec: Codec::default(),
            autosave: false,
        }
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, PersistenceError> {
        let content = std::fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| PersistenceError::Decode(e.to_string()))
    }
}
