//! Record-store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default ledger location, project-local.
fn default_path() -> String {
    String::from(".lineage/ledger.jsonl")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path of the backing JSONL file.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl StoreConfig {
    /// The store path as a filesystem path.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}
