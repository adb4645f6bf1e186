//! Blob-probe configuration.

use serde::{Deserialize, Serialize};

/// Default bulk existence-check concurrency.
const fn default_parallelism() -> usize {
    150
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlobConfig {
    /// Ceiling on concurrent existence probes in bulk checks.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
        }
    }
}
