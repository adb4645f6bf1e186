//! Shared test utilities for lineage crates.
//!
//! [`StubBlobStore`] stands in for the real blob store so descriptor and
//! store tests never touch the filesystem or the network.

use std::collections::{HashMap, HashSet};

use crate::blob::{BlobStore, Source};

/// In-memory [`BlobStore`] for tests.
///
/// Classifies by the `gs:` prefix like the production store; existence is
/// answered from a fixed set of known paths.
#[derive(Debug, Clone, Default)]
pub struct StubBlobStore {
    existing: HashSet<String>,
}

impl StubBlobStore {
    /// Mark a path as existing.
    #[must_use]
    pub fn with_existing(mut self, path: &str) -> Self {
        self.existing.insert(path.to_string());
        self
    }

    /// Mark several paths as existing.
    #[must_use]
    pub fn with_all_existing<I: IntoIterator<Item = S>, S: Into<String>>(
        mut self,
        paths: I,
    ) -> Self {
        self.existing.extend(paths.into_iter().map(Into::into));
        self
    }
}

impl BlobStore for StubBlobStore {
    fn classify(&self, path: &str) -> Source {
        if path.starts_with("gs:") {
            Source::Cloud
        } else {
            Source::Local
        }
    }

    async fn exists(&self, path: &str) -> bool {
        self.existing.contains(path)
    }

    async fn exists_bulk(&self, paths: &[String]) -> HashMap<String, bool> {
        paths
            .iter()
            .map(|path| (path.clone(), self.existing.contains(path)))
            .collect()
    }
}
