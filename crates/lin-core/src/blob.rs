//! Blob-existence seam.
//!
//! Descriptors resolve `source` and `exists` at construction time through a
//! [`BlobStore`] capability injected by the caller. The production
//! implementation lives in `lin-blob`; tests use the stub in
//! [`crate::test_support`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a file path resolves: the local filesystem or a cloud bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Local,
    Cloud,
}

impl Source {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Cloud => "cloud",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path classification and existence checks.
///
/// Existence checks are degraded, never failing: a probe that errors reports
/// `false` so that provenance bookkeeping cannot fail a pipeline merely
/// because a remote check did.
#[allow(async_fn_in_trait)]
pub trait BlobStore: Send + Sync {
    /// Classify a path as cloud-resident or local by its syntax alone.
    fn classify(&self, path: &str) -> Source;

    /// Whether the path currently exists. Errors report `false`.
    async fn exists(&self, path: &str) -> bool;

    /// Resolve existence for many paths at once.
    ///
    /// The default resolves sequentially; implementations with network
    /// round trips override this with a bounded-parallel fan-out. There is
    /// no completion-order requirement and no partial-failure semantics
    /// beyond per-path `false`.
    async fn exists_bulk(&self, paths: &[String]) -> HashMap<String, bool> {
        let mut resolved = HashMap::with_capacity(paths.len());
        for path in paths {
            resolved.insert(path.clone(), self.exists(path).await);
        }
        resolved
    }
}
