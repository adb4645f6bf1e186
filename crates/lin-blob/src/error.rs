//! Blob error types.

use thiserror::Error;

/// Errors surfaced by listing and URL parsing.
///
/// Existence checks never return these; they degrade to `false` at the
/// [`BlobStore`](lin_core::BlobStore) boundary.
#[derive(Debug, Error)]
pub enum BlobError {
    /// The path is not a well-formed `gs://bucket/key` URL.
    #[error("invalid cloud path '{0}': expected gs://bucket/key")]
    InvalidPath(String),

    /// A cloud-only operation was given a local path.
    #[error("not a cloud path: {0}")]
    NotCloud(String),

    /// The listing filter is not a valid regular expression.
    #[error("invalid listing pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The storage provider rejected or failed the request.
    #[error(transparent)]
    ObjectStore(#[from] object_store::Error),
}
