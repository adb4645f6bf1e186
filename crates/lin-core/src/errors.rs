//! Cross-cutting error types for lineage.
//!
//! Domain-specific errors (`StoreError`, `BlobError`, `ConfigError`) are
//! defined in their respective crates. `CoreError` covers the failures that
//! can originate from descriptor construction anywhere in the system.

use thiserror::Error;

/// Errors raised by descriptor construction and the seam traits.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Lookup through a seam trait returned no result.
    #[error("Not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A descriptor was constructed with an incomplete or inconsistent spec.
    /// Raised at construction, never stored.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
