//! Store error types.

use thiserror::Error;

/// Errors raised by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored entry matches the tag (and pinned version, if any).
    #[error("Entry not found: {tag} ({pin})", pin = .version.as_deref().unwrap_or("most recent"))]
    EntryNotFound {
        tag: String,
        version: Option<String>,
    },

    /// The entry exists but holds no output file with the requested tag.
    #[error("File not found: no output '{file_tag}' on entry '{entry_tag}'")]
    FileNotFound {
        entry_tag: String,
        file_tag: String,
    },

    /// Reading or writing the backing file failed. Serialization errors
    /// surface here too, since the JSONL layer reports them as I/O.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
