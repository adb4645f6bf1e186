//! # lin-core
//!
//! Core types for the lineage provenance ledger.
//!
//! This crate provides the foundational pieces shared across all lineage crates:
//! - Descriptor structs for provenance records (`Entry`, `InputFile`, `OutputFile`)
//! - The `RecordSet` filtered-sequence helper
//! - The version comparator, the sole authority for "most recent"
//! - Seam traits injected at construction time (`BlobStore`, `OutputLookup`,
//!   `VersionProvider`)
//! - Cross-cutting error types

pub mod blob;
pub mod entities;
pub mod errors;
pub mod lookup;
pub mod provider;
pub mod recordset;
pub mod test_support;
pub mod version;

pub use blob::{BlobStore, Source};
pub use entities::{Entry, EntryDraft, InputFile, InputFileSpec, OutputFile, OutputFileSpec};
pub use errors::CoreError;
pub use lookup::{OutputLookup, ResolvedOutput};
pub use provider::{ExplicitVersion, GitDescribeVersion, VersionProvider};
pub use recordset::RecordSet;
pub use version::Version;
