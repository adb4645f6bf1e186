//! Descriptor structs for provenance records.
//!
//! Each descriptor has a fixed, named field set; unknown fields are rejected
//! at deserialization (`deny_unknown_fields`). Descriptors are built in
//! memory, mutated only during construction and attachment, and frozen once
//! handed to the store.

mod entry;
mod input_file;
mod output_file;

pub use entry::{Entry, EntryDraft};
pub use input_file::{InputFile, InputFileSpec};
pub use output_file::{OutputFile, OutputFileSpec};
