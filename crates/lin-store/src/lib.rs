//! # lin-store
//!
//! The versioned record store of the lineage ledger.
//!
//! A [`Tracker`] owns the durable collection of [`Entry`](lin_core::Entry)
//! records, persisted as one JSON record per line in a single file. Every
//! save runs insert, deduplicate, and label-recency as one logical unit,
//! then rewrites the whole file: the collection is not row-addressable on
//! disk and readers deserialize it entirely.
//!
//! Single-process, single-writer assumed: two processes saving against the
//! same store file can race inside the write path and leave duplicate rows or
//! a stale `most_recent` flag. That is a documented limitation, not a
//! guarantee.

mod error;
mod explode;
mod query;
mod tracker;

pub use error::StoreError;
pub use explode::{Direction, FileRow};
pub use tracker::Tracker;
