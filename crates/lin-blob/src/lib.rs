//! # lin-blob
//!
//! Blob-existence capability for the lineage ledger.
//!
//! Implements the [`BlobStore`](lin_core::BlobStore) seam: `gs:`-prefixed
//! paths are cloud-resident and probed through `object_store`'s GCS client;
//! everything else is a local filesystem path checked after home expansion
//! and canonicalization. All probes are degraded: failures report "absent"
//! with a warning rather than propagating, so bookkeeping never fails a
//! pipeline because an existence check did.

mod error;
mod paths;
mod store;

pub use error::BlobError;
pub use paths::{CLOUD_SCHEME, expand_home, is_cloud_path, local_exists};
pub use store::{DEFAULT_PARALLELISM, GcsBlobStore};
