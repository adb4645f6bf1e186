//! Path syntax: cloud classification, home expansion, local existence.

use std::path::PathBuf;

use object_store::path::Path as ObjectPath;

use crate::error::BlobError;

/// Prefix marking a path as cloud-resident.
pub const CLOUD_SCHEME: &str = "gs:";

/// Whether the path is cloud-resident by syntax alone.
#[must_use]
pub fn is_cloud_path(path: &str) -> bool {
    path.starts_with(CLOUD_SCHEME)
}

/// Expand a leading `~` to the user's home directory.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Whether a local path exists after home expansion and canonicalization.
/// Canonicalization follows symlinks; a broken link counts as absent.
#[must_use]
pub fn local_exists(path: &str) -> bool {
    std::fs::canonicalize(expand_home(path)).is_ok()
}

/// Split a `gs://bucket/key` URL into bucket and object key.
pub(crate) fn split_gs_url(path: &str) -> Result<(String, ObjectPath), BlobError> {
    let rest = path
        .strip_prefix("gs://")
        .ok_or_else(|| BlobError::InvalidPath(path.to_string()))?;
    let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
    if bucket.is_empty() {
        return Err(BlobError::InvalidPath(path.to_string()));
    }
    Ok((bucket.to_string(), ObjectPath::from(key)))
}
