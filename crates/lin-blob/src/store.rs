//! The GCS-backed blob store.

use std::collections::HashMap;
use std::sync::Arc;

use lin_core::{BlobStore, Source};
use object_store::ObjectStore;
use object_store::gcp::{GoogleCloudStorage, GoogleCloudStorageBuilder};
use regex::Regex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::BlobError;
use crate::paths::{is_cloud_path, local_exists, split_gs_url};

/// Ceiling on concurrent existence probes in [`BlobStore::exists_bulk`].
/// Keeps large sweeps from serializing one network round trip per path
/// without flooding the provider.
pub const DEFAULT_PARALLELISM: usize = 150;

/// Blob store resolving `gs://` paths against Google Cloud Storage and
/// everything else against the local filesystem.
///
/// Credentials come from the ambient GCS environment (service-account key or
/// metadata server), the same way the provider's own tooling finds them.
#[derive(Debug, Clone)]
pub struct GcsBlobStore {
    parallelism: usize,
}

impl Default for GcsBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GcsBlobStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parallelism: DEFAULT_PARALLELISM,
        }
    }

    /// Override the bulk-probe concurrency ceiling.
    #[must_use]
    pub const fn with_parallelism(parallelism: usize) -> Self {
        Self { parallelism }
    }

    fn client(bucket: &str) -> Result<GoogleCloudStorage, BlobError> {
        Ok(GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()?)
    }

    async fn cloud_exists(path: &str) -> Result<bool, BlobError> {
        let (bucket, key) = split_gs_url(path)?;
        let store = Self::client(&bucket)?;
        match store.head(&key).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => {
                // Listing-style semantics: a bare prefix with children (a
                // "directory", e.g. a partitioned table) counts as present.
                let listing = store.list_with_delimiter(Some(&key)).await?;
                Ok(!listing.objects.is_empty() || !listing.common_prefixes.is_empty())
            }
            Err(e) => Err(BlobError::from(e)),
        }
    }

    /// List one level under a cloud prefix, optionally filtered by a regex.
    ///
    /// Returns full `gs://` URLs for both objects and sub-prefixes; prefixes
    /// come without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::NotCloud`] for local paths,
    /// [`BlobError::Pattern`] for an invalid filter, and
    /// [`BlobError::ObjectStore`] if the listing itself fails.
    pub async fn list(
        &self,
        path: &str,
        pattern: Option<&str>,
    ) -> Result<Vec<String>, BlobError> {
        if !is_cloud_path(path) {
            return Err(BlobError::NotCloud(path.to_string()));
        }
        let filter = pattern.map(Regex::new).transpose()?;

        let (bucket, key) = split_gs_url(path)?;
        let store = Self::client(&bucket)?;
        let listing = store.list_with_delimiter(Some(&key)).await?;

        let mut names: Vec<String> = listing
            .common_prefixes
            .iter()
            .map(|prefix| format!("gs://{bucket}/{prefix}"))
            .collect();
        names.extend(
            listing
                .objects
                .iter()
                .map(|object| format!("gs://{bucket}/{}", object.location)),
        );
        if let Some(filter) = &filter {
            names.retain(|name| filter.is_match(name));
        }
        names.sort();
        Ok(names)
    }
}

impl BlobStore for GcsBlobStore {
    fn classify(&self, path: &str) -> Source {
        if is_cloud_path(path) {
            Source::Cloud
        } else {
            Source::Local
        }
    }

    async fn exists(&self, path: &str) -> bool {
        if is_cloud_path(path) {
            match Self::cloud_exists(path).await {
                Ok(exists) => exists,
                Err(e) => {
                    tracing::warn!(path, %e, "cloud existence check failed; treating as absent");
                    false
                }
            }
        } else {
            local_exists(path)
        }
    }

    async fn exists_bulk(&self, paths: &[String]) -> HashMap<String, bool> {
        let mut set = JoinSet::new();
        let semaphore = Arc::new(Semaphore::new(self.parallelism.max(1)));
        for path in paths {
            let store = self.clone();
            let sem = semaphore.clone();
            let path = path.clone();
            set.spawn(async move {
                let Ok(_permit) = sem.acquire().await else {
                    return (path, false);
                };
                let exists = store.exists(&path).await;
                (path, exists)
            });
        }

        let mut resolved = HashMap::with_capacity(paths.len());
        while let Some(Ok((path, exists))) = set.join_next().await {
            resolved.insert(path, exists);
        }
        resolved
    }
}
