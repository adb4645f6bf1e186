use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::blob::{BlobStore, Source};
use crate::errors::CoreError;

/// An output file produced by a processing step.
///
/// Owned by exactly one [`Entry`](crate::entities::Entry), never persisted on
/// its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputFile {
    /// Unique among the owning entry's output files.
    pub tag: String,
    pub path: String,
    pub description: String,
    pub source: Source,
    /// Calendar date the output was recorded.
    pub date: NaiveDate,
    /// Resolved once at construction; a failed probe reports `false`.
    pub exists: bool,
    /// Whether the tag was auto-assigned. Attachment uses this to keep
    /// anonymous artifacts unique within one entry.
    #[serde(skip)]
    pub(crate) auto_named: bool,
}

/// Construction spec for an [`OutputFile`].
#[derive(Debug, Clone, Default)]
pub struct OutputFileSpec {
    /// `None` auto-names the file `Artifact` (uniquified at attachment).
    pub tag: Option<String>,
    pub path: String,
    /// Required when `tag` is given; defaults for anonymous artifacts.
    pub description: Option<String>,
    /// Inferred from the path syntax when not given.
    pub source: Option<Source>,
}

impl OutputFile {
    /// Build an output file, resolving `source` and `exists` against `blob`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the path is empty, or if a tagged
    /// spec carries no description.
    pub async fn create<B: BlobStore + ?Sized>(
        spec: OutputFileSpec,
        blob: &B,
    ) -> Result<Self, CoreError> {
        if spec.path.is_empty() {
            return Err(CoreError::Validation(
                "output file path is required".to_string(),
            ));
        }

        let (tag, description, auto_named) = match spec.tag {
            Some(tag) => {
                let description = spec.description.ok_or_else(|| {
                    CoreError::Validation(format!(
                        "output file '{tag}' requires a description"
                    ))
                })?;
                (tag, description, false)
            }
            None => (
                "Artifact".to_string(),
                spec.description
                    .unwrap_or_else(|| "Data artifact.".to_string()),
                true,
            ),
        };

        let source = spec
            .source
            .unwrap_or_else(|| blob.classify(&spec.path));
        let exists = blob.exists(&spec.path).await;

        Ok(Self {
            tag,
            path: spec.path,
            description,
            source,
            date: Utc::now().date_naive(),
            exists,
            auto_named,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{OutputFile, OutputFileSpec};
    use crate::blob::Source;
    use crate::test_support::StubBlobStore;

    #[tokio::test]
    async fn source_imputed_from_path_syntax() {
        let blob = StubBlobStore::default();
        let cloud = OutputFile::create(
            OutputFileSpec {
                tag: Some("genotypes".to_string()),
                path: "gs://bucket/genotypes.mt".to_string(),
                description: Some("Filtered genotypes.".to_string()),
                source: None,
            },
            &blob,
        )
        .await
        .unwrap();
        assert_eq!(cloud.source, Source::Cloud);

        let local = OutputFile::create(
            OutputFileSpec {
                tag: Some("manifest".to_string()),
                path: "/data/manifest.tsv".to_string(),
                description: Some("Sample manifest.".to_string()),
                source: None,
            },
            &blob,
        )
        .await
        .unwrap();
        assert_eq!(local.source, Source::Local);
    }

    #[tokio::test]
    async fn explicit_source_wins_over_inference() {
        let blob = StubBlobStore::default();
        let file = OutputFile::create(
            OutputFileSpec {
                tag: Some("mirror".to_string()),
                path: "/mnt/gcs-fuse/data.tsv".to_string(),
                description: Some("Fuse-mounted mirror.".to_string()),
                source: Some(Source::Cloud),
            },
            &blob,
        )
        .await
        .unwrap();
        assert_eq!(file.source, Source::Cloud);
    }

    #[tokio::test]
    async fn anonymous_output_defaults() {
        let blob = StubBlobStore::default();
        let file = OutputFile::create(
            OutputFileSpec {
                path: "gs://bucket/out.tsv".to_string(),
                ..Default::default()
            },
            &blob,
        )
        .await
        .unwrap();
        assert_eq!(file.tag, "Artifact");
        assert_eq!(file.description, "Data artifact.");
        assert!(file.auto_named);
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let blob = StubBlobStore::default();
        let result = OutputFile::create(OutputFileSpec::default(), &blob).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn tagged_output_without_description_is_rejected() {
        let blob = StubBlobStore::default();
        let result = OutputFile::create(
            OutputFileSpec {
                tag: Some("counts".to_string()),
                path: "/data/counts.tsv".to_string(),
                ..Default::default()
            },
            &blob,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn exists_resolved_through_blob_store() {
        let blob = StubBlobStore::default().with_existing("gs://bucket/present.tsv");
        let present = OutputFile::create(
            OutputFileSpec {
                tag: Some("present".to_string()),
                path: "gs://bucket/present.tsv".to_string(),
                description: Some("There.".to_string()),
                source: None,
            },
            &blob,
        )
        .await
        .unwrap();
        assert!(present.exists);

        let absent = OutputFile::create(
            OutputFileSpec {
                tag: Some("absent".to_string()),
                path: "gs://bucket/missing.tsv".to_string(),
                description: Some("Not there.".to_string()),
                source: None,
            },
            &blob,
        )
        .await
        .unwrap();
        assert!(!absent.exists);
    }
}
