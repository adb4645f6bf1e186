use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::blob::{BlobStore, Source};
use crate::errors::CoreError;
use crate::lookup::OutputLookup;

/// An input file consumed by a processing step.
///
/// Either **literal** (caller supplies path and description directly) or
/// **referential** (fields copied at construction time from a matching output
/// on a previously stored entry). A referential input is a snapshot: it never
/// tracks later changes to the referenced entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputFile {
    /// Unique among the owning entry's input files. For a referential input
    /// this is also the tag of the output it resolves against.
    pub tag: String,
    pub path: String,
    pub description: String,
    pub source: Source,
    /// Resolved once at construction; a failed probe reports `false`.
    pub exists: bool,
    /// Tag of the referenced entry, when resolved referentially.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_tag: Option<String>,
    /// Version of the referenced entry (copied) or a caller-pinned version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Date copied from the referenced output, when resolved referentially.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Construction spec for an [`InputFile`].
///
/// A complete spec is one of:
/// - literal: `path` and `description` set;
/// - referential: `entry_tag` set and a ledger handle passed to
///   [`InputFile::resolve`] (optionally pinned to `version`).
#[derive(Debug, Clone, Default)]
pub struct InputFileSpec {
    pub tag: String,
    pub path: Option<String>,
    pub description: Option<String>,
    pub source: Option<Source>,
    pub entry_tag: Option<String>,
    pub version: Option<String>,
}

impl InputFile {
    /// Build an input file, resolving a referential spec against `ledger` and
    /// `source`/`exists` against `blob`.
    ///
    /// When both a reference and a literal are supplied, the reference wins.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the spec is complete in neither
    /// form, and [`CoreError::NotFound`] if a referenced entry or output does
    /// not exist.
    pub async fn resolve<B: BlobStore + ?Sized>(
        spec: InputFileSpec,
        ledger: Option<&dyn OutputLookup>,
        blob: &B,
    ) -> Result<Self, CoreError> {
        if spec.tag.is_empty() {
            return Err(CoreError::Validation(
                "input file tag is required".to_string(),
            ));
        }

        let (path, description, version, date) = match (&spec.entry_tag, ledger) {
            (Some(entry_tag), Some(ledger)) => {
                let resolved =
                    ledger.resolve_output(entry_tag, &spec.tag, spec.version.as_deref())?;
                (
                    resolved.path,
                    resolved.description,
                    Some(resolved.version),
                    Some(resolved.date),
                )
            }
            _ => match (spec.path.clone(), spec.description.clone()) {
                (Some(path), Some(description)) => {
                    (path, description, spec.version.clone(), None)
                }
                _ => {
                    return Err(CoreError::Validation(format!(
                        "input file '{}' needs either an entry_tag plus a ledger handle, \
                         or a path plus a description",
                        spec.tag
                    )));
                }
            },
        };

        let source = spec.source.unwrap_or_else(|| blob.classify(&path));
        let exists = blob.exists(&path).await;

        Ok(Self {
            tag: spec.tag,
            path,
            description,
            source,
            exists,
            entry_tag: spec.entry_tag,
            version,
            date,
        })
    }
}
