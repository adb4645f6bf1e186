use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{InputFile, OutputFile};
use crate::errors::CoreError;
use crate::provider::VersionProvider;
use crate::recordset::RecordSet;

/// One durable provenance record: a processing step at a specific version,
/// with the files it consumed and produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    /// Stable identifier shared across all versions of this step.
    pub tag: String,
    pub description: String,
    pub category: String,
    pub module: String,
    pub version: String,
    /// Composite key `{tag}_{version}`. Computed at construction, immutable.
    pub tag_version: String,
    /// Insertion timestamp, used by the store for tie-breaking.
    pub created_at: DateTime<Utc>,
    pub date: NaiveDate,
    pub input_files: Vec<InputFile>,
    pub output_files: Vec<OutputFile>,
    /// Computed and rewritten by the store, never by the caller.
    #[serde(default)]
    pub most_recent: bool,
}

/// Caller-supplied fields for a new [`Entry`].
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    pub tag: String,
    pub description: String,
    pub category: String,
    pub module: String,
    /// `None` consults the injected version provider.
    pub version: Option<String>,
}

impl Entry {
    /// Build a new entry, deriving the version from `versions` when the draft
    /// does not pin one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the tag is empty or the provider
    /// cannot supply a version.
    pub fn create(draft: EntryDraft, versions: &dyn VersionProvider) -> Result<Self, CoreError> {
        if draft.tag.is_empty() {
            return Err(CoreError::Validation("entry tag is required".to_string()));
        }

        let version = match draft.version {
            Some(version) => version,
            None => versions.current_version()?,
        };
        let tag_version = format!("{}_{}", draft.tag, version);
        let created_at = Utc::now();

        Ok(Self {
            tag: draft.tag,
            description: draft.description,
            category: draft.category,
            module: draft.module,
            version,
            tag_version,
            created_at,
            date: created_at.date_naive(),
            input_files: Vec::new(),
            output_files: Vec::new(),
            most_recent: false,
        })
    }

    /// Attach an input file. Returns its path, handy for feeding the step
    /// that reads it.
    pub fn add_input(&mut self, file: InputFile) -> String {
        let path = file.path.clone();
        self.input_files.push(file);
        path
    }

    /// Attach an output file. Returns its path.
    ///
    /// Anonymous artifacts stay unique within the entry: the Nth additional
    /// auto-named file becomes `Artifact_N` with its description suffixed
    /// `" (N)"`.
    pub fn add_output(&mut self, mut file: OutputFile) -> String {
        if file.auto_named {
            let mut n = self
                .output_files
                .iter()
                .filter(|existing| existing.auto_named)
                .count();
            loop {
                let candidate = if n == 0 {
                    "Artifact".to_string()
                } else {
                    format!("Artifact_{n}")
                };
                if !self.output_files.iter().any(|f| f.tag == candidate) {
                    if n > 0 {
                        file.tag = candidate;
                        file.description.push_str(&format!(" ({n})"));
                    }
                    break;
                }
                n += 1;
            }
        }
        let path = file.path.clone();
        self.output_files.push(file);
        path
    }

    /// First output file with the given tag.
    #[must_use]
    pub fn output(&self, file_tag: &str) -> Option<&OutputFile> {
        RecordSet::new(&self.output_files).filter_first(|file| file.tag == file_tag)
    }

    /// First input file with the given tag.
    #[must_use]
    pub fn input(&self, file_tag: &str) -> Option<&InputFile> {
        RecordSet::new(&self.input_files).filter_first(|file| file.tag == file_tag)
    }
}
