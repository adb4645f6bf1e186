//! Query operations over the stored rows.

use std::collections::HashSet;
use std::hash::Hash;

use lin_core::{CoreError, Entry, OutputFile, OutputLookup, RecordSet, ResolvedOutput};

use crate::error::StoreError;
use crate::tracker::Tracker;

impl Tracker {
    /// Resolve an entry by tag.
    ///
    /// A pinned `version` looks up the unique `tag_version` row; `None`
    /// returns the row currently labeled most recent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EntryNotFound`] if no row matches.
    pub fn get_entry(&self, tag: &str, version: Option<&str>) -> Result<&Entry, StoreError> {
        let rows = RecordSet::new(&self.entries);
        let found = match version {
            Some(version) => {
                let tag_version = format!("{tag}_{version}");
                rows.filter_first(|entry| entry.tag_version == tag_version)
            }
            None => rows.filter_first(|entry| entry.tag == tag && entry.most_recent),
        };
        found.ok_or_else(|| StoreError::EntryNotFound {
            tag: tag.to_string(),
            version: version.map(str::to_string),
        })
    }

    /// Resolve an output file on an entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EntryNotFound`] if the entry is missing, or
    /// [`StoreError::FileNotFound`] if the entry holds no output with the
    /// given tag.
    pub fn get_file(
        &self,
        tag: &str,
        file_tag: &str,
        version: Option<&str>,
    ) -> Result<&OutputFile, StoreError> {
        let entry = self.get_entry(tag, version)?;
        RecordSet::new(&entry.output_files)
            .filter_first(|file| file.tag == file_tag)
            .ok_or_else(|| StoreError::FileNotFound {
                entry_tag: tag.to_string(),
                file_tag: file_tag.to_string(),
            })
    }

    /// All output files of an entry, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EntryNotFound`] if the entry is missing.
    pub fn get_output_files(
        &self,
        tag: &str,
        version: Option<&str>,
    ) -> Result<&[OutputFile], StoreError> {
        Ok(&self.get_entry(tag, version)?.output_files)
    }

    /// Path of an output file, answering the common "where is the current
    /// output of step X" question.
    ///
    /// # Errors
    ///
    /// Propagates [`Tracker::get_file`] errors.
    pub fn get_file_path(
        &self,
        tag: &str,
        file_tag: &str,
        version: Option<&str>,
    ) -> Result<&str, StoreError> {
        Ok(&self.get_file(tag, file_tag, version)?.path)
    }

    /// All rows matching a predicate, storage order preserved.
    pub fn filter(&self, predicate: impl Fn(&Entry) -> bool) -> Vec<&Entry> {
        RecordSet::new(&self.entries).filter(predicate)
    }

    /// Distinct projected values across all rows.
    pub fn uniq<K: Eq + Hash>(&self, selector: impl Fn(&Entry) -> K) -> HashSet<K> {
        RecordSet::new(&self.entries).values(selector)
    }

    /// Distinct entry tags.
    #[must_use]
    pub fn tags(&self) -> HashSet<String> {
        self.uniq(|entry| entry.tag.clone())
    }
}

impl OutputLookup for Tracker {
    fn resolve_output(
        &self,
        entry_tag: &str,
        file_tag: &str,
        version: Option<&str>,
    ) -> Result<ResolvedOutput, CoreError> {
        let entry = self
            .get_entry(entry_tag, version)
            .map_err(|_| CoreError::NotFound {
                entity_type: "entry".to_string(),
                id: entry_tag.to_string(),
            })?;
        let file = self
            .get_file(entry_tag, file_tag, version)
            .map_err(|_| CoreError::NotFound {
                entity_type: "output file".to_string(),
                id: format!("{entry_tag}/{file_tag}"),
            })?;
        Ok(ResolvedOutput {
            version: entry.version.clone(),
            path: file.path.clone(),
            description: file.description.clone(),
            date: file.date,
        })
    }
}
