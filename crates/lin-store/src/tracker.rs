//! The tracker: durable entry collection and its write path.

use std::cmp::Ordering;
use std::collections::hash_map::Entry as Slot;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use lin_core::{Entry, Version};
use serde_jsonlines::{json_lines, write_json_lines};

use crate::error::StoreError;

/// The versioned record store.
///
/// Rows live in memory; every mutation rewrites the backing JSONL file in
/// full. Append-only at entry granularity: the only post-insert mutation the
/// store performs itself is rewriting `most_recent` flags.
#[derive(Debug)]
pub struct Tracker {
    pub(crate) path: PathBuf,
    pub(crate) entries: Vec<Entry>,
}

impl Tracker {
    /// Open a tracker over the given backing file, loading every stored row.
    /// A missing file opens an empty tracker.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read or a row fails
    /// to deserialize (including rows carrying unknown fields).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            json_lines(&path)?.collect::<std::io::Result<Vec<Entry>>>()?
        } else {
            Vec::new()
        };
        Ok(Self { path, entries })
    }

    /// Save an entry: insert, deduplicate, relabel recency, flush.
    ///
    /// The three in-memory steps are total; only the flush can fail.
    /// Recency is recomputed for every row sharing the entry's tag, by
    /// design: `most_recent` is a group-wide derived property, not a flag
    /// the caller sets.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the flush fails.
    pub fn save(&mut self, entry: Entry) -> Result<(), StoreError> {
        tracing::debug!(tag = %entry.tag, version = %entry.version, "saving entry");
        self.entries.push(entry);
        self.deduplicate();
        self.label_recent();
        self.flush()
    }

    /// Delete all rows matching the predicate. Returns the number removed.
    ///
    /// Recency labels are recomputed afterwards so a removal can never leave
    /// a tag-group with a stale `most_recent` flag.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the flush fails.
    pub fn remove(&mut self, predicate: impl Fn(&Entry) -> bool) -> Result<usize, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|entry| !predicate(entry));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.label_recent();
            self.flush()?;
            tracing::debug!(removed, "removed entries");
        }
        Ok(removed)
    }

    /// Truncate the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the flush fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.flush()
    }

    /// Copy the backing file and open a new tracker over the copy.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if either file operation fails.
    pub fn copy_to(&self, path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        self.flush()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::copy(&self.path, &path)?;
        Self::open(path)
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stored rows, in storage order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Collapse groups of rows sharing a `tag_version` down to the row with
    /// the newest `created_at`. Resolves races where the same (tag, version)
    /// was saved more than once; on a timestamp tie the later insertion wins.
    fn deduplicate(&mut self) {
        let mut newest: HashMap<String, usize> = HashMap::with_capacity(self.entries.len());
        for (idx, entry) in self.entries.iter().enumerate() {
            match newest.entry(entry.tag_version.clone()) {
                Slot::Vacant(slot) => {
                    slot.insert(idx);
                }
                Slot::Occupied(mut slot) => {
                    if self.entries[*slot.get()].created_at <= entry.created_at {
                        slot.insert(idx);
                    }
                }
            }
        }
        if newest.len() == self.entries.len() {
            return;
        }

        let dropped = self.entries.len() - newest.len();
        let keep: HashSet<usize> = newest.into_values().collect();
        let mut idx = 0;
        self.entries.retain(|_| {
            let kept = keep.contains(&idx);
            idx += 1;
            kept
        });
        tracing::debug!(dropped, "collapsed duplicate tag_version rows");
    }

    /// Within each tag-group, mark the row with the maximal version (ties
    /// broken by `created_at`, most recent wins) and unmark every other row.
    fn label_recent(&mut self) {
        let mut winners: HashMap<String, usize> = HashMap::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            match winners.entry(entry.tag.clone()) {
                Slot::Vacant(slot) => {
                    slot.insert(idx);
                }
                Slot::Occupied(mut slot) => {
                    let current = &self.entries[*slot.get()];
                    let ordering = Version::parse(&entry.version)
                        .cmp(&Version::parse(&current.version))
                        .then_with(|| entry.created_at.cmp(&current.created_at));
                    if ordering != Ordering::Less {
                        slot.insert(idx);
                    }
                }
            }
        }

        let marked: HashSet<usize> = winners.into_values().collect();
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            entry.most_recent = marked.contains(&idx);
        }
    }

    /// Rewrite the backing file from the in-memory rows.
    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        write_json_lines(&self.path, &self.entries)?;
        Ok(())
    }
}
