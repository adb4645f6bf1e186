//! Tabular projection: one row per file.
//!
//! Reporting consumers want the nested per-entry file lists flattened into a
//! single table. The ordering is a contract: newest-saved entries first, then
//! stable by declaration order within an entry.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use lin_core::Source;
use serde::{Deserialize, Serialize};

use crate::tracker::Tracker;

/// Whether a projected file was an input or an output of its entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file-level row of the flattened view, traceable back to its parent
/// entry through `entry_tag`/`version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRow {
    pub entry_tag: String,
    pub version: String,
    pub category: String,
    pub module: String,
    /// `created_at` of the owning entry.
    pub saved_at: DateTime<Utc>,
    pub direction: Direction,
    /// Position within the owning file list. Preserves intra-entry,
    /// intra-direction declaration order.
    pub index: usize,
    pub file_tag: String,
    pub path: String,
    pub description: String,
    pub source: Source,
    pub exists: bool,
    pub date: Option<NaiveDate>,
}

impl Tracker {
    /// Flatten every entry's file lists into one row per file.
    ///
    /// Entries with an empty list in a direction contribute zero rows for
    /// that direction. Result order: `saved_at` descending, then `category`,
    /// `module`, `entry_tag`, `direction` (inputs before outputs), `index`
    /// ascending.
    #[must_use]
    pub fn explode(&self) -> Vec<FileRow> {
        let mut rows = Vec::new();
        for entry in &self.entries {
            for (index, file) in entry.input_files.iter().enumerate() {
                rows.push(FileRow {
                    entry_tag: entry.tag.clone(),
                    version: entry.version.clone(),
                    category: entry.category.clone(),
                    module: entry.module.clone(),
                    saved_at: entry.created_at,
                    direction: Direction::Input,
                    index,
                    file_tag: file.tag.clone(),
                    path: file.path.clone(),
                    description: file.description.clone(),
                    source: file.source,
                    exists: file.exists,
                    date: file.date,
                });
            }
            for (index, file) in entry.output_files.iter().enumerate() {
                rows.push(FileRow {
                    entry_tag: entry.tag.clone(),
                    version: entry.version.clone(),
                    category: entry.category.clone(),
                    module: entry.module.clone(),
                    saved_at: entry.created_at,
                    direction: Direction::Output,
                    index,
                    file_tag: file.tag.clone(),
                    path: file.path.clone(),
                    description: file.description.clone(),
                    source: file.source,
                    exists: file.exists,
                    date: Some(file.date),
                });
            }
        }

        rows.sort_by(|a, b| {
            b.saved_at
                .cmp(&a.saved_at)
                .then_with(|| a.category.cmp(&b.category))
                .then_with(|| a.module.cmp(&b.module))
                .then_with(|| a.entry_tag.cmp(&b.entry_tag))
                .then_with(|| a.direction.cmp(&b.direction))
                .then_with(|| a.index.cmp(&b.index))
        });
        rows
    }
}
