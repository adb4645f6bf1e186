//! Output-resolution seam.
//!
//! A referential `InputFile` copies its fields from an output of a previously
//! stored entry. The descriptor side only needs this narrow lookup, so the
//! store implements [`OutputLookup`] and descriptors stay independent of the
//! store crate. Resolution is a point-in-time snapshot: later mutation of the
//! referenced entry never propagates into the constructed descriptor.

use chrono::NaiveDate;

use crate::errors::CoreError;

/// Fields copied from a referenced entry's output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    /// Version of the entry the output belongs to.
    pub version: String,
    pub path: String,
    pub description: String,
    /// Calendar date the output was recorded.
    pub date: NaiveDate,
}

/// Resolve an output file on a stored entry.
pub trait OutputLookup {
    /// Look up the output tagged `file_tag` on the entry tagged `entry_tag`.
    ///
    /// `version` pins a specific entry version; `None` resolves against the
    /// most recent one.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no such entry or output exists.
    fn resolve_output(
        &self,
        entry_tag: &str,
        file_tag: &str,
        version: Option<&str>,
    ) -> Result<ResolvedOutput, CoreError>;
}
