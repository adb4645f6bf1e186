//! Version derivation seam.
//!
//! An entry built without an explicit version consults an injected
//! [`VersionProvider`]. Configuration supplies an [`ExplicitVersion`];
//! [`GitDescribeVersion`] derives one from source control the way pipeline
//! scripts historically did.

use std::process::Command;

use crate::errors::CoreError;

/// Supplies the version string for entries that do not carry one explicitly.
pub trait VersionProvider {
    /// The version to stamp on a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if no usable version can be derived.
    fn current_version(&self) -> Result<String, CoreError>;
}

/// A fixed, caller-supplied version. The default provider in tests and the
/// bridge from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitVersion(pub String);

impl VersionProvider for ExplicitVersion {
    fn current_version(&self) -> Result<String, CoreError> {
        if self.0.is_empty() {
            return Err(CoreError::Validation(
                "explicit version provider holds an empty version".to_string(),
            ));
        }
        Ok(self.0.clone())
    }
}

/// Derives the version from `git describe` in the current working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitDescribeVersion;

impl VersionProvider for GitDescribeVersion {
    fn current_version(&self) -> Result<String, CoreError> {
        let output = Command::new("git")
            .arg("describe")
            .output()
            .map_err(|e| CoreError::Validation(format!("failed to run git describe: {e}")))?;
        if !output.status.success() {
            return Err(CoreError::Validation(format!(
                "git describe exited with {}",
                output.status
            )));
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            return Err(CoreError::Validation(
                "git describe produced no version".to_string(),
            ));
        }
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::{ExplicitVersion, VersionProvider};

    #[test]
    fn explicit_version_round_trips() {
        let provider = ExplicitVersion("0.4.2".to_string());
        assert_eq!(provider.current_version().unwrap(), "0.4.2");
    }

    #[test]
    fn empty_explicit_version_is_rejected() {
        let provider = ExplicitVersion(String::new());
        assert!(provider.current_version().is_err());
    }
}
