//! Version-derivation configuration.

use lin_core::ExplicitVersion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VersionConfig {
    /// Version stamped on entries that do not pin one explicitly.
    /// Empty means unset: callers must then inject their own provider.
    #[serde(default)]
    pub default: String,
}

impl VersionConfig {
    /// Whether a default version is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.default.is_empty()
    }

    /// Bridge to the provider seam, when configured.
    #[must_use]
    pub fn provider(&self) -> Option<ExplicitVersion> {
        if self.is_configured() {
            Some(ExplicitVersion(self.default.clone()))
        } else {
            None
        }
    }
}
