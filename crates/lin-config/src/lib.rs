//! # lin-config
//!
//! Layered configuration loading for the lineage ledger using figment.
//!
//! The original pipeline tooling read its version and store location from
//! ambient process globals; here both arrive through an explicit config
//! object injected at construction.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LINEAGE_*` prefix, `__` as separator)
//! 2. Project-level `.lineage/config.toml`
//! 3. User-level `~/.config/lineage/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LINEAGE_STORE__PATH` -> `store.path`,
//! `LINEAGE_VERSION__DEFAULT` -> `version.default`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use lin_config::LineageConfig;
//!
//! let config = LineageConfig::load().expect("config");
//! let store_path = config.store.path();
//! if let Some(provider) = config.version.provider() {
//!     // hand the provider to Entry::create
//! }
//! ```

mod blob;
mod error;
mod store;
mod version;

pub use blob::BlobConfig;
pub use error::ConfigError;
pub use store::StoreConfig;
pub use version::VersionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LineageConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub version: VersionConfig,
    #[serde(default)]
    pub blob: BlobConfig,
}

impl LineageConfig {
    /// Load configuration from all sources (TOML files + environment).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".lineage/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LINEAGE_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lineage").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or the current dir
    /// looking for a `.env` file. Silently does nothing if none is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
