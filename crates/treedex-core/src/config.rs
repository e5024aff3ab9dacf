//! Layered configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults ([`TreedexConfig::default`])
//! 2. An optional TOML file
//! 3. `TREEDEX_`-prefixed environment variables, nested keys split on `__`
//!    (`TREEDEX_INDEX__VARIANT=bst`)
//!
//! ```toml
//! [index]
//! dir = "./indexes"
//! variant = "avl"
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tree::TreeVariant;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TREEDEX_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreedexConfig {
    /// Index placement and tree choice.
    pub index: IndexConfig,
    /// Log filtering.
    pub logging: LoggingConfig,
}

/// Where index files go and which tree backs new indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Directory receiving `{field}-{variant}.txt` files.
    pub dir: PathBuf,
    /// Tree variant for indexes created without an explicit choice.
    pub variant: TreeVariant,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            variant: TreeVariant::Avl,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TreedexConfig {
    /// Provider chain: defaults, then `path` (if any), then environment.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a source is malformed or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the log level or index directory is empty.
    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(Error::Config("logging.level must not be empty".to_string()));
        }
        if self.index.dir.as_os_str().is_empty() {
            return Err(Error::Config("index.dir must not be empty".to_string()));
        }
        Ok(())
    }
}
