//! Introspection configuration

use crate::error::{ContentsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Object types requested from downstream table introspection
pub const DEFAULT_TABLE_TYPES: &[&str] = &[
    "TABLE",
    "SYSTEM TABLE",
    "VIEW",
    "SYSTEM VIEW",
    "TABLE LINK",
    "SYNONYM",
    "EXTERNAL",
];

/// Configuration for [`DbContents`](crate::DbContents)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentsConfig {
    /// Run the H2 compatibility mode probe. When disabled the MySQL overlay
    /// is never set.
    pub probe_compatibility_mode: bool,

    /// Object types handed to table introspection for every schema
    pub table_types: Vec<String>,
}

impl Default for ContentsConfig {
    fn default() -> Self {
        Self {
            probe_compatibility_mode: true,
            table_types: DEFAULT_TABLE_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ContentsConfig {
    /// Parse a TOML document. Missing keys take their default.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ContentsConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading contents config");
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<()> {
        if let Some(blank) = self.table_types.iter().find(|t| t.trim().is_empty()) {
            return Err(ContentsError::Config(format!(
                "table_types contains a blank entry: {blank:?}"
            )));
        }
        Ok(())
    }
}
