//! Errors of an introspection pass

use dbcontents_core::MetadataError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Step of an introspection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassStage {
    SchemaEnumeration,
}

impl std::fmt::Display for PassStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PassStage::SchemaEnumeration => "schema enumeration",
        })
    }
}

#[derive(Error, Debug)]
pub enum ContentsError {
    /// A metadata read failed and aborted the pass
    #[error("Failed to read database contents during {stage}: {source}")]
    Pass {
        stage: PassStage,
        #[source]
        source: MetadataError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentsError {
    pub(crate) fn pass(stage: PassStage, source: MetadataError) -> Self {
        ContentsError::Pass { stage, source }
    }

    /// Stage that failed, for pass errors
    pub fn stage(&self) -> Option<PassStage> {
        match self {
            ContentsError::Pass { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentsError>;
