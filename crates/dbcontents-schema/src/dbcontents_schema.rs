//! dbcontents schema - dialect detection and schema normalization
//!
//! Reads the structural metadata a database exposes through its metadata
//! interface and turns it into a dialect-agnostic model for a schema browser:
//! - Dialect detection from the product name and connection URL
//! - Schema enumeration with per-dialect suppression of internal schemas
//! - Default schema resolution with a structural fallback
//! - Identifier quoting per dialect

mod catalog;
mod config;
mod contents;
mod default_schema;
mod enumerate;
mod error;
mod facts;
mod quote;

#[cfg(test)]
mod catalog_tests;
#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod contents_tests;
#[cfg(test)]
mod default_schema_tests;
#[cfg(test)]
mod enumerate_tests;
#[cfg(test)]
mod facts_tests;
#[cfg(test)]
mod quote_tests;

pub use catalog::{SchemaCatalog, SchemaName, SchemaRecord};
pub use config::{ContentsConfig, DEFAULT_TABLE_TYPES};
pub use contents::{ContentsSnapshot, DbContents, read_snapshot};
pub use default_schema::{flagged_default, mark_default, resolve_default_name};
pub use enumerate::{enumerate_schemas, filter_listing};
pub use error::{ContentsError, PassStage, Result};
pub use facts::{ConnectionFacts, detect};

pub use dbcontents_core::{DatabaseMetadata, Dialect, InMemoryMetadata};
