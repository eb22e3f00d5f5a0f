//! dbcontents core - metadata access abstractions
//!
//! This crate provides the pieces every other dbcontents crate builds on:
//!
//! - `DatabaseMetadata` - Trait for the metadata transport of a connection
//! - `QueryResult`, `Row`, `Value` - Tabular metadata results
//! - `Dialect` - Recognized database products and their metadata quirks
//! - `InMemoryMetadata` - Canned metadata source for tests and embedding

mod dialect;
mod error;
pub mod memory;
mod metadata;
mod types;


pub use dialect::*;
pub use error::*;
pub use memory::{InMemoryMetadata, MetadataCall};
pub use metadata::*;
pub use types::*;
