//! Metadata source trait

use crate::{QueryResult, Result};
use async_trait::async_trait;

/// Column of the schema listing holding the schema name
pub const TABLE_SCHEM: &str = "TABLE_SCHEM";

/// Optional boolean column of the schema listing flagging the default schema
pub const IS_DEFAULT: &str = "IS_DEFAULT";

/// Read access to a connected database's structural metadata.
///
/// This is the boundary to the transport. Implementations wrap a driver's
/// metadata API (JDBC `DatabaseMetaData`, ODBC catalog functions, a native
/// driver's information schema queries) and hand back tabular results.
#[async_trait]
pub trait DatabaseMetadata: Send + Sync {
    /// Product name reported by the driver (e.g. "PostgreSQL", "SQLite")
    fn product_name(&self) -> &str;

    /// Connection identifier, typically the connection URL
    fn url(&self) -> Option<&str>;

    /// Authenticated user name
    fn user_name(&self) -> &str;

    /// List the schemas visible to the current user.
    ///
    /// The result carries at least a [`TABLE_SCHEM`] column and may carry an
    /// [`IS_DEFAULT`] column.
    async fn schemas(&self) -> Result<QueryResult>;

    /// Execute a query and return its rows
    async fn query(&self, sql: &str) -> Result<QueryResult>;
}
