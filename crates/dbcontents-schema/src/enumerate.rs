//! Schema enumeration

use crate::catalog::SchemaName;
use crate::facts::ConnectionFacts;
use dbcontents_core::{DatabaseMetadata, QueryResult, Result, SchemaNamespace, TABLE_SCHEM, find_column};

/// List the schemas visible on the connection, in listing order.
///
/// Products without a schema namespace yield one unnamed schema and products
/// where schemas are meaningless yield one absent name; neither issues a
/// query. Otherwise the schema listing is read and internal schemas of the
/// dialect are dropped. Errors reading the listing are returned as-is.
pub async fn enumerate_schemas(
    facts: &ConnectionFacts,
    meta: &dyn DatabaseMetadata,
) -> Result<Vec<SchemaName>> {
    match facts.dialect().schema_namespace() {
        SchemaNamespace::Unnamed => Ok(vec![SchemaName::unnamed()]),
        SchemaNamespace::Absent => Ok(vec![SchemaName::absent()]),
        SchemaNamespace::Listed => {
            let listing = meta.schemas().await?;
            let names = filter_listing(facts, &listing);
            tracing::debug!(
                listed = listing.row_count(),
                kept = names.len(),
                "enumerated schemas"
            );
            Ok(names)
        }
    }
}

/// Project the schema name column of `listing`, dropping NULL names and the
/// dialect's internal schemas
pub fn filter_listing(facts: &ConnectionFacts, listing: &QueryResult) -> Vec<SchemaName> {
    let dialect = facts.dialect();
    let column = find_column(listing, TABLE_SCHEM, 0);

    listing
        .rows
        .iter()
        .filter_map(|row| row.get_str(column))
        .filter(|name| {
            let hidden = dialect.is_system_schema(name);
            if hidden {
                tracing::trace!(schema = name, %dialect, "suppressing system schema");
            }
            !hidden
        })
        .map(SchemaName::named)
        .collect()
}
