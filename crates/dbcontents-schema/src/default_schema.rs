//! Default schema resolution

use crate::catalog::{SchemaCatalog, SchemaName};
use crate::facts::ConnectionFacts;
use dbcontents_core::{
    DatabaseMetadata, DefaultSchemaRule, IS_DEFAULT, MSSQL_DEFAULT_SCHEMA, QueryResult,
    TABLE_SCHEM, find_column,
};

/// Resolve the name of the default schema.
///
/// Dialects with a fixed rule answer without a query. The rest read the
/// `IS_DEFAULT` flag of the schema listing. A listing without that column,
/// or a listing that cannot be read, yields the empty name rather than an
/// error.
pub async fn resolve_default_name(
    facts: &ConnectionFacts,
    meta: &dyn DatabaseMetadata,
) -> SchemaName {
    match facts.dialect().default_schema_rule() {
        DefaultSchemaRule::UserName => SchemaName::named(meta.user_name()),
        DefaultSchemaRule::UserNameUpper => SchemaName::named(meta.user_name().to_uppercase()),
        DefaultSchemaRule::Fixed(name) => SchemaName::named(name),
        DefaultSchemaRule::Absent => SchemaName::absent(),
        DefaultSchemaRule::Listing => match meta.schemas().await {
            Ok(listing) => flagged_default(&listing),
            Err(err) => {
                tracing::warn!(error = %err, "schema listing for default resolution failed");
                SchemaName::unnamed()
            }
        },
    }
}

/// Name of the last row of `listing` flagged `IS_DEFAULT`.
///
/// Several flagged rows are an inconsistency of the source; the last one
/// wins. No flagged row, or no `IS_DEFAULT` column, gives the empty name.
pub fn flagged_default(listing: &QueryResult) -> SchemaName {
    let Some(flag) = listing.find_column(IS_DEFAULT) else {
        tracing::debug!("schema listing has no {IS_DEFAULT} column");
        return SchemaName::unnamed();
    };
    let name_column = find_column(listing, TABLE_SCHEM, 0);

    listing
        .rows
        .iter()
        .rfind(|row| row.get(flag).is_some_and(|v| v.to_bool_lossy()))
        .map(|row| match row.get_str(name_column) {
            Some(name) => SchemaName::named(name),
            None => SchemaName::absent(),
        })
        .unwrap_or_else(SchemaName::unnamed)
}

/// Mark the default schema of `catalog`.
///
/// The first record whose name equals `default_name` is marked; an absent
/// `default_name` makes every record a candidate, so the first one is marked.
/// When nothing matches, a schema named `dbo` is preferred, then the
/// shortest name (first one on ties). An empty catalog stays unmarked.
pub fn mark_default(catalog: &mut SchemaCatalog, default_name: &SchemaName) {
    let matched = if default_name.is_absent() {
        (!catalog.is_empty()).then_some(0)
    } else {
        catalog.names().position(|name| name == default_name)
    };

    let index = matched.or_else(|| {
        let fallback = fallback_default(catalog);
        if let Some(index) = fallback {
            tracing::debug!(
                wanted = %default_name,
                chosen = %catalog.schemas()[index].name,
                "default schema not listed, using fallback"
            );
        }
        fallback
    });

    if let Some(index) = index {
        catalog.set_default(index);
    }
}

fn fallback_default(catalog: &SchemaCatalog) -> Option<usize> {
    if let Some(index) = catalog.names().position(|name| name == MSSQL_DEFAULT_SCHEMA) {
        return Some(index);
    }
    catalog
        .names()
        .enumerate()
        .min_by_key(|(_, name)| name.char_len())
        .map(|(index, _)| index)
}
