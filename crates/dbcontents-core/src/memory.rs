//! In-memory metadata source
//!
//! Serves canned product facts and schema listings. Used by tests and by
//! embedders that already hold a metadata snapshot in memory.

use crate::{DatabaseMetadata, IS_DEFAULT, MetadataError, QueryResult, Result, TABLE_SCHEM, Value};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

/// A metadata call recorded by [`InMemoryMetadata`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataCall {
    Schemas,
    Query(String),
}

/// Canned [`DatabaseMetadata`] implementation
#[derive(Debug)]
pub struct InMemoryMetadata {
    product_name: String,
    url: Option<String>,
    user_name: String,
    schemas: QueryResult,
    schemas_error: Option<String>,
    queries: HashMap<String, QueryResult>,
    query_errors: HashMap<String, String>,
    calls: Mutex<Vec<MetadataCall>>,
}

impl InMemoryMetadata {
    /// Create a source with no schemas and no URL
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            url: None,
            user_name: String::new(),
            schemas: QueryResult::from_rows([TABLE_SCHEM], Vec::new()),
            schemas_error: None,
            queries: HashMap::new(),
            query_errors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the connection URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the authenticated user name
    pub fn with_user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    /// Serve a `TABLE_SCHEM`-only listing
    pub fn with_schemas<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = names
            .into_iter()
            .map(|name| vec![Value::String(name.into())])
            .collect();
        self.schemas = QueryResult::from_rows([TABLE_SCHEM], rows);
        self
    }

    /// Serve a `TABLE_SCHEM` + `IS_DEFAULT` listing
    pub fn with_flagged_schemas<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let rows = entries
            .into_iter()
            .map(|(name, is_default)| vec![Value::String(name.into()), Value::Bool(is_default)])
            .collect();
        self.schemas = QueryResult::from_rows([TABLE_SCHEM, IS_DEFAULT], rows);
        self
    }

    /// Serve an arbitrary schema listing
    pub fn with_schema_listing(mut self, listing: QueryResult) -> Self {
        self.schemas = listing;
        self
    }

    /// Make every schema listing fail
    pub fn with_schemas_error(mut self, message: impl Into<String>) -> Self {
        self.schemas_error = Some(message.into());
        self
    }

    /// Serve `result` for the exact query text `sql`
    pub fn with_query_result(mut self, sql: impl Into<String>, result: QueryResult) -> Self {
        self.queries.insert(sql.into(), result);
        self
    }

    /// Make the exact query text `sql` fail
    pub fn with_query_error(mut self, sql: impl Into<String>, message: impl Into<String>) -> Self {
        self.query_errors.insert(sql.into(), message.into());
        self
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<MetadataCall> {
        self.calls.lock().clone()
    }

    /// Number of schema listings requested so far
    pub fn schema_listings(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| **call == MetadataCall::Schemas)
            .count()
    }

    /// Number of ad-hoc queries executed so far
    pub fn queries_issued(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| matches!(call, MetadataCall::Query(_)))
            .count()
    }
}

#[async_trait]
impl DatabaseMetadata for InMemoryMetadata {
    fn product_name(&self) -> &str {
        &self.product_name
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn user_name(&self) -> &str {
        &self.user_name
    }

    async fn schemas(&self) -> Result<QueryResult> {
        self.calls.lock().push(MetadataCall::Schemas);
        match &self.schemas_error {
            Some(message) => Err(MetadataError::Metadata(message.clone())),
            None => Ok(self.schemas.clone()),
        }
    }

    async fn query(&self, sql: &str) -> Result<QueryResult> {
        self.calls.lock().push(MetadataCall::Query(sql.to_string()));
        if let Some(message) = self.query_errors.get(sql) {
            return Err(MetadataError::Query(message.clone()));
        }
        Ok(self.queries.get(sql).cloned().unwrap_or_default())
    }
}
