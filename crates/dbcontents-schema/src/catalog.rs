//! Normalized schema model

use serde::{Deserialize, Serialize};

/// Name of a schema.
///
/// The empty string names the single synthetic schema of products without a
/// schema namespace. An absent name stands in where schemas are meaningless
/// altogether. Neither means "not found".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaName(Option<String>);

impl SchemaName {
    pub fn named(name: impl Into<String>) -> Self {
        SchemaName(Some(name.into()))
    }

    /// The single unnamed schema (`""`)
    pub fn unnamed() -> Self {
        SchemaName(Some(String::new()))
    }

    /// The absent-name sentinel
    pub fn absent() -> Self {
        SchemaName(None)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Length in characters, `0` for the absent name
    pub fn char_len(&self) -> usize {
        self.0.as_deref().map_or(0, |s| s.chars().count())
    }

    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl From<&str> for SchemaName {
    fn from(name: &str) -> Self {
        SchemaName::named(name)
    }
}

impl From<String> for SchemaName {
    fn from(name: String) -> Self {
        SchemaName::named(name)
    }
}

impl From<Option<String>> for SchemaName {
    fn from(name: Option<String>) -> Self {
        SchemaName(name)
    }
}

impl PartialEq<str> for SchemaName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for SchemaName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl std::fmt::Display for SchemaName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(name) => f.write_str(name),
            None => f.write_str("<absent>"),
        }
    }
}

/// One schema of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRecord {
    pub name: SchemaName,
    /// Name as it must be written in queries against this connection
    pub quoted_name: Option<String>,
    pub is_default: bool,
}

impl SchemaRecord {
    pub fn new(name: SchemaName, quoted_name: Option<String>) -> Self {
        Self {
            name,
            quoted_name,
            is_default: false,
        }
    }
}

/// Ordered schemas of one introspection pass.
///
/// At most one record is marked as the default schema. An empty catalog is
/// valid and has no default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCatalog {
    schemas: Vec<SchemaRecord>,
}

impl SchemaCatalog {
    /// Build an unmarked catalog, in the given order
    pub fn new(schemas: Vec<SchemaRecord>) -> Self {
        Self { schemas }
    }

    pub fn schemas(&self) -> &[SchemaRecord] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &SchemaName> {
        self.schemas.iter().map(|s| &s.name)
    }

    /// First schema with exactly this name
    pub fn find(&self, name: &str) -> Option<&SchemaRecord> {
        self.schemas.iter().find(|s| s.name == name)
    }

    pub fn default_schema(&self) -> Option<&SchemaRecord> {
        self.schemas.iter().find(|s| s.is_default)
    }

    pub fn default_index(&self) -> Option<usize> {
        self.schemas.iter().position(|s| s.is_default)
    }

    /// Mark the record at `index` as the default, clearing any other mark.
    /// Out-of-range indexes leave the catalog untouched.
    pub(crate) fn set_default(&mut self, index: usize) {
        if index >= self.schemas.len() {
            return;
        }
        for (i, schema) in self.schemas.iter_mut().enumerate() {
            schema.is_default = i == index;
        }
    }
}
