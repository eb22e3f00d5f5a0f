//! Database contents: one introspection pass over a metadata session

use crate::catalog::{SchemaCatalog, SchemaRecord};
use crate::config::ContentsConfig;
use crate::default_schema::{mark_default, resolve_default_name};
use crate::enumerate::enumerate_schemas;
use crate::error::{ContentsError, PassStage, Result};
use crate::facts::{ConnectionFacts, detect};
use chrono::{DateTime, Utc};
use dbcontents_core::DatabaseMetadata;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

/// Result of a successful introspection pass. Immutable once published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentsSnapshot {
    pub pass_id: Uuid,
    pub read_at: DateTime<Utc>,
    pub facts: ConnectionFacts,
    pub catalog: SchemaCatalog,
    /// Object types table introspection should request for each schema
    pub table_types: Vec<String>,
}

impl ContentsSnapshot {
    pub fn default_schema(&self) -> Option<&SchemaRecord> {
        self.catalog.default_schema()
    }

    pub fn schemas(&self) -> &[SchemaRecord] {
        self.catalog.schemas()
    }

    pub fn quote_identifier(&self, identifier: Option<&str>) -> Option<String> {
        self.facts.quote_identifier(identifier)
    }
}

/// Keeps the structural metadata of one database for the schema browser.
///
/// Only one pass runs at a time; a second caller of
/// [`read_contents`](Self::read_contents) waits for the first to finish.
/// Readers only ever see complete snapshots.
pub struct DbContents {
    config: ContentsConfig,
    pass_lock: Mutex<()>,
    snapshot: RwLock<Option<Arc<ContentsSnapshot>>>,
}

impl DbContents {
    pub fn new() -> Self {
        Self::with_config(ContentsConfig::default())
    }

    pub fn with_config(config: ContentsConfig) -> Self {
        Self {
            config,
            pass_lock: Mutex::new(()),
            snapshot: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ContentsConfig {
        &self.config
    }

    /// Last published snapshot, if a pass has succeeded
    pub fn snapshot(&self) -> Option<Arc<ContentsSnapshot>> {
        self.snapshot.read().clone()
    }

    /// Run a full pass and publish its snapshot.
    ///
    /// On failure nothing is published and the previous snapshot, if any,
    /// stays in place.
    pub async fn read_contents(
        &self,
        meta: &dyn DatabaseMetadata,
    ) -> Result<Arc<ContentsSnapshot>> {
        let _pass = self.pass_lock.lock().await;
        let snapshot = Arc::new(read_snapshot(meta, &self.config).await?);
        *self.snapshot.write() = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

impl Default for DbContents {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect, enumerate and resolve against `meta` without publishing anything
pub async fn read_snapshot(
    meta: &dyn DatabaseMetadata,
    config: &ContentsConfig,
) -> Result<ContentsSnapshot> {
    let pass_id = Uuid::new_v4();
    let span = tracing::debug_span!("read_contents", %pass_id);

    async move {
        let facts = detect(meta, config.probe_compatibility_mode).await;

        let names = enumerate_schemas(&facts, meta)
            .await
            .map_err(|err| ContentsError::pass(PassStage::SchemaEnumeration, err))?;

        let mut catalog = SchemaCatalog::new(
            names
                .into_iter()
                .map(|name| {
                    let quoted = facts.quote_identifier(name.as_str());
                    SchemaRecord::new(name, quoted)
                })
                .collect(),
        );

        if !catalog.is_empty() {
            let default_name = resolve_default_name(&facts, meta).await;
            mark_default(&mut catalog, &default_name);
        }

        tracing::debug!(
            schemas = catalog.len(),
            default = ?catalog.default_schema().map(|s| s.name.to_string()),
            "read database contents"
        );

        Ok(ContentsSnapshot {
            pass_id,
            read_at: Utc::now(),
            facts,
            catalog,
            table_types: config.table_types.clone(),
        })
    }
    .instrument(span)
    .await
}
