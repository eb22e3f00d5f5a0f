//! Tests for DbContents

use super::*;
use dbcontents_core::{H2_MODE_QUERY, MetadataCall, QueryResult};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn default_name(snapshot: &ContentsSnapshot) -> Option<String> {
    snapshot.default_schema().map(|s| s.name.to_string())
}

#[tokio::test]
async fn test_h2_pass() {
    let meta = InMemoryMetadata::new("H2")
        .with_url("jdbc:h2:mem:test")
        .with_flagged_schemas([("INFORMATION_SCHEMA", false), ("PUBLIC", true)]);
    let contents = DbContents::new();

    let snapshot = contents.read_contents(&meta).await.expect("pass succeeds");
    assert!(snapshot.facts.is_h2());
    assert_eq!(snapshot.schemas().len(), 2);
    assert_eq!(default_name(&snapshot), Some("PUBLIC".to_string()));
    assert_eq!(
        snapshot.schemas()[1].quoted_name.as_deref(),
        Some("\"PUBLIC\"")
    );
    assert_eq!(
        meta.calls(),
        vec![
            MetadataCall::Query(H2_MODE_QUERY.to_string()),
            MetadataCall::Schemas,
            MetadataCall::Schemas,
        ]
    );
}

#[tokio::test]
async fn test_h2_mysql_mode_pass_folds_names() {
    let meta = InMemoryMetadata::new("H2")
        .with_url("jdbc:h2:mem:test")
        .with_query_result(
            H2_MODE_QUERY,
            QueryResult::from_rows(["MODE"], vec![vec!["MYSQL".into()]]),
        )
        .with_schemas(["public"]);

    let snapshot = DbContents::new().read_contents(&meta).await.expect("pass succeeds");
    assert!(snapshot.facts.is_h2_mode_mysql());
    assert_eq!(snapshot.schemas()[0].quoted_name.as_deref(), Some("PUBLIC"));
    assert_eq!(snapshot.quote_identifier(Some("orders")), Some("ORDERS".to_string()));
}

#[tokio::test]
async fn test_postgresql_pass() {
    let meta = InMemoryMetadata::new("PostgreSQL")
        .with_url("jdbc:postgresql://db/app")
        .with_schemas(["information_schema", "pg_catalog", "public", "sales"]);

    let snapshot = DbContents::new().read_contents(&meta).await.expect("pass succeeds");
    assert_eq!(default_name(&snapshot), Some("public".to_string()));
    assert_eq!(snapshot.catalog.default_index(), Some(2));
    assert_eq!(meta.schema_listings(), 1);
}

#[tokio::test]
async fn test_oracle_pass_falls_back_when_user_schema_hidden() {
    let meta = InMemoryMetadata::new("Oracle")
        .with_url("jdbc:oracle:thin:@db:1521:XE")
        .with_user("SYSTEM")
        .with_schemas(["SYSTEM", "SYS", "HR", "APPDATA"]);

    let snapshot = DbContents::new().read_contents(&meta).await.expect("pass succeeds");
    let names: Vec<_> = snapshot.catalog.names().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["HR", "APPDATA"]);
    assert_eq!(default_name(&snapshot), Some("HR".to_string()));
}

#[tokio::test]
async fn test_mssql_pass_prefers_dbo() {
    let meta = InMemoryMetadata::new("Microsoft SQL Server")
        .with_url("jdbc:sqlserver://db;databaseName=app")
        .with_schemas(["db_owner", "a", "dbo", "sys", "guest"]);

    let snapshot = DbContents::new().read_contents(&meta).await.expect("pass succeeds");
    let names: Vec<_> = snapshot.catalog.names().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["a", "dbo", "guest"]);
    assert_eq!(default_name(&snapshot), Some("dbo".to_string()));
    assert_eq!(snapshot.schemas()[1].quoted_name.as_deref(), Some("DBO"));
}

#[tokio::test]
async fn test_mysql_pass() {
    let meta = InMemoryMetadata::new("MySQL")
        .with_url("jdbc:mysql://db/app")
        .with_schemas_error("must not be called");

    let snapshot = DbContents::new().read_contents(&meta).await.expect("pass succeeds");
    assert_eq!(snapshot.schemas().len(), 1);
    assert!(snapshot.schemas()[0].is_default);
    assert_eq!(snapshot.schemas()[0].name, SchemaName::unnamed());
    assert!(meta.calls().is_empty());
}

#[tokio::test]
async fn test_firebird_pass() {
    let meta = InMemoryMetadata::new("Firebird").with_url("jdbc:firebirdsql://db/app");

    let snapshot = DbContents::new().read_contents(&meta).await.expect("pass succeeds");
    let schema = snapshot.default_schema().expect("single schema is default");
    assert!(schema.name.is_absent());
    assert_eq!(schema.quoted_name, None);
}

#[tokio::test]
async fn test_empty_catalog_skips_default_resolution() {
    let meta = InMemoryMetadata::new("Unknown");
    let snapshot = DbContents::new().read_contents(&meta).await.expect("pass succeeds");

    assert!(snapshot.catalog.is_empty());
    assert!(snapshot.default_schema().is_none());
    assert_eq!(meta.schema_listings(), 1);
}

#[tokio::test]
async fn test_failed_pass_publishes_nothing() {
    let contents = DbContents::new();
    let meta = InMemoryMetadata::new("PostgreSQL")
        .with_url("jdbc:postgresql://db/app")
        .with_schemas_error("connection reset");

    let err = contents
        .read_contents(&meta)
        .await
        .expect_err("listing failure aborts the pass");
    assert_eq!(err.stage(), Some(PassStage::SchemaEnumeration));
    assert!(err.to_string().contains("schema enumeration"));
    assert!(contents.snapshot().is_none());
}

#[tokio::test]
async fn test_failed_pass_keeps_previous_snapshot() {
    let contents = DbContents::new();
    let good = InMemoryMetadata::new("PostgreSQL")
        .with_url("jdbc:postgresql://db/app")
        .with_schemas(["public"]);
    let first = contents.read_contents(&good).await.expect("pass succeeds");

    let bad = InMemoryMetadata::new("PostgreSQL")
        .with_url("jdbc:postgresql://db/app")
        .with_schemas_error("connection reset");
    assert!(contents.read_contents(&bad).await.is_err());

    let current = contents.snapshot().expect("first snapshot kept");
    assert!(Arc::ptr_eq(&first, &current));
}

#[tokio::test]
async fn test_repeated_passes_are_equal() {
    let contents = DbContents::new();
    let meta = InMemoryMetadata::new("Unknown").with_flagged_schemas([
        ("b", false),
        ("a", true),
        ("c", false),
    ]);

    let first = contents.read_contents(&meta).await.expect("first pass");
    let second = contents.read_contents(&meta).await.expect("second pass");

    assert_eq!(first.facts, second.facts);
    assert_eq!(first.catalog, second.catalog);
    assert_ne!(first.pass_id, second.pass_id);
    let published = contents.snapshot().expect("published");
    assert!(Arc::ptr_eq(&published, &second));
}

#[tokio::test]
async fn test_config_is_applied() {
    let config = ContentsConfig {
        probe_compatibility_mode: false,
        table_types: vec!["TABLE".to_string()],
    };
    let meta = InMemoryMetadata::new("H2")
        .with_url("jdbc:h2:mem:test")
        .with_schemas(["PUBLIC"]);

    let contents = DbContents::with_config(config);
    let snapshot = contents.read_contents(&meta).await.expect("pass succeeds");
    assert_eq!(snapshot.table_types, vec!["TABLE"]);
    assert_eq!(meta.queries_issued(), 0);
    assert!(!contents.config().probe_compatibility_mode);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_passes_are_serialized() {
    let contents = Arc::new(DbContents::new());
    let meta = Arc::new(
        InMemoryMetadata::new("H2")
            .with_url("jdbc:h2:mem:test")
            .with_flagged_schemas([("PUBLIC", true), ("AUDIT", false)]),
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let contents = Arc::clone(&contents);
            let meta = Arc::clone(&meta);
            tokio::spawn(async move { contents.read_contents(&*meta).await })
        })
        .collect();

    for handle in handles {
        let snapshot = handle.await.expect("task joins").expect("pass succeeds");
        assert_eq!(default_name(&snapshot), Some("PUBLIC".to_string()));
    }

    // each pass issues probe, listing, listing without interleaving
    let calls = meta.calls();
    assert_eq!(calls.len(), 24);
    for pass in calls.chunks(3) {
        assert_eq!(
            pass,
            [
                MetadataCall::Query(H2_MODE_QUERY.to_string()),
                MetadataCall::Schemas,
                MetadataCall::Schemas,
            ]
        );
    }
}

#[test]
fn test_snapshot_serializes() {
    let snapshot = ContentsSnapshot {
        pass_id: uuid::Uuid::nil(),
        read_at: chrono::Utc::now(),
        facts: ConnectionFacts::classify("Firebird", Some("jdbc:firebirdsql://db/app")),
        catalog: SchemaCatalog::new(vec![SchemaRecord::new(SchemaName::absent(), None)]),
        table_types: vec!["TABLE".to_string()],
    };
    let json = serde_json::to_value(&snapshot).expect("serialize");
    assert_eq!(json["facts"]["dialect"], "firebird");
    assert_eq!(json["catalog"]["schemas"][0]["name"], serde_json::Value::Null);
    assert_eq!(json["table_types"][0], "TABLE");
}
