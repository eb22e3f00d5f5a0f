//! Dialect detection

use dbcontents_core::{
    DatabaseMetadata, Dialect, H2_MODE_QUERY, H2_MYSQL_MODE, SQLITE_PRODUCT_MARKER,
};
use serde::{Deserialize, Serialize};

/// What an introspection pass learned about the connected product.
///
/// Computed once at the start of a pass and read-only afterwards. The MySQL
/// compatibility overlay can only be set on H2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionFacts {
    dialect: Dialect,
    mysql_mode: bool,
    product_name: String,
    url: Option<String>,
}

impl ConnectionFacts {
    /// Classify a product without issuing any query.
    ///
    /// A product name containing "sqlite" (any case) wins over the URL.
    /// Otherwise the first matching URL prefix decides, and anything else is
    /// [`Dialect::Generic`].
    pub fn classify(product_name: &str, url: Option<&str>) -> Self {
        let dialect = if product_name
            .to_lowercase()
            .contains(SQLITE_PRODUCT_MARKER)
        {
            Dialect::Sqlite
        } else {
            url.and_then(Dialect::from_url).unwrap_or(Dialect::Generic)
        };
        Self {
            dialect,
            mysql_mode: false,
            product_name: product_name.to_string(),
            url: url.map(str::to_string),
        }
    }

    /// Set the MySQL compatibility overlay. Ignored for anything but H2.
    pub fn with_mysql_mode(mut self, enabled: bool) -> Self {
        self.mysql_mode = enabled && self.dialect == Dialect::H2;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_oracle(&self) -> bool {
        self.dialect == Dialect::Oracle
    }

    pub fn is_h2(&self) -> bool {
        self.dialect == Dialect::H2
    }

    /// H2 emulating MySQL
    pub fn is_h2_mode_mysql(&self) -> bool {
        self.mysql_mode
    }

    pub fn is_postgresql(&self) -> bool {
        self.dialect == Dialect::PostgreSql
    }

    pub fn is_derby(&self) -> bool {
        self.dialect == Dialect::Derby
    }

    pub fn is_sqlite(&self) -> bool {
        self.dialect == Dialect::Sqlite
    }

    pub fn is_mysql(&self) -> bool {
        self.dialect == Dialect::MySql
    }

    pub fn is_firebird(&self) -> bool {
        self.dialect == Dialect::Firebird
    }

    pub fn is_mssql_server(&self) -> bool {
        self.dialect == Dialect::MsSqlServer
    }

    pub fn is_generic(&self) -> bool {
        self.dialect == Dialect::Generic
    }
}

/// Detect the dialect of `meta`.
///
/// On H2 this issues the compatibility mode probe unless `probe` is false.
/// The probe never fails detection: an error, an empty result or a NULL mode
/// all mean the overlay is absent.
pub async fn detect(meta: &dyn DatabaseMetadata, probe: bool) -> ConnectionFacts {
    let facts = ConnectionFacts::classify(meta.product_name(), meta.url());

    let facts = if facts.is_h2() && probe {
        let mysql_mode = probe_mysql_mode(meta).await;
        facts.with_mysql_mode(mysql_mode)
    } else {
        facts
    };

    tracing::debug!(
        dialect = %facts.dialect(),
        mysql_mode = facts.is_h2_mode_mysql(),
        product = facts.product_name(),
        "detected dialect"
    );
    facts
}

async fn probe_mysql_mode(meta: &dyn DatabaseMetadata) -> bool {
    match meta.query(H2_MODE_QUERY).await {
        Ok(result) => {
            let mode = result.rows.first().and_then(|row| row.get_str(0));
            tracing::trace!(mode = ?mode, "compatibility mode probe");
            mode == Some(H2_MYSQL_MODE)
        }
        Err(err) => {
            tracing::warn!(error = %err, "compatibility mode probe failed, assuming none");
            false
        }
    }
}
