//! Dialect table
//!
//! Every recognized database product and the metadata quirks the schema
//! browser has to account for. The behaviour of each dialect is declared here
//! as data so that the detection, enumeration and resolution steps only have
//! to dispatch on it.
//!
//! Key principles:
//! - Dialect facts are explicit, not inferred at the call site
//! - Every lookup has a `Generic` answer, there is no "undefined" dialect

use serde::{Deserialize, Serialize};

/// Lower-case marker searched for in the product name to recognize SQLite
pub const SQLITE_PRODUCT_MARKER: &str = "sqlite";

/// Probe for the H2 compatibility mode
pub const H2_MODE_QUERY: &str =
    "SELECT UPPER(VALUE) FROM INFORMATION_SCHEMA.SETTINGS WHERE NAME='MODE'";

/// Mode reported by H2 when it emulates MySQL
pub const H2_MYSQL_MODE: &str = "MYSQL";

/// Conventional default schema of SQL Server
pub const MSSQL_DEFAULT_SCHEMA: &str = "dbo";

/// Internal schemas hidden on Oracle
pub const ORACLE_SYSTEM_SCHEMAS: &[&str] = &[
    "CTXSYS",
    "DIP",
    "DBSNMP",
    "DMSYS",
    "EXFSYS",
    "FLOWS_020100",
    "FLOWS_FILES",
    "MDDATA",
    "MDSYS",
    "MGMT_VIEW",
    "OLAPSYS",
    "ORDSYS",
    "ORDPLUGINS",
    "OUTLN",
    "SI_INFORMTN_SCHEMA",
    "SYS",
    "SYSMAN",
    "SYSTEM",
    "TSMSYS",
    "WMSYS",
    "XDB",
];

/// Internal schemas hidden on SQL Server
pub const MSSQL_SYSTEM_SCHEMAS: &[&str] = &[
    "sys",
    "db_accessadmin",
    "db_backupoperator",
    "db_datareader",
    "db_datawriter",
    "db_ddladmin",
    "db_denydatareader",
    "db_denydatawriter",
    "db_owner",
    "db_securityadmin",
];

/// Connection URL prefixes, in match order.
///
/// The prefixes are mutually exclusive, so at most one entry matches a URL.
pub const URL_PREFIXES: &[(&str, Dialect)] = &[
    ("jdbc:h2:", Dialect::H2),
    ("jdbc:oracle:", Dialect::Oracle),
    ("jdbc:postgresql:", Dialect::PostgreSql),
    ("jdbc:mysql:", Dialect::MySql),
    ("jdbc:derby:", Dialect::Derby),
    ("jdbc:firebirdsql:", Dialect::Firebird),
    ("jdbc:sqlserver:", Dialect::MsSqlServer),
];

/// Database products with known metadata conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// H2, the native dialect of the browser
    H2,
    /// Oracle Database
    Oracle,
    /// PostgreSQL
    PostgreSql,
    /// MySQL
    MySql,
    /// Apache Derby
    Derby,
    /// Firebird
    Firebird,
    /// Microsoft SQL Server
    MsSqlServer,
    /// SQLite
    Sqlite,
    /// Anything not recognized
    Generic,
}

/// How a dialect exposes schemas through the metadata listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaNamespace {
    /// Schemas come from the schema listing
    Listed,
    /// No schema namespace, everything lives in one unnamed schema
    Unnamed,
    /// Schemas are meaningless, a single schema without a name stands in
    Absent,
}

/// Where the default schema name comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSchemaRule {
    /// The authenticated user name, verbatim
    UserName,
    /// The authenticated user name, upper-cased
    UserNameUpper,
    /// A fixed schema name
    Fixed(&'static str),
    /// No default schema
    Absent,
    /// The `IS_DEFAULT` flag of the schema listing
    Listing,
}

impl Dialect {
    /// All dialects, `Generic` last
    pub const ALL: [Dialect; 9] = [
        Dialect::H2,
        Dialect::Oracle,
        Dialect::PostgreSql,
        Dialect::MySql,
        Dialect::Derby,
        Dialect::Firebird,
        Dialect::MsSqlServer,
        Dialect::Sqlite,
        Dialect::Generic,
    ];

    /// Match a connection URL against [`URL_PREFIXES`]
    pub fn from_url(url: &str) -> Option<Dialect> {
        URL_PREFIXES
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix))
            .map(|(_, dialect)| *dialect)
    }

    /// URL prefix that identifies this dialect, if it has one
    pub fn url_prefix(&self) -> Option<&'static str> {
        URL_PREFIXES
            .iter()
            .find(|(_, dialect)| dialect == self)
            .map(|(prefix, _)| *prefix)
    }

    /// Get display name for this dialect
    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::H2 => "H2",
            Dialect::Oracle => "Oracle",
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::MySql => "MySQL",
            Dialect::Derby => "Apache Derby",
            Dialect::Firebird => "Firebird",
            Dialect::MsSqlServer => "SQL Server",
            Dialect::Sqlite => "SQLite",
            Dialect::Generic => "Generic",
        }
    }

    pub fn schema_namespace(&self) -> SchemaNamespace {
        match self {
            Dialect::MySql | Dialect::Sqlite => SchemaNamespace::Unnamed,
            Dialect::Firebird => SchemaNamespace::Absent,
            _ => SchemaNamespace::Listed,
        }
    }

    /// Internal schemas that are never shown to the user
    pub fn system_schemas(&self) -> &'static [&'static str] {
        match self {
            Dialect::Oracle => ORACLE_SYSTEM_SCHEMAS,
            Dialect::MsSqlServer => MSSQL_SYSTEM_SCHEMAS,
            _ => &[],
        }
    }

    /// Exact, case-sensitive match against [`Dialect::system_schemas`]
    pub fn is_system_schema(&self, name: &str) -> bool {
        self.system_schemas().contains(&name)
    }

    pub fn default_schema_rule(&self) -> DefaultSchemaRule {
        match self {
            Dialect::Oracle => DefaultSchemaRule::UserName,
            Dialect::PostgreSql => DefaultSchemaRule::Fixed("public"),
            Dialect::MySql => DefaultSchemaRule::Fixed(""),
            Dialect::Derby => DefaultSchemaRule::UserNameUpper,
            Dialect::Firebird => DefaultSchemaRule::Absent,
            Dialect::H2 | Dialect::MsSqlServer | Dialect::Sqlite | Dialect::Generic => {
                DefaultSchemaRule::Listing
            }
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Quote an identifier the way H2 does.
///
/// The identifier is always wrapped in double quotes and embedded double
/// quotes are doubled.
///
/// # Example
/// ```
/// use dbcontents_core::quote_h2_identifier;
/// assert_eq!(quote_h2_identifier("Foo"), "\"Foo\"");
/// assert_eq!(quote_h2_identifier("a\"b"), "\"a\"\"b\"");
/// ```
pub fn quote_h2_identifier(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Fold an unquoted identifier to upper case
pub fn fold_identifier(ident: &str) -> String {
    ident.to_uppercase()
}
