//! Load options and dialect selection.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dialect::{Dialect, MysqlDialect, PostgresDialect, SqliteDialect};

/// How the schema builder treats tags it cannot use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Validation {
    /// Skip unparseable tag entries and unknown type names, keep the first
    /// table-name override.
    #[default]
    Lenient,
    /// Fail on the first unparseable tag, unknown type name or conflicting
    /// table-name override.
    Strict,
}

/// Options for [`crate::schema::load_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    pub validation: Validation,
}

impl LoadOptions {
    /// Creates lenient options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to strict validation.
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.validation = Validation::Strict;
        self
    }

    /// Switches to lenient validation.
    #[must_use]
    pub const fn lenient(mut self) -> Self {
        self.validation = Validation::Lenient;
        self
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.validation == Validation::Strict
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    Sqlite,
    Postgres,
    Mysql,
}

impl DialectKind {
    /// All dialects, in selector order.
    pub const ALL: [Self; 3] = [Self::Sqlite, Self::Postgres, Self::Mysql];

    /// Resolves a dialect selector. Unknown selectors fall back to SQLite.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Self::Sqlite,
            "postgres" | "postgresql" => Self::Postgres,
            "mysql" => Self::Mysql,
            other => {
                warn!(dialect = %other, "Unknown dialect, falling back to sqlite");
                Self::Sqlite
            }
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
        }
    }

    /// Returns the dialect implementation for this selector.
    #[must_use]
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Sqlite => Box::new(SqliteDialect::new()),
            Self::Postgres => Box::new(PostgresDialect::new()),
            Self::Mysql => Box::new(MysqlDialect::new()),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
