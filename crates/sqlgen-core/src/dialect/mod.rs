//! Database dialects.
//!
//! A dialect only supplies what differs between vendors: column type names,
//! keyword tokens, placeholder syntax and, where needed, index creation.
//! Everything else is assembled by [`crate::render::Renderer`], which takes
//! the active dialect at construction.

mod mysql;
mod postgres;
mod sqlite;

pub use mysql::MysqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::schema::{Field, Index, Table};

/// Vendor-specific keywords used in column definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    AutoIncrement,
    PrimaryKey,
}

/// Trait for vendor-specific SQL fragments.
pub trait Dialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the column type text for a field. Unmapped types render as
    /// an empty string.
    fn column(&self, field: &Field) -> String;

    /// Returns the keyword for a token. An empty keyword is not emitted.
    fn token(&self, token: Token) -> &'static str;

    /// Returns the placeholder for the parameter at 0-based `position`.
    fn param(&self, _position: usize) -> String {
        "?".to_string()
    }

    /// Generates SQL for CREATE INDEX.
    fn index(&self, table: &Table, index: &Index) -> String {
        format!(
            "CREATE {} IF NOT EXISTS {} ON {} ({})",
            index_object(index),
            index.name,
            table.name,
            column_list(&index.fields)
        )
    }
}

/// `INDEX` or `UNIQUE INDEX`.
pub(crate) const fn index_object(index: &Index) -> &'static str {
    if index.unique {
        "UNIQUE INDEX"
    } else {
        "INDEX"
    }
}

/// Comma-separated column names.
pub(crate) fn column_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
