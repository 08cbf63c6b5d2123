//! SQLite dialect, also the fallback for unknown selectors.

use super::{Dialect, Token};
use crate::schema::{Field, SqlType};

/// SQLite dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn column(&self, field: &Field) -> String {
        // AUTOINCREMENT is only accepted on an INTEGER PRIMARY KEY
        if field.auto && matches!(field.sql_type, SqlType::Integer | SqlType::Long) {
            return "INTEGER".to_string();
        }
        match field.sql_type {
            SqlType::Integer => "INTEGER",
            SqlType::Boolean => "BOOLEAN",
            SqlType::Blob => "BLOB",
            SqlType::Real | SqlType::Float | SqlType::Double => "REAL",
            SqlType::Varchar
            | SqlType::MediumText
            | SqlType::LongText
            | SqlType::Long => "TEXT",
        }
        .to_string()
    }

    fn token(&self, token: Token) -> &'static str {
        match token {
            Token::AutoIncrement => "AUTOINCREMENT",
            Token::PrimaryKey => "PRIMARY KEY",
        }
    }
}
