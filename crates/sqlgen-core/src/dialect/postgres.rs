//! PostgreSQL dialect.

use super::{Dialect, Token};
use crate::schema::{Field, SqlType};

/// PostgreSQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn column(&self, field: &Field) -> String {
        // PostgreSQL uses SERIAL types instead of an AUTOINCREMENT keyword
        if field.auto {
            match field.sql_type {
                SqlType::Integer => return "SERIAL".to_string(),
                SqlType::Long => return "BIGSERIAL".to_string(),
                _ => {}
            }
        }
        match field.sql_type {
            SqlType::Integer => "INTEGER".to_string(),
            SqlType::Long => "BIGINT".to_string(),
            SqlType::Varchar if field.size > 0 => format!("VARCHAR({})", field.size),
            SqlType::Varchar | SqlType::MediumText | SqlType::LongText => "TEXT".to_string(),
            SqlType::Boolean => "BOOLEAN".to_string(),
            SqlType::Real | SqlType::Float => "REAL".to_string(),
            SqlType::Double => "DOUBLE PRECISION".to_string(),
            SqlType::Blob => "BYTEA".to_string(),
        }
    }

    fn token(&self, token: Token) -> &'static str {
        match token {
            Token::AutoIncrement => "",
            Token::PrimaryKey => "PRIMARY KEY",
        }
    }

    fn param(&self, position: usize) -> String {
        format!("${}", position + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeId;

    fn field(sql_type: SqlType) -> Field {
        Field::new(NodeId::ROOT, "f_x", sql_type)
    }

    #[test]
    fn test_column_types() {
        let d = PostgresDialect::new();
        assert_eq!(d.column(&field(SqlType::Long)), "BIGINT");
        assert_eq!(d.column(&field(SqlType::Varchar)), "TEXT");
        assert_eq!(d.column(&field(SqlType::Varchar).size(80)), "VARCHAR(80)");
        assert_eq!(d.column(&field(SqlType::Blob)), "BYTEA");
        assert_eq!(d.column(&field(SqlType::Double)), "DOUBLE PRECISION");
    }

    #[test]
    fn test_auto_increment_uses_serial() {
        let d = PostgresDialect::new();
        assert_eq!(d.column(&field(SqlType::Long).primary().auto()), "BIGSERIAL");
        assert_eq!(d.column(&field(SqlType::Integer).auto()), "SERIAL");
        assert_eq!(d.token(Token::AutoIncrement), "");
    }

    #[test]
    fn test_numbered_params() {
        let d = PostgresDialect::new();
        assert_eq!(d.param(0), "$1");
        assert_eq!(d.param(4), "$5");
    }
}
