//! MySQL dialect.

use super::{column_list, index_object, Dialect, Token};
use crate::schema::{Field, Index, SqlType, Table};

/// Size used for VARCHAR columns that do not declare one.
const DEFAULT_VARCHAR_SIZE: usize = 512;

/// MySQL dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn column(&self, field: &Field) -> String {
        match field.sql_type {
            SqlType::Integer => "INTEGER".to_string(),
            SqlType::Long => "BIGINT".to_string(),
            SqlType::Float => "FLOAT".to_string(),
            SqlType::Double => "DOUBLE".to_string(),
            SqlType::Real => "REAL".to_string(),
            SqlType::Boolean => "BOOLEAN".to_string(),
            SqlType::Blob => "MEDIUMBLOB".to_string(),
            SqlType::MediumText => "MEDIUMTEXT".to_string(),
            SqlType::LongText => "LONGTEXT".to_string(),
            SqlType::Varchar => {
                let size = if field.size == 0 {
                    DEFAULT_VARCHAR_SIZE
                } else {
                    field.size
                };
                format!("VARCHAR({size})")
            }
        }
    }

    fn token(&self, token: Token) -> &'static str {
        match token {
            Token::AutoIncrement => "AUTO_INCREMENT",
            Token::PrimaryKey => "PRIMARY KEY",
        }
    }

    // CREATE INDEX has no IF NOT EXISTS guard in MySQL
    fn index(&self, table: &Table, index: &Index) -> String {
        format!(
            "CREATE {} {} ON {} ({});",
            index_object(index),
            index.name,
            table.name,
            column_list(&index.fields)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeId;

    fn field(name: &str, sql_type: SqlType) -> Field {
        Field::new(NodeId::ROOT, name, sql_type)
    }

    #[test]
    fn test_column_types() {
        let d = MysqlDialect::new();
        assert_eq!(d.column(&field("f_id", SqlType::Long)), "BIGINT");
        assert_eq!(d.column(&field("f_n", SqlType::Varchar)), "VARCHAR(512)");
        assert_eq!(d.column(&field("f_n", SqlType::Varchar).size(64)), "VARCHAR(64)");
        assert_eq!(d.column(&field("f_b", SqlType::Blob)), "MEDIUMBLOB");
        assert_eq!(d.column(&field("f_t", SqlType::MediumText)), "MEDIUMTEXT");
        assert_eq!(d.column(&field("f_d", SqlType::Double)), "DOUBLE");
    }

    #[test]
    fn test_tokens() {
        let d = MysqlDialect::new();
        assert_eq!(d.token(Token::AutoIncrement), "AUTO_INCREMENT");
        assert_eq!(d.token(Token::PrimaryKey), "PRIMARY KEY");
        assert_eq!(d.param(3), "?");
    }

    #[test]
    fn test_index_without_guard() {
        let mut index = Index::new("by_email");
        index.unique = true;
        index.fields.push(field("f_email", SqlType::Varchar));
        index.fields.push(field("f_tenant", SqlType::Integer));
        assert_eq!(
            MysqlDialect::new().index(&Table::new("users"), &index),
            "CREATE UNIQUE INDEX by_email ON users (f_email,f_tenant);"
        );
    }
}
