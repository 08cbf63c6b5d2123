//! Dialect-independent statement rendering.
//!
//! [`Renderer`] assembles CREATE/INSERT/UPDATE/DELETE/SELECT text and asks
//! its dialect only for type names, keywords and placeholders. Rendering is
//! infallible and holds no mutable state, so one renderer can serve any
//! number of tables, from any number of threads.

use crate::config::DialectKind;
use crate::dialect::{column_list, Dialect, Token};
use crate::schema::{Field, ForeignKey, Index, Table};
use crate::tag::Operator;

/// Renders SQL for a table model using one dialect.
pub struct Renderer {
    dialect: Box<dyn Dialect>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("dialect", &self.dialect.name())
            .finish()
    }
}

impl Renderer {
    /// Creates a renderer for `dialect`.
    #[must_use]
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self {
            dialect: Box::new(dialect),
        }
    }

    /// Creates a renderer for an already boxed dialect.
    #[must_use]
    pub fn from_boxed(dialect: Box<dyn Dialect>) -> Self {
        Self { dialect }
    }

    /// Creates a renderer for a dialect selector.
    #[must_use]
    pub fn for_kind(kind: DialectKind) -> Self {
        Self::from_boxed(kind.dialect())
    }

    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// `CREATE TABLE IF NOT EXISTS` with one aligned column definition per
    /// line.
    #[must_use]
    pub fn table(&self, table: &Table) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({}\n);",
            table.name,
            self.definitions(&table.fields)
        )
    }

    /// `CREATE [UNIQUE] INDEX`, as the dialect spells it.
    #[must_use]
    pub fn index(&self, table: &Table, index: &Index) -> String {
        self.dialect.index(table, index)
    }

    /// `ALTER TABLE ... ADD FOREIGN KEY`.
    #[must_use]
    pub fn foreign(&self, table: &Table, foreign_key: &ForeignKey) -> String {
        format!(
            "ALTER TABLE {} ADD FOREIGN KEY ({}) REFERENCES {} ({});",
            table.name,
            foreign_key.from_columns.join(","),
            foreign_key.to_table,
            foreign_key.to_columns.join(",")
        )
    }

    /// `INSERT` over every column except auto-increment ones.
    #[must_use]
    pub fn insert(&self, table: &Table) -> String {
        let fields: Vec<Field> = table.insertable_fields().cloned().collect();
        let params: Vec<String> = (0..fields.len()).map(|i| self.dialect.param(i)).collect();
        format!(
            "INSERT INTO {} ({}\n) VALUES ({})",
            table.name,
            column_list(&fields),
            params.join(",")
        )
    }

    /// `UPDATE` assigning every column, filtered by `keys`.
    ///
    /// WHERE placeholders continue after the SET placeholders.
    #[must_use]
    pub fn update(&self, table: &Table, keys: &[Field]) -> String {
        let head = format!(
            "UPDATE {} SET {}",
            table.name,
            self.assignments(&table.fields)
        );
        with_clause(head, &self.clause(keys, table.fields.len()))
    }

    /// `DELETE` filtered by `keys`.
    #[must_use]
    pub fn delete(&self, table: &Table, keys: &[Field]) -> String {
        with_clause(format!("DELETE FROM {}", table.name), &self.clause(keys, 0))
    }

    /// `SELECT` of every column, filtered by `keys`.
    #[must_use]
    pub fn select(&self, table: &Table, keys: &[Field]) -> String {
        let head = format!(
            "SELECT {}\nFROM {}",
            column_list(&table.fields),
            table.name
        );
        with_clause(head, &self.clause(keys, 0))
    }

    /// Paged `SELECT`: LIMIT and OFFSET placeholders follow the WHERE ones.
    #[must_use]
    pub fn select_range(&self, table: &Table, keys: &[Field]) -> String {
        format!(
            "{}\nLIMIT {} OFFSET {}",
            self.select(table, keys),
            self.dialect.param(keys.len()),
            self.dialect.param(keys.len() + 1)
        )
    }

    /// `SELECT count(1)` filtered by `keys`.
    #[must_use]
    pub fn select_count(&self, table: &Table, keys: &[Field]) -> String {
        with_clause(
            format!("SELECT count(1)\nFROM {}", table.name),
            &self.clause(keys, 0),
        )
    }

    /// Renders `WHERE a=? AND b LIKE ? ...` for `fields`.
    ///
    /// Placeholder positions start at `offset`, so a clause can follow other
    /// parameters of the same statement. Returns an empty string for no
    /// fields.
    #[must_use]
    pub fn clause(&self, fields: &[Field], offset: usize) -> String {
        let mut sql = String::new();
        for (i, field) in fields.iter().enumerate() {
            sql.push_str(if i == 0 { "WHERE " } else { " AND " });
            sql.push_str(&self.predicate(field, offset + i));
        }
        sql
    }

    fn predicate(&self, field: &Field, position: usize) -> String {
        let param = self.dialect.param(position);
        match &field.operator {
            Operator::Eq => format!("{}={param}", field.name),
            Operator::Like => format!("{} LIKE {param}", field.name),
            Operator::Call(func) if field.value_as_first_arg => {
                format!("{func}({param},{})", field.name)
            }
            Operator::Call(func) => format!("{func}({},{param})", field.name),
        }
    }

    /// `a=?,b=?` for an UPDATE SET list.
    fn assignments(&self, fields: &[Field]) -> String {
        fields
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{}={}", f.name, self.dialect.param(i)))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Column definitions for CREATE TABLE, one per line, with the type
    /// column aligned.
    fn definitions(&self, fields: &[Field]) -> String {
        let cells: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{}{}", if i == 0 { ' ' } else { ',' }, f.name))
            .collect();
        let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0) + 1;

        let mut sql = String::new();
        for (cell, field) in cells.iter().zip(fields) {
            let mut parts = vec![self.dialect.column(field)];
            if field.primary {
                parts.push(self.dialect.token(Token::PrimaryKey).to_string());
            }
            if field.auto {
                parts.push(self.dialect.token(Token::AutoIncrement).to_string());
            }
            parts.retain(|p| !p.is_empty());

            let line = format!("{cell:<width$}{}", parts.join(" "));
            sql.push('\n');
            sql.push_str(line.trim_end());
        }
        sql
    }
}

fn with_clause(head: String, clause: &str) -> String {
    if clause.is_empty() {
        head
    } else {
        format!("{head}\n{clause}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MysqlDialect, PostgresDialect, SqliteDialect};
    use crate::schema::SqlType;
    use crate::tree::NodeId;

    fn field(name: &str, sql_type: SqlType) -> Field {
        Field::new(NodeId::ROOT, name, sql_type)
    }

    fn users() -> Table {
        Table::new("users")
            .field(field("f_id", SqlType::Long).primary().auto())
            .field(field("f_name", SqlType::Varchar))
            .field(field("f_email", SqlType::Varchar).size(128))
    }

    #[test]
    fn test_clause_operators() {
        let r = Renderer::new(SqliteDialect::new());
        let fields = vec![
            field("f_age", SqlType::Integer),
            field("f_bio", SqlType::Varchar).with_operator(Operator::Like, false),
        ];
        assert_eq!(r.clause(&fields, 0), "WHERE f_age=? AND f_bio LIKE ?");
        assert_eq!(r.clause(&[], 0), "");
    }

    #[test]
    fn test_clause_function_argument_order() {
        let r = Renderer::new(SqliteDialect::new());
        let tags = field("f_tags", SqlType::Blob);
        let first = tags.with_operator(Operator::Call("CONTAINS".to_string()), true);
        let second = tags.with_operator(Operator::Call("CONTAINS".to_string()), false);
        assert_eq!(r.clause(&[first], 0), "WHERE CONTAINS(?,f_tags)");
        assert_eq!(r.clause(&[second], 0), "WHERE CONTAINS(f_tags,?)");
    }

    #[test]
    fn test_clause_offset_with_numbered_params() {
        let r = Renderer::new(PostgresDialect::new());
        let fields = vec![field("f_a", SqlType::Integer), field("f_b", SqlType::Integer)];
        assert_eq!(r.clause(&fields, 3), "WHERE f_a=$4 AND f_b=$5");
    }

    #[test]
    fn test_insert_skips_auto_columns() {
        let r = Renderer::new(SqliteDialect::new());
        let table = Table::new("ts")
            .field(field("id", SqlType::Long).auto())
            .field(field("name", SqlType::Varchar))
            .field(field("email", SqlType::Varchar));
        assert_eq!(r.insert(&table), "INSERT INTO ts (name,email\n) VALUES (?,?)");
    }

    #[test]
    fn test_update_continues_numbering() {
        let r = Renderer::new(PostgresDialect::new());
        let table = users();
        assert_eq!(
            r.update(&table, &table.primary),
            "UPDATE users SET f_id=$1,f_name=$2,f_email=$3\nWHERE f_id=$4"
        );
    }

    #[test]
    fn test_delete_and_count() {
        let r = Renderer::new(SqliteDialect::new());
        let table = users();
        assert_eq!(r.delete(&table, &table.primary), "DELETE FROM users\nWHERE f_id=?");
        assert_eq!(r.delete(&table, &[]), "DELETE FROM users");
        assert_eq!(
            r.select_count(&table, &[]),
            "SELECT count(1)\nFROM users"
        );
    }

    #[test]
    fn test_select_and_range() {
        let r = Renderer::new(PostgresDialect::new());
        let table = users();
        let keys = vec![table.fields[1].clone()];
        assert_eq!(
            r.select(&table, &keys),
            "SELECT f_id,f_name,f_email\nFROM users\nWHERE f_name=$1"
        );
        assert_eq!(
            r.select_range(&table, &keys),
            "SELECT f_id,f_name,f_email\nFROM users\nWHERE f_name=$1\nLIMIT $2 OFFSET $3"
        );
        assert_eq!(
            r.select_range(&table, &[]),
            "SELECT f_id,f_name,f_email\nFROM users\nLIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_create_table_sqlite() {
        let r = Renderer::new(SqliteDialect::new());
        assert_eq!(
            r.table(&users()),
            "CREATE TABLE IF NOT EXISTS users (\n \
             f_id    INTEGER PRIMARY KEY AUTOINCREMENT\n\
             ,f_name  TEXT\n\
             ,f_email TEXT\n\
             );"
        );
    }

    #[test]
    fn test_create_table_mysql() {
        let r = Renderer::new(MysqlDialect::new());
        assert_eq!(
            r.table(&users()),
            "CREATE TABLE IF NOT EXISTS users (\n \
             f_id    BIGINT PRIMARY KEY AUTO_INCREMENT\n\
             ,f_name  VARCHAR(512)\n\
             ,f_email VARCHAR(128)\n\
             );"
        );
    }

    #[test]
    fn test_create_table_postgres_drops_empty_token() {
        let r = Renderer::new(PostgresDialect::new());
        let sql = r.table(&users());
        assert!(sql.contains(" f_id    BIGSERIAL PRIMARY KEY\n"));
        assert!(!sql.contains("AUTO"));
    }

    #[test]
    fn test_foreign() {
        let r = Renderer::for_kind(DialectKind::Mysql);
        let mut fk = ForeignKey::new("fk_posts_to_users", "users", false);
        fk.push(field("f_author_id", SqlType::Long), "f_id");
        fk.push(field("f_author_org", SqlType::Long), "f_org");
        assert_eq!(
            r.foreign(&Table::new("posts"), &fk),
            "ALTER TABLE posts ADD FOREIGN KEY (f_author_id,f_author_org) REFERENCES users (f_id,f_org);"
        );
    }
}
