//! End-to-end rendering of a loaded table in every dialect.

mod common;

use common::{table, user};
use serde_json::json;
use sqlgen_core::dialect::{Dialect, MysqlDialect, PostgresDialect, SqliteDialect};
use sqlgen_core::{DialectKind, Renderer};

#[test]
fn test_sqlite_create_table() {
    let table = table(json!({ "name": "User", "type": "User", "children": [
        { "name": "ID", "type": "int64" },
        { "name": "Name", "type": "string" },
        { "name": "Score", "type": "float64" }
    ]}));
    assert_eq!(
        Renderer::new(SqliteDialect::new()).table(&table),
        "CREATE TABLE IF NOT EXISTS users (\n \
         f_id    INTEGER PRIMARY KEY AUTOINCREMENT\n\
         ,f_name  TEXT\n\
         ,f_score REAL\n\
         );"
    );
}

#[test]
fn test_mysql_create_table() {
    let table = table(json!({ "name": "User", "type": "User", "children": [
        { "name": "ID", "type": "int64" },
        { "name": "Name", "type": "string", "tags": { "size": 100 } },
        { "name": "Bio", "type": "string", "tags": { "type": "mediumtext" } }
    ]}));
    assert_eq!(
        Renderer::new(MysqlDialect::new()).table(&table),
        "CREATE TABLE IF NOT EXISTS users (\n \
         f_id   BIGINT PRIMARY KEY AUTO_INCREMENT\n\
         ,f_name VARCHAR(100)\n\
         ,f_bio  MEDIUMTEXT\n\
         );"
    );
}

#[test]
fn test_postgres_create_table() {
    let table = table(json!({ "name": "User", "type": "User", "children": [
        { "name": "ID", "type": "int64" },
        { "name": "Avatar", "type": "[]byte" }
    ]}));
    assert_eq!(
        Renderer::new(PostgresDialect::new()).table(&table),
        "CREATE TABLE IF NOT EXISTS users (\n \
         f_id     BIGSERIAL PRIMARY KEY\n\
         ,f_avatar BYTEA\n\
         );"
    );
}

#[test]
fn test_long_column_mapping_per_dialect() {
    let table = table(json!({ "name": "Counter", "type": "Counter", "children": [
        { "name": "Hits", "type": "int64" }
    ]}));
    let field = &table.fields[0];
    assert_eq!(SqliteDialect::new().column(field), "TEXT");
    assert_eq!(MysqlDialect::new().column(field), "BIGINT");
    assert_eq!(PostgresDialect::new().column(field), "BIGINT");
}

#[test]
fn test_select_by_composite_index() {
    let table = table(user());
    let index = table.get_index("idx_name_org").unwrap();
    let sql = Renderer::new(SqliteDialect::new()).select(&table, &index.fields);
    assert_eq!(
        sql,
        "SELECT f_id,f_name,f_email,f_org_id,f_address_city,f_address_zip,f_avatar\n\
         FROM users\n\
         WHERE f_name=? AND f_org_id=?"
    );
}

#[test]
fn test_postgres_placeholders_number_across_clauses() {
    let table = table(user());
    let email = table.get_index("uniq_email").unwrap();
    let renderer = Renderer::for_kind(DialectKind::Postgres);

    assert_eq!(
        renderer.update(&table, &email.fields),
        "UPDATE users SET f_id=$1,f_name=$2,f_email=$3,f_org_id=$4,f_address_city=$5,\
         f_address_zip=$6,f_avatar=$7\nWHERE f_email=$8"
    );
    assert!(renderer
        .select_range(&table, &email.fields)
        .ends_with("WHERE f_email=$1\nLIMIT $2 OFFSET $3"));
}

#[test]
fn test_insert_skips_auto_columns() {
    let table = table(user());
    let sql = Renderer::new(MysqlDialect::new()).insert(&table);
    assert_eq!(
        sql,
        "INSERT INTO users (f_name,f_email,f_org_id,f_address_city,f_address_zip,f_avatar\n\
         ) VALUES (?,?,?,?,?,?)"
    );
}

#[test]
fn test_like_and_function_operators_in_where() {
    let table = table(json!({ "name": "Doc", "type": "Doc", "children": [
        { "name": "Title", "type": "string", "tags": { "index": "by_text@like" } },
        { "name": "Tags", "type": "string", "tags": { "index": "by_text@CONTAINS@true" } }
    ]}));
    let index = table.get_index("by_text").unwrap();
    assert_eq!(
        Renderer::new(SqliteDialect::new()).clause(&index.fields, 0),
        "WHERE f_title LIKE ? AND CONTAINS(?,f_tags)"
    );
}

#[test]
fn test_foreign_key_statement() {
    let table = table(user());
    let fk = table.get_foreign_key("fk_user_org").unwrap();
    assert_eq!(
        Renderer::new(SqliteDialect::new()).foreign(&table, fk),
        "ALTER TABLE users ADD FOREIGN KEY (f_org_id) REFERENCES orgs (f_id);"
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let table = table(user());
    for kind in DialectKind::ALL {
        let renderer = Renderer::for_kind(kind);
        assert_eq!(renderer.table(&table), renderer.table(&table));
        assert_eq!(
            renderer.select(&table, &table.primary),
            renderer.select(&table, &table.primary)
        );
    }
}
