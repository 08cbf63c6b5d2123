//! Statement catalogs built from loaded tables.

mod common;

use common::{table, user};
use serde_json::json;
use sqlgen_core::{Catalog, DialectKind, Renderer, StatementKind};

fn catalog(kind: DialectKind) -> Catalog {
    Catalog::build(&Renderer::for_kind(kind), &table(user()))
}

#[test]
fn test_catalog_labels_in_generation_order() {
    let catalog = catalog(DialectKind::Sqlite);
    let labels: Vec<&str> = catalog.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        &labels[..8],
        &[
            "createUserStmt",
            "insertUserStmt",
            "selectUserStmt",
            "selectUserRangeStmt",
            "selectUserCountStmt",
            "selectUserByIdStmt",
            "updateUserByIdStmt",
            "deleteUserByIdStmt",
        ]
    );
    assert!(labels.contains(&"selectUserByNameAndOrgIdStmt"));
    assert!(labels.contains(&"selectUserRangeByNameAndOrgIdStmt"));
    assert!(labels.contains(&"updateUserByEmailStmt"));
    assert!(labels.contains(&"selectUserOfOrgByOrgIdStmt"));
    assert!(labels.contains(&"selectUserOfOrgRangeByOrgIdStmt"));
}

#[test]
fn test_catalog_labels_are_unique() {
    let catalog = catalog(DialectKind::Mysql);
    let mut labels: Vec<&str> = catalog.iter().map(|s| s.label.as_str()).collect();
    let total = labels.len();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), total);
}

#[test]
fn test_catalog_sql_follows_dialect() {
    let sqlite = catalog(DialectKind::Sqlite);
    let postgres = catalog(DialectKind::Postgres);
    assert_eq!(
        sqlite.get("deleteUserByIdStmt").unwrap().sql,
        "DELETE FROM users\nWHERE f_id=?"
    );
    assert_eq!(
        postgres.get("deleteUserByIdStmt").unwrap().sql,
        "DELETE FROM users\nWHERE f_id=$1"
    );
}

#[test]
fn test_schema_script_contains_every_schema_statement() {
    let catalog = catalog(DialectKind::Sqlite);
    let script = catalog.schema_script();
    let schema: Vec<_> = catalog
        .iter()
        .filter(|s| s.kind == StatementKind::Schema)
        .collect();
    assert_eq!(schema.len(), 4);
    assert_eq!(script.lines().filter(|l| l.ends_with(';')).count(), 4);
    assert!(script.contains("CREATE UNIQUE INDEX IF NOT EXISTS uniq_email ON users (f_email);"));
}

#[test]
fn test_catalog_serializes_to_json() {
    let catalog = catalog(DialectKind::Sqlite);
    let value = serde_json::to_value(&catalog).unwrap();
    assert_eq!(value["table"], "users");
    assert_eq!(value["statements"][0]["label"], "createUserStmt");
    assert_eq!(value["statements"][0]["kind"], "schema");
}

#[test]
fn test_operator_variants_of_one_column_get_distinct_labels() {
    let table = table(json!({ "name": "User", "type": "User", "children": [
        { "name": "Bio", "type": "string", "tags": { "index": "by_bio;by_bio_like@LIKE" } }
    ]}));
    let catalog = Catalog::build(&Renderer::for_kind(DialectKind::Sqlite), &table);

    let like: Vec<&str> = catalog
        .iter()
        .filter(|s| s.sql.contains("LIKE"))
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(
        like,
        vec![
            "selectUserByBioViaByBioLikeStmt",
            "selectUserCountByBioViaByBioLikeStmt",
            "selectUserRangeByBioViaByBioLikeStmt",
        ]
    );
    assert!(catalog.get("createByBioLikeStmt").is_some());
    assert_eq!(
        catalog.get("selectUserByBioStmt").unwrap().sql,
        "SELECT f_bio\nFROM users\nWHERE f_bio=?"
    );
}
