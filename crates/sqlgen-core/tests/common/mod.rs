#![allow(dead_code)]

use serde_json::{json, Value};
use sqlgen_core::{load, FieldTree, Table};

pub fn tree(value: Value) -> FieldTree {
    serde_json::from_value(value).unwrap_or_else(|e| panic!("Failed to read field tree: {e}"))
}

pub fn table(value: Value) -> Table {
    load(&tree(value))
}

/// A user record with an ID, a nested address, a non-unique composite index,
/// a unique email and a grouped foreign key to `orgs`.
pub fn user() -> Value {
    json!({
        "name": "User",
        "type": "User",
        "children": [
            { "name": "ID", "type": "int64" },
            {
                "name": "Name",
                "type": "string",
                "tags": { "index": "idx_name_org", "size": 64 }
            },
            {
                "name": "Email",
                "type": "string",
                "tags": { "unique": "uniq_email" }
            },
            {
                "name": "OrgID",
                "type": "int64",
                "tags": {
                    "index": "idx_name_org",
                    "foreign": "ID@orgs@fk_user_org",
                    "many": true
                }
            },
            {
                "name": "Address",
                "type": "Address",
                "children": [
                    { "name": "City", "type": "string" },
                    { "name": "ZipCode", "type": "string", "tags": { "name": "Zip" } }
                ]
            },
            { "name": "Avatar", "type": "[]byte" },
            { "name": "Cache", "type": "string", "tags": { "skip": true } }
        ]
    })
}
