//! Identifier conventions for tables, columns, constraints and statement
//! labels.
//!
//! Every function here is pure: the same input always yields the same
//! identifier, which keeps generated output stable across runs.

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

/// Segment that replaces the record name at the start of every column path.
pub const COLUMN_PREFIX: &str = "f";

/// Suffix marking statement labels, which start lowercase.
const STATEMENT_SUFFIX: &str = "Stmt";

/// Derives a table name from a record type name: snake case, pluralized.
#[must_use]
pub fn table_name(type_name: &str) -> String {
    pluralizer::pluralize(&type_name.to_snake_case(), 2, false)
}

/// Singular form of a table or record name, used in statement labels.
#[must_use]
pub fn singular(name: &str) -> String {
    pluralizer::pluralize(name, 1, false)
}

/// Flattens a field path into a column name.
///
/// The first segment (the record itself) is replaced with
/// [`COLUMN_PREFIX`], so `User.Address.ZipCode` becomes
/// `f_address_zip_code`.
#[must_use]
pub fn column_name<S: AsRef<str>>(segments: &[S]) -> String {
    let mut parts: Vec<&str> = segments.iter().map(AsRef::as_ref).collect();
    match parts.first_mut() {
        Some(first) => *first = COLUMN_PREFIX,
        None => return String::new(),
    }
    parts.join("_").to_snake_case()
}

/// Column referenced on the target table of a foreign key.
#[must_use]
pub fn target_column(source_column: &str) -> String {
    format!("{COLUMN_PREFIX}_{}", source_column.trim().to_snake_case())
}

/// Default name of the foreign key grouping columns of `table` that
/// reference `target_table`.
#[must_use]
pub fn foreign_key_name(table: &str, target_table: &str) -> String {
    format!("fk_{table}_to_{target_table}")
}

/// Builds a statement label from its segments.
///
/// Segments are joined with underscores and converted to upper camel case;
/// labels ending in `Stmt` start with a lowercase letter instead:
/// `["select", "user", "by", "Id", "stmt"]` gives `selectUserByIdStmt`.
#[must_use]
pub fn label_name<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("_");
    let name = joined.to_upper_camel_case();
    if name.ends_with(STATEMENT_SUFFIX) {
        name.to_lower_camel_case()
    } else {
        name
    }
}

/// Joins column names into a label fragment: `f_user_id`, `f_name` with
/// `And` gives `UserIdAndName`.
#[must_use]
pub fn join_columns<S: AsRef<str>>(columns: &[S], sep: &str) -> String {
    columns
        .iter()
        .map(|c| {
            let column = c.as_ref();
            let bare = column
                .strip_prefix(COLUMN_PREFIX)
                .and_then(|rest| rest.strip_prefix('_'))
                .unwrap_or(column);
            bare.to_upper_camel_case()
        })
        .collect::<Vec<_>>()
        .join(sep)
}
