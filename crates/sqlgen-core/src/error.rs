//! Error types for tag parsing and schema loading.
//!
//! The default (lenient) load path never returns these; they surface only
//! when strict validation is requested through [`crate::config::LoadOptions`].

/// A single rejected entry of an index, unique or foreign-key tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    /// The entry has no index or group name before the first `@`.
    #[error("entry '{0}' has an empty name")]
    EmptyName(String),

    /// A foreign-key entry does not name its source column.
    #[error("entry '{0}' has an empty source column")]
    EmptySourceColumn(String),

    /// A foreign-key entry does not name the referenced table.
    #[error("entry '{0}' is missing a target table")]
    MissingTargetTable(String),

    /// The entry has more `@` segments than the grammar allows.
    #[error("entry '{entry}' has {found} '@' segments, at most {max} are allowed")]
    TooManySegments {
        /// The offending entry.
        entry: String,
        /// Number of segments found.
        found: usize,
        /// Number of segments the grammar allows.
        max: usize,
    },
}

/// Errors raised while building a table under strict validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A tag string on a field could not be parsed.
    #[error("invalid {tag} tag on field '{field}': {source}")]
    InvalidTag {
        /// Name of the field carrying the tag.
        field: String,
        /// Which tag failed (`index`, `unique`, `foreign`).
        tag: &'static str,
        /// The rejected entry.
        source: TagError,
    },

    /// The explicit `type` tag names an unknown SQL type.
    #[error("unknown SQL type '{name}' on field '{field}'")]
    UnknownSqlType {
        /// Name of the field carrying the tag.
        field: String,
        /// The unrecognized type name.
        name: String,
    },

    /// Two fields flatten to the same column name; the later one is dropped.
    #[error("field '{field}' maps to column '{column}', which is already taken")]
    DuplicateColumn {
        /// The column name both fields map to.
        column: String,
        /// Name of the later field.
        field: String,
    },

    /// Two fields override the table name with different values.
    #[error("conflicting table name overrides '{first}' and '{second}'")]
    ConflictingTableName {
        /// The override that was applied.
        first: String,
        /// The override that conflicts with it.
        second: String,
    },
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
