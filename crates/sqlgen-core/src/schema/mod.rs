//! Dialect-neutral table model.
//!
//! A [`Table`] is built once from a [`FieldTree`] by [`load`] and is
//! read-only afterwards; renderers only borrow it.

mod builder;

pub use builder::{load, load_with};

use serde::{Deserialize, Serialize};

use crate::tag::Operator;
use crate::tree::{FieldTree, Kind, Node, NodeId};

/// Column types understood by every dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlType {
    Integer,
    Long,
    Varchar,
    Boolean,
    Real,
    Blob,
    Float,
    Double,
    MediumText,
    LongText,
}

impl SqlType {
    /// Maps a source kind to its column type. Kinds without a scalar
    /// mapping are stored as BLOB.
    #[must_use]
    pub const fn from_kind(kind: Kind) -> Self {
        match kind {
            Kind::Bool => Self::Boolean,
            Kind::Int
            | Kind::Int8
            | Kind::Int16
            | Kind::Int32
            | Kind::Uint
            | Kind::Uint8
            | Kind::Uint16
            | Kind::Uint32
            | Kind::Uint64
            | Kind::Complex64
            | Kind::Complex128 => Self::Integer,
            Kind::Int64 => Self::Long,
            Kind::Float32 => Self::Float,
            Kind::Float64 => Self::Double,
            Kind::String => Self::Varchar,
            Kind::Interface
            | Kind::Bytes
            | Kind::Map
            | Kind::Slice
            | Kind::Struct
            | Kind::Pointer
            | Kind::Other => Self::Blob,
        }
    }

    /// Looks up an explicit type name from a `type` tag (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let t = match name.trim().to_ascii_lowercase().as_str() {
            "text" | "varchar" | "varchar2" => Self::Varchar,
            "number" | "integer" | "int" => Self::Integer,
            "long" | "bigint" => Self::Long,
            "bool" | "boolean" => Self::Boolean,
            "real" => Self::Real,
            "blob" | "bytea" => Self::Blob,
            "float" => Self::Float,
            "double" => Self::Double,
            "mediumtext" => Self::MediumText,
            "longtext" => Self::LongText,
            _ => return None,
        };
        Some(t)
    }
}

/// One column of a table.
///
/// The same column may appear in several indexes; each appearance is a
/// clone carrying its own predicate operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// The tree node this column was derived from.
    pub node: NodeId,
    /// Column name.
    pub name: String,
    pub sql_type: SqlType,
    pub primary: bool,
    pub auto: bool,
    /// Column size; 0 lets the dialect pick its default.
    pub size: usize,
    /// Predicate used when this field appears in a WHERE clause.
    pub operator: Operator,
    /// For function-style operators: pass the bound value first.
    pub value_as_first_arg: bool,
}

impl Field {
    /// Creates a plain column with an equality predicate.
    #[must_use]
    pub fn new(node: NodeId, name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            node,
            name: name.into(),
            sql_type,
            primary: false,
            auto: false,
            size: 0,
            operator: Operator::Eq,
            value_as_first_arg: false,
        }
    }

    /// Marks the field as (part of) the primary key.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Marks the field as auto-incrementing.
    #[must_use]
    pub fn auto(mut self) -> Self {
        self.auto = true;
        self
    }

    #[must_use]
    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Returns a copy of this field that uses `operator` in WHERE clauses.
    #[must_use]
    pub fn with_operator(&self, operator: Operator, value_as_first_arg: bool) -> Self {
        Self {
            operator,
            value_as_first_arg,
            ..self.clone()
        }
    }

    /// Returns the tree node this field was derived from.
    ///
    /// # Panics
    ///
    /// Panics if `tree` is not the tree the field was loaded from.
    #[must_use]
    pub fn source<'t>(&self, tree: &'t FieldTree) -> &'t Node {
        tree.node(self.node)
    }
}

/// A named index over one or more fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub unique: bool,
    /// Indexed fields in declaration order.
    pub fields: Vec<Field>,
}

impl Index {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique: false,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// A group of columns referencing another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    pub name: String,
    /// Referenced table.
    pub to_table: String,
    /// Referencing columns, parallel to `to_columns`.
    pub from_columns: Vec<String>,
    /// Referenced columns.
    pub to_columns: Vec<String>,
    /// The fields behind `from_columns`.
    pub from_fields: Vec<Field>,
    /// This table holds the "many" side of the relation.
    pub many: bool,
}

impl ForeignKey {
    #[must_use]
    pub fn new(name: impl Into<String>, to_table: impl Into<String>, many: bool) -> Self {
        Self {
            name: name.into(),
            to_table: to_table.into(),
            from_columns: Vec::new(),
            to_columns: Vec::new(),
            from_fields: Vec::new(),
            many,
        }
    }

    /// Adds a `(from, to)` column pair.
    pub fn push(&mut self, field: Field, to_column: impl Into<String>) {
        self.from_columns.push(field.name.clone());
        self.to_columns.push(to_column.into());
        self.from_fields.push(field);
    }

    /// Iterates over `(from_column, to_column)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.from_columns
            .iter()
            .map(String::as_str)
            .zip(self.to_columns.iter().map(String::as_str))
    }
}

/// A table built from one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Columns in declaration order.
    pub fields: Vec<Field>,
    /// Primary-key columns, in declaration order.
    pub primary: Vec<Field>,
    pub indexes: Vec<Index>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            primary: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Appends a column, registering it in the primary key when flagged.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        if field.primary {
            self.primary.push(field.clone());
        }
        self.fields.push(field);
        self
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Gets an index by name.
    #[must_use]
    pub fn get_index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|i| i.name == name)
    }

    /// Gets a foreign key by name.
    #[must_use]
    pub fn get_foreign_key(&self, name: &str) -> Option<&ForeignKey> {
        self.foreign_keys.iter().find(|fk| fk.name == name)
    }

    /// Columns written by INSERT: everything except auto-increment columns.
    pub fn insertable_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.auto)
    }
}
