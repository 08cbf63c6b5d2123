//! # sqlgen-core
//!
//! Turns an annotated field tree describing a record type into a relational
//! table model and compiles that model into dialect-specific SQL.
//!
//! The pipeline has three stages:
//! - [`tree::FieldTree`] is the input: a record and its nested fields, each
//!   carrying string-valued [`tree::Tags`].
//! - [`schema::load`] walks the tree leaves and builds a [`schema::Table`]
//!   with columns, a primary key, named indexes and foreign-key groups.
//! - [`render::Renderer`] turns the table into CREATE, INSERT, SELECT,
//!   UPDATE and DELETE text for one of the [`dialect`] implementations.
//!
//! ```rust
//! use sqlgen_core::dialect::SqliteDialect;
//! use sqlgen_core::render::Renderer;
//! use sqlgen_core::schema::load;
//! use sqlgen_core::tree::{FieldTree, Kind, Node, NodeId, Tags};
//!
//! let mut tree = FieldTree::new("User", "User");
//! tree.push(NodeId::ROOT, Node::new("ID", Kind::Int64, "int64"));
//! tree.push(
//!     NodeId::ROOT,
//!     Node::new("Email", Kind::String, "string").with_tags(Tags {
//!         unique: Some("uniq_email".to_string()),
//!         ..Tags::default()
//!     }),
//! );
//!
//! let table = load(&tree);
//! let renderer = Renderer::new(SqliteDialect::new());
//!
//! assert_eq!(table.name, "users");
//! assert_eq!(
//!     renderer.select(&table, &table.primary),
//!     "SELECT f_id,f_email\nFROM users\nWHERE f_id=?"
//! );
//! ```
//!
//! [`catalog::Catalog`] collects the full labelled statement set for one
//! table, which is what code generators consume.

pub mod catalog;
pub mod config;
pub mod dialect;
pub mod error;
pub mod naming;
pub mod render;
pub mod schema;
pub mod tag;
pub mod tree;

pub use catalog::{Catalog, Statement, StatementKind};
pub use config::{DialectKind, LoadOptions, Validation};
pub use error::{Result, SchemaError, TagError};
pub use render::Renderer;
pub use schema::{load, load_with, Field, ForeignKey, Index, SqlType, Table};
pub use tree::{FieldTree, Kind, Node, NodeId, Tags};
