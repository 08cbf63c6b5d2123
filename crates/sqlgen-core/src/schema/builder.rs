//! Builds a [`Table`] from a field tree in a single pass.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::{Field, ForeignKey, Index, SqlType, Table};
use crate::config::LoadOptions;
use crate::error::{Result, SchemaError};
use crate::naming;
use crate::tag::{self, ForeignEntry, IndexEntry};
use crate::tree::{FieldTree, Kind, Node, NodeId, Tags};

/// Name of the field that becomes an auto-increment primary key when it is
/// a 64-bit integer.
const ID_FIELD: &str = "ID";

/// Builds the table for `tree`, skipping any tag contribution it cannot use.
#[must_use]
pub fn load(tree: &FieldTree) -> Table {
    let (table, issues) = Builder::new(tree).build();
    report(table, &issues)
}

/// Builds the table for `tree` with explicit validation options.
///
/// # Errors
///
/// Under strict validation, returns the first unparseable tag entry, unknown
/// explicit type name, duplicate column or conflicting table-name override.
pub fn load_with(tree: &FieldTree, options: &LoadOptions) -> Result<Table> {
    let (table, issues) = Builder::new(tree).build();
    if options.is_strict() {
        if let Some(issue) = issues.into_iter().next() {
            return Err(issue);
        }
        return Ok(table);
    }
    Ok(report(table, &issues))
}

/// Logs the issues a lenient build skipped over.
fn report(table: Table, issues: &[SchemaError]) -> Table {
    for issue in issues {
        warn!(table = %table.name, "{issue}");
    }
    table
}

/// State for one build. The lookup maps only live for a single call.
struct Builder<'t> {
    tree: &'t FieldTree,
    table: Table,
    indexes: HashMap<String, usize>,
    foreign_keys: HashMap<String, usize>,
    columns: HashSet<String>,
    issues: Vec<SchemaError>,
}

impl<'t> Builder<'t> {
    fn new(tree: &'t FieldTree) -> Self {
        Self {
            tree,
            table: Table::new(naming::table_name(&tree.root().type_name)),
            indexes: HashMap::new(),
            foreign_keys: HashMap::new(),
            columns: HashSet::new(),
            issues: Vec::new(),
        }
    }

    fn build(mut self) -> (Table, Vec<SchemaError>) {
        let edges = self.tree.edges();
        self.resolve_table_name(&edges);
        for id in edges {
            self.add_edge(id);
        }
        (self.table, self.issues)
    }

    /// Applies the first `tableName` override; later different overrides
    /// are reported.
    fn resolve_table_name(&mut self, edges: &[NodeId]) {
        let tree = self.tree;
        let mut chosen: Option<&str> = None;
        for &id in edges {
            let node = tree.node(id);
            if node.is_skipped() {
                continue;
            }
            let Some(name) = node.tags.as_ref().and_then(|t| t.table_name.as_deref()) else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            match chosen {
                None => chosen = Some(name),
                Some(first) if first != name => {
                    self.issues.push(SchemaError::ConflictingTableName {
                        first: first.to_string(),
                        second: name.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
        if let Some(name) = chosen {
            debug!(from = %self.table.name, to = %name, "Overriding table name");
            self.table.name = name.to_string();
        }
    }

    fn add_edge(&mut self, id: NodeId) {
        let tree = self.tree;
        let node = tree.node(id);
        if node.is_skipped() {
            return;
        }
        let default_tags = Tags::default();
        let tags = node.tags.as_ref().unwrap_or(&default_tags);

        let name = self.column_name(id);
        if !self.columns.insert(name.clone()) {
            self.issues.push(SchemaError::DuplicateColumn {
                column: name,
                field: node.name.clone(),
            });
            return;
        }

        let mut field = Field::new(id, name, self.column_type(node, tags));
        field.primary = tags.primary;
        field.auto = tags.auto;
        field.size = tags.size;

        if node.name == ID_FIELD && node.kind == Kind::Int64 {
            field.primary = true;
            field.auto = true;
        }

        if field.primary {
            self.table.primary.push(field.clone());
        }

        if let Some(index) = tags.index.as_deref() {
            let entries = self.parse_index(&field, "index", index);
            self.attach_indexes(&field, entries, false);
        }
        if let Some(unique) = tags.unique.as_deref() {
            let entries = self.parse_index(&field, "unique", unique);
            self.attach_indexes(&field, entries, true);
        }
        if let Some(foreign) = tags.foreign.as_deref() {
            let entries = self.parse_foreign(&field, foreign);
            self.attach_foreign_keys(&field, tags, entries);
        }

        self.table.fields.push(field);
    }

    /// Flattens the node path, honouring per-segment name overrides.
    fn column_name(&self, id: NodeId) -> String {
        let segments: Vec<&str> = self
            .tree
            .path(id)
            .into_iter()
            .map(|part| {
                part.tags
                    .as_ref()
                    .and_then(|t| t.name.as_deref())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(&part.name)
            })
            .collect();
        naming::column_name(&segments)
    }

    fn column_type(&mut self, node: &Node, tags: &Tags) -> SqlType {
        let derived = SqlType::from_kind(node.kind);
        match tags.sql_type.as_deref().map(str::trim) {
            None | Some("") => derived,
            Some(name) => SqlType::from_name(name).unwrap_or_else(|| {
                self.issues.push(SchemaError::UnknownSqlType {
                    field: node.name.clone(),
                    name: name.to_string(),
                });
                derived
            }),
        }
    }

    fn parse_index(&mut self, field: &Field, tag: &'static str, text: &str) -> Vec<IndexEntry> {
        let parse = tag::parse_index_tag(text);
        self.record_rejected(field, tag, parse.rejected);
        parse.entries
    }

    fn parse_foreign(&mut self, field: &Field, text: &str) -> Vec<ForeignEntry> {
        let parse = tag::parse_foreign_tag(text);
        self.record_rejected(field, "foreign", parse.rejected);
        parse.entries
    }

    fn record_rejected(
        &mut self,
        field: &Field,
        tag: &'static str,
        rejected: Vec<crate::error::TagError>,
    ) {
        self.issues
            .extend(rejected.into_iter().map(|source| SchemaError::InvalidTag {
                field: field.name.clone(),
                tag,
                source,
            }));
    }

    fn attach_indexes(&mut self, field: &Field, entries: Vec<IndexEntry>, unique: bool) {
        for entry in entries {
            let pos = match self.indexes.get(&entry.name) {
                Some(&pos) => pos,
                None => {
                    debug!(table = %self.table.name, index = %entry.name, unique, "Creating index");
                    self.table.indexes.push(Index::new(entry.name.clone()));
                    let pos = self.table.indexes.len() - 1;
                    self.indexes.insert(entry.name.clone(), pos);
                    pos
                }
            };
            let index = &mut self.table.indexes[pos];
            if unique {
                index.unique = true;
            }
            index
                .fields
                .push(field.with_operator(entry.operator, entry.value_as_first_arg));
        }
    }

    fn attach_foreign_keys(&mut self, field: &Field, tags: &Tags, entries: Vec<ForeignEntry>) {
        for entry in entries {
            let name = entry
                .group
                .clone()
                .or_else(|| tags.foreign_group.clone().filter(|g| !g.trim().is_empty()))
                .unwrap_or_else(|| naming::foreign_key_name(&self.table.name, &entry.target_table));

            let pos = match self.foreign_keys.get(&name) {
                Some(&pos) => pos,
                None => {
                    debug!(
                        table = %self.table.name,
                        foreign_key = %name,
                        to_table = %entry.target_table,
                        "Creating foreign key"
                    );
                    self.table
                        .foreign_keys
                        .push(ForeignKey::new(name.clone(), entry.target_table.clone(), tags.many));
                    let pos = self.table.foreign_keys.len() - 1;
                    self.foreign_keys.insert(name, pos);
                    pos
                }
            };
            self.table.foreign_keys[pos].push(field.clone(), entry.target_column());
        }
    }
}
