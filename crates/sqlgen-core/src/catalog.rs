//! Labelled statement sets for code generation.
//!
//! A [`Catalog`] holds every statement generated for one table, in a fixed
//! order, each under a deterministic label such as `selectUserByIdStmt`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::naming;
use crate::render::Renderer;
use crate::schema::{Field, Table};

/// Whether a statement changes the schema or queries data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    /// CREATE TABLE, CREATE INDEX, ALTER TABLE ... FOREIGN KEY.
    Schema,
    /// INSERT, SELECT, UPDATE, DELETE.
    Query,
}

/// One generated statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub label: String,
    pub kind: StatementKind,
    pub sql: String,
}

/// All statements generated for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub table: String,
    pub statements: Vec<Statement>,
}

impl Catalog {
    /// Generates the statement set for `table`.
    ///
    /// Statements that depend on a primary key, an index or a foreign key
    /// are only generated when the table has one.
    #[must_use]
    pub fn build(renderer: &Renderer, table: &Table) -> Self {
        let mut builder = CatalogBuilder::new(&table.name);
        let entity = naming::singular(&table.name);

        builder.push(StatementKind::Schema, renderer.table(table), &["create", &entity, "stmt"]);
        builder.push(StatementKind::Query, renderer.insert(table), &["insert", &entity, "stmt"]);
        builder.push(StatementKind::Query, renderer.select(table, &[]), &["select", &entity, "stmt"]);
        builder.push(
            StatementKind::Query,
            renderer.select_range(table, &[]),
            &["select", &entity, "range", "stmt"],
        );
        builder.push(
            StatementKind::Query,
            renderer.select_count(table, &[]),
            &["select", &entity, "count", "stmt"],
        );

        if !table.primary.is_empty() {
            let by = join_fields(&table.primary);
            builder.push(
                StatementKind::Query,
                renderer.select(table, &table.primary),
                &["select", &entity, "by", &by, "stmt"],
            );
            builder.push(
                StatementKind::Query,
                renderer.update(table, &table.primary),
                &["update", &entity, "by", &by, "stmt"],
            );
            builder.push(
                StatementKind::Query,
                renderer.delete(table, &table.primary),
                &["delete", &entity, "by", &by, "stmt"],
            );
        }

        for index in &table.indexes {
            let by = join_fields(&index.fields);
            builder.push(
                StatementKind::Schema,
                renderer.index(table, index),
                &["create", &index.name, "stmt"],
            );
            builder.push_qualified(
                StatementKind::Query,
                renderer.select(table, &index.fields),
                &["select", &entity, "by", &by, "stmt"],
                &index.name,
            );
            builder.push_qualified(
                StatementKind::Query,
                renderer.select_count(table, &index.fields),
                &["select", &entity, "count", "by", &by, "stmt"],
                &index.name,
            );
            if index.unique {
                builder.push_qualified(
                    StatementKind::Query,
                    renderer.update(table, &index.fields),
                    &["update", &entity, "by", &by, "stmt"],
                    &index.name,
                );
                builder.push_qualified(
                    StatementKind::Query,
                    renderer.delete(table, &index.fields),
                    &["delete", &entity, "by", &by, "stmt"],
                    &index.name,
                );
            } else {
                builder.push_qualified(
                    StatementKind::Query,
                    renderer.select_range(table, &index.fields),
                    &["select", &entity, "range", "by", &by, "stmt"],
                    &index.name,
                );
            }
        }

        for fk in &table.foreign_keys {
            let target = naming::singular(&fk.to_table);
            let by = naming::join_columns(&fk.from_columns, "And");
            builder.push(
                StatementKind::Schema,
                renderer.foreign(table, fk),
                &["create", &naming::singular(&fk.name), "stmt"],
            );
            builder.push_qualified(
                StatementKind::Query,
                renderer.select(table, &fk.from_fields),
                &["select", &entity, "of", &target, "by", &by, "stmt"],
                &fk.name,
            );
            if fk.many {
                builder.push_qualified(
                    StatementKind::Query,
                    renderer.select_range(table, &fk.from_fields),
                    &["select", &entity, "of", &target, "range", "by", &by, "stmt"],
                    &fk.name,
                );
            }
        }

        builder.finish()
    }

    /// Looks up a statement by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Statement> {
        self.statements.iter().find(|s| s.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Schema statements only, in generation order.
    pub fn schema(&self) -> impl Iterator<Item = &Statement> {
        self.statements
            .iter()
            .filter(|s| s.kind == StatementKind::Schema)
    }

    /// The schema statements as one script, each terminated by `;`.
    #[must_use]
    pub fn schema_script(&self) -> String {
        let mut script = String::new();
        for statement in self.schema() {
            script.push_str(&statement.sql);
            if !statement.sql.trim_end().ends_with(';') {
                script.push(';');
            }
            script.push('\n');
        }
        script
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

struct CatalogBuilder {
    catalog: Catalog,
    labels: HashMap<String, usize>,
}

impl CatalogBuilder {
    fn new(table: &str) -> Self {
        Self {
            catalog: Catalog {
                table: table.to_string(),
                statements: Vec::new(),
            },
            labels: HashMap::new(),
        }
    }

    fn push(&mut self, kind: StatementKind, sql: String, label: &[&str]) {
        self.insert(kind, sql, label, None);
    }

    /// Like [`Self::push`], but a label already taken by different SQL is
    /// retried with `via <qualifier>` before the `stmt` suffix.
    fn push_qualified(
        &mut self,
        kind: StatementKind,
        sql: String,
        label: &[&str],
        qualifier: &str,
    ) {
        self.insert(kind, sql, label, Some(qualifier));
    }

    fn insert(
        &mut self,
        kind: StatementKind,
        sql: String,
        label: &[&str],
        qualifier: Option<&str>,
    ) {
        let name = naming::label_name(label);
        let Some(&pos) = self.labels.get(&name) else {
            self.labels.insert(name.clone(), self.catalog.statements.len());
            self.catalog.statements.push(Statement { label: name, kind, sql });
            return;
        };

        if self.catalog.statements[pos].sql == sql {
            debug!(table = %self.catalog.table, label = %name, "Skipping duplicate statement");
            return;
        }
        match (qualifier, label.split_last()) {
            (Some(qualifier), Some((suffix, head))) => {
                let mut qualified = head.to_vec();
                qualified.extend(["via", qualifier, *suffix]);
                self.insert(kind, sql, &qualified, None);
            }
            _ => {
                warn!(
                    table = %self.catalog.table,
                    label = %name,
                    "Dropping statement whose label is taken by different SQL"
                );
            }
        }
    }

    fn finish(self) -> Catalog {
        self.catalog
    }
}

fn join_fields(fields: &[Field]) -> String {
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    naming::join_columns(&names, "And")
}
