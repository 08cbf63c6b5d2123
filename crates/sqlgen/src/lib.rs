//! # sqlgen
//!
//! Front end for `sqlgen-core`: reads field trees from JSON, builds their
//! table models and writes the generated statements in one of several
//! formats.
//!
//! The binary in `main.rs` only parses flags and installs logging; the
//! steps it runs live here so they can be tested without a process.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::{debug, info};

use sqlgen_core::{load_with, Catalog, DialectKind, FieldTree, LoadOptions, Renderer, Table};

/// Output layout for generated statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Labelled SQL, one statement per block.
    #[default]
    Text,
    /// Statement catalogs as JSON.
    Json,
    /// Table models as JSON.
    Model,
}

/// Settings for one generation run.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Only generate the record whose root type matches.
    pub type_name: Option<String>,
    pub dialect: DialectKind,
    pub format: Format,
    pub options: LoadOptions,
}

/// A loaded table and its statements.
#[derive(Debug, Clone)]
pub struct Generated {
    pub table: Table,
    pub catalog: Catalog,
}

/// Input files hold one field tree or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum TreeFile {
    One(FieldTree),
    Many(Vec<FieldTree>),
}

/// Reads every field tree from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a field tree
/// document.
pub fn read_trees(path: &Path) -> anyhow::Result<Vec<FieldTree>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_trees(&text).with_context(|| format!("invalid field tree in {}", path.display()))
}

/// Parses one field tree or a list of them from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a field tree document.
pub fn parse_trees(text: &str) -> anyhow::Result<Vec<FieldTree>> {
    Ok(match serde_json::from_str(text)? {
        TreeFile::One(tree) => vec![tree],
        TreeFile::Many(trees) => trees,
    })
}

/// Loads and renders the selected trees.
///
/// # Errors
///
/// Returns an error when `type_name` matches no tree, or when strict
/// validation rejects a tree.
pub fn generate(trees: &[FieldTree], settings: &Settings) -> anyhow::Result<Vec<Generated>> {
    let selected: Vec<&FieldTree> = match settings.type_name.as_deref() {
        Some(name) => trees.iter().filter(|t| t.root().type_name == name).collect(),
        None => trees.iter().collect(),
    };
    if selected.is_empty() {
        if let Some(name) = settings.type_name.as_deref() {
            bail!("type {name} not found in input");
        }
    }

    let renderer = Renderer::for_kind(settings.dialect);
    selected
        .into_iter()
        .map(|tree| {
            let table = load_with(tree, &settings.options)
                .with_context(|| format!("failed to load type {}", tree.root().type_name))?;
            let catalog = Catalog::build(&renderer, &table);
            info!(
                table = %table.name,
                dialect = %settings.dialect,
                statements = catalog.len(),
                "Generated statements"
            );
            Ok(Generated { table, catalog })
        })
        .collect()
}

/// Formats generated output.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(generated: &[Generated], format: Format) -> anyhow::Result<String> {
    match format {
        Format::Text => Ok(render_text(generated)),
        Format::Json => {
            let catalogs: Vec<&Catalog> = generated.iter().map(|g| &g.catalog).collect();
            Ok(serde_json::to_string_pretty(&catalogs)? + "\n")
        }
        Format::Model => {
            let tables: Vec<&Table> = generated.iter().map(|g| &g.table).collect();
            Ok(serde_json::to_string_pretty(&tables)? + "\n")
        }
    }
}

fn render_text(generated: &[Generated]) -> String {
    let mut out = String::new();
    for g in generated {
        out.push_str(&format!("-- table: {}\n\n", g.catalog.table));
        for statement in &g.catalog {
            out.push_str(&format!("-- {}\n{}\n\n", statement.label, statement.sql));
        }
    }
    out
}

/// Writes `content` to `path`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            create_parent(path)?;
            fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            debug!(path = %path.display(), bytes = content.len(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Appends the schema script of every catalog to `path`, creating the file
/// and its directory if needed.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn append_schema(path: &Path, generated: &[Generated]) -> anyhow::Result<()> {
    create_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    for g in generated {
        file.write_all(g.catalog.schema_script().as_bytes())
            .with_context(|| format!("failed to append to {}", path.display()))?;
    }
    info!(path = %path.display(), tables = generated.len(), "Appended schema script");
    Ok(())
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    Ok(())
}
