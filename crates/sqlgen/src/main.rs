//! sqlgen CLI
//!
//! Command-line tool that turns JSON field trees into SQL schema and CRUD
//! statements.

use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use sqlgen::{append_schema, generate, read_trees, render, write_output, Format, Settings};
use sqlgen_core::{DialectKind, LoadOptions};

/// Generate SQL statements from annotated field trees.
#[derive(Parser)]
#[command(name = "sqlgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input file holding one field tree or a JSON array of them.
    #[arg(short, long)]
    file: PathBuf,

    /// Only generate the record with this type name.
    #[arg(short = 't', long = "type")]
    type_name: Option<String>,

    /// SQL dialect (sqlite, postgres, mysql). Unknown names fall back to sqlite.
    #[arg(long, env = "SQLGEN_DIALECT", default_value = "sqlite")]
    db: String,

    /// Output file (stdout if not specified).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append the schema script (CREATE TABLE, indexes, foreign keys) to this file.
    #[arg(long)]
    sql_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Fail on malformed tags instead of skipping them.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = if cli.strict {
        LoadOptions::new().strict()
    } else {
        LoadOptions::new()
    };
    let settings = Settings {
        type_name: cli.type_name,
        dialect: DialectKind::from_name(&cli.db),
        format: cli.format,
        options,
    };
    debug!(?settings, "Starting generation");

    let trees = read_trees(&cli.file)?;
    let generated = generate(&trees, &settings)?;

    if let Some(path) = &cli.sql_file {
        append_schema(path, &generated)?;
    }
    write_output(cli.output.as_deref(), &render(&generated, settings.format)?)?;

    Ok(())
}
