//! CLI tool for crosstab - builds a cross-tab from a catalog and a layout
//!
//! Usage:
//!   crosstab_cli --catalog response.json --layout layout.json            # SavedTable JSON to stdout
//!   crosstab_cli --catalog response.json --layout layout.json -f text    # Plain text grid
//!   crosstab_cli --catalog response.json --layout layout.json -o out.json
//!
//! The layout file lists question ids per axis:
//!   {"rows": ["Q1", "Q3"], "columns": ["Q2"]}

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crosstab::layout::AxisLayout;
use crosstab::{export, Axis, BuilderConfig, SavedTable, TableBuilder};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "crosstab_cli", version, about = "Build a cross-tabulation table")]
struct Cli {
    /// Survey-response catalog JSON
    #[arg(long)]
    catalog: PathBuf,

    /// Layout JSON: {"rows": [...], "columns": [...]}
    #[arg(long)]
    layout: PathBuf,

    /// Builder config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail on malformed catalog entries instead of skipping them
    #[arg(long)]
    strict: bool,

    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Default, Deserialize)]
struct LayoutFile {
    #[serde(default)]
    rows: Vec<String>,
    #[serde(default)]
    columns: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => BuilderConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => BuilderConfig::default(),
    };
    if cli.strict {
        config = config.strict();
    }

    let catalog_json = fs::read_to_string(&cli.catalog)
        .with_context(|| format!("reading catalog {}", cli.catalog.display()))?;
    let layout_json = fs::read_to_string(&cli.layout)
        .with_context(|| format!("reading layout {}", cli.layout.display()))?;
    let layout: LayoutFile = serde_json::from_str(&layout_json).context("parsing layout")?;

    let mut builder = TableBuilder::from_catalog_json(&catalog_json, config)?;
    info!(questions = builder.catalog().len(), "catalog ready");

    for (axis, ids) in [(Axis::Row, &layout.rows), (Axis::Column, &layout.columns)] {
        for id in ids {
            if !builder.add_question(axis, id)? {
                warn!(%axis, id = id.as_str(), "duplicate question ignored");
            }
        }
    }

    let table = builder.confirm_and_save();
    let rendered = match cli.format {
        OutputFormat::Json => export::to_json_pretty(&table)?,
        OutputFormat::Text => render_text(&table),
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("Written: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

/// One line per row answer; each column answer shows `count pct`.
fn render_text(table: &SavedTable) -> String {
    let rows = AxisLayout::new(&table.row_questions);
    let mut out = String::new();

    let header: Vec<String> = table
        .column_questions
        .iter()
        .flat_map(|q| q.answers.iter().map(move |a| format!("{}:{}", q.id, a.label)))
        .collect();
    out.push_str(&format!("{:<24}| {}\n", "", header.join(" | ")));

    for (i, cells) in table.table_matrix.iter().enumerate() {
        let label = rows
            .locate(i)
            .and_then(|(qi, ai)| {
                let q = table.row_questions.get(qi)?;
                let a = q.answers.get(ai)?;
                Some(format!("{}:{}", q.id, a.label))
            })
            .unwrap_or_default();
        let values: Vec<String> = cells
            .iter()
            .map(|c| format!("{} {}", c.count, c.percentage_label()))
            .collect();
        out.push_str(&format!("{label:<24}| {}\n", values.join(" | ")));
    }
    out
}
