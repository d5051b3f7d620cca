use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use catalog_eda::{AnalysisConfig, Pipeline};

/// Run the catalog analysis and print every aggregate table as JSON.
#[derive(Debug, Parser)]
#[command(name = "catalog-eda", version)]
struct Cli {
    /// Catalog file (.csv, .json or .parquet)
    dataset: PathBuf,

    /// Analysis parameters as JSON; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_path(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    let mut pipeline = Pipeline::new();
    let report = pipeline
        .run(&cli.dataset, &config)
        .with_context(|| format!("analysing {}", cli.dataset.display()))?;

    let json = if cli.compact {
        serde_json::to_string(&report)
    } else {
        serde_json::to_string_pretty(&report)
    }
    .context("serializing report")?;

    match &cli.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("writing report")?;
        }
    }
    Ok(())
}
