use thiserror::Error;

/// Errors surfaced by the catalog pipeline.
///
/// Only schema-level and I/O problems end up here. Per-cell data quality
/// issues (unparseable dates, odd durations) degrade to `None` inside the
/// records and never abort a run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("malformed input: missing required column(s): {}", .missing.join(", "))]
    MalformedInput { missing: Vec<String> },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
