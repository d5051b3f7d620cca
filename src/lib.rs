//! Exploratory analysis of streaming catalog datasets.
//!
//! A single batch pass turns a flat catalog (titles, genres, countries,
//! people, dates, durations) into aggregate tables: genre concentration by
//! country and rating, top directors by year and rating, runtime by country,
//! and the lag between release and catalog addition.
//!
//! ```ignore
//! use catalog_eda::{AnalysisConfig, Pipeline};
//! use std::path::Path;
//!
//! let mut pipeline = Pipeline::new();
//! let report = pipeline.run(Path::new("netflix_titles.csv"), &AnalysisConfig::default())?;
//! println!("{} titles", report.overview.titles);
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::AnalysisConfig;
pub use data::model::{Catalog, ContentType, Record};
pub use error::{PipelineError, Result};
pub use pipeline::Pipeline;
pub use report::{build_report, Report};
