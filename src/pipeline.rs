use std::path::Path;

use log::info;

use crate::config::AnalysisConfig;
use crate::data::cache::{CachedLoader, CatalogStore, MemoryStore};
use crate::error::Result;
use crate::report::{build_report, Report};

/// Loader → derived fields → expansion → filters → aggregation, once per
/// call. The loaded catalog is reused across calls while the source file is
/// unchanged.
#[derive(Debug, Default)]
pub struct Pipeline<S: CatalogStore = MemoryStore> {
    loader: CachedLoader<S>,
}

impl Pipeline<MemoryStore> {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::default())
    }
}

impl<S: CatalogStore> Pipeline<S> {
    pub fn with_store(store: S) -> Self {
        Pipeline {
            loader: CachedLoader::new(store),
        }
    }

    pub fn run(&mut self, source: &Path, config: &AnalysisConfig) -> Result<Report> {
        config.validate()?;
        let catalog = self.loader.load(source)?;
        let report = build_report(&catalog, config);
        info!(
            "report ready: {} titles after filters, {} genres by rating",
            report.overview.titles,
            report.genres_by_rating.top_genres.len()
        );
        Ok(report)
    }

    pub fn loader(&self) -> &CachedLoader<S> {
        &self.loader
    }
}
