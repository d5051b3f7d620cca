use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::Statistic;
use crate::data::filter::RecordFilter;
use crate::data::model::ContentType;
use crate::error::{PipelineError, Result};

/// Parameters chosen by the caller for one analysis run.
///
/// Every field has a default, so `{}` is a valid config. Empty sets mean
/// "no restriction" unless a report section documents its own fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub content_types: BTreeSet<ContentType>,
    /// Inclusive release-year bounds, `[min, max]`.
    pub release_years: Option<(i32, i32)>,
    pub countries: BTreeSet<String>,
    pub ratings: BTreeSet<String>,
    pub top_genres: usize,
    pub top_creators: usize,
    pub duration_statistic: Statistic,
    /// Inclusive bounds on the release-to-catalog lag, in years.
    pub lag_window: (i32, i32),
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            content_types: BTreeSet::new(),
            release_years: None,
            countries: BTreeSet::new(),
            ratings: BTreeSet::new(),
            top_genres: 10,
            top_creators: 10,
            duration_statistic: Statistic::Mean,
            lag_window: (-2, 30),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_genres == 0 {
            return Err(PipelineError::InvalidConfig("top_genres must be positive".into()));
        }
        if self.top_creators == 0 {
            return Err(PipelineError::InvalidConfig("top_creators must be positive".into()));
        }
        if let Some((min, max)) = self.release_years {
            if min > max {
                return Err(PipelineError::InvalidConfig(format!(
                    "release_years [{min}, {max}] is empty"
                )));
            }
        }
        let (lo, hi) = self.lag_window;
        if lo > hi {
            return Err(PipelineError::InvalidConfig(format!("lag_window [{lo}, {hi}] is empty")));
        }
        Ok(())
    }

    /// Content-type and release-year predicates shared by every section.
    pub fn base_filter(&self) -> RecordFilter {
        RecordFilter {
            content_types: self.content_types.clone(),
            release_years: self.release_years,
            ..RecordFilter::default()
        }
    }
}
