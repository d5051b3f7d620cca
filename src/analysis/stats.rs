use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which central tendency a caller wants to display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    #[default]
    Mean,
    Median,
}

/// Descriptive statistics of one group.
///
/// `std_dev` is the sample standard deviation (N−1 denominator) and is
/// undefined for single-member groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: Option<f64>,
}

impl Summary {
    /// Summarise `values`; `None` when there is nothing to summarise.
    /// Non-finite values are ignored.
    pub fn from_values(values: &[f64]) -> Option<Summary> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        let std_dev = (n > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        });

        Some(Summary {
            count: n,
            mean,
            median,
            std_dev,
        })
    }

    pub fn statistic(&self, which: Statistic) -> f64 {
        match which {
            Statistic::Mean => self.mean,
            Statistic::Median => self.median,
        }
    }
}

/// Group `(key, value)` pairs and summarise each group, ordered by key.
///
/// Use a tuple key for two-level grouping.
pub fn grouped_summaries<K, I>(items: I) -> BTreeMap<K, Summary>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for (key, value) in items {
        groups.entry(key).or_default().push(value);
    }
    groups
        .into_iter()
        .filter_map(|(key, values)| Summary::from_values(&values).map(|s| (key, s)))
        .collect()
}

/// Occurrences per key, ordered by key.
pub fn grouped_counts<K, I>(keys: I) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}
