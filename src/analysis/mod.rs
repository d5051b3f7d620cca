/// Aggregation engine: frequency ranking, cross-tabulation and grouped
/// statistics over (possibly expanded, possibly filtered) rows.
///
/// Every operation accepts plain iterators of keys or `(key, value)` pairs,
/// so callers project records however a section needs. Empty input always
/// yields an empty result rather than an error.

pub mod pivot;
pub mod rank;
pub mod stats;

pub use pivot::{AxisOrder, CrossTab};
pub use rank::{top_k, top_k_keys, value_counts};
pub use stats::{grouped_counts, grouped_summaries, Statistic, Summary};
