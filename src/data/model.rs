use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Imputed value for a missing `director` or `cast`.
pub const UNKNOWN: &str = "Unknown";
/// Imputed value for a missing `country`.
pub const OTHER_COUNTRY: &str = "Other";

/// Columns that must be present in every source schema.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "type",
    "title",
    "director",
    "cast",
    "country",
    "date_added",
    "release_year",
    "rating",
    "duration",
    "listed_in",
];

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    /// Parse the source spelling (`"Movie"` / `"TV Show"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Movie" => Some(ContentType::Movie),
            "TV Show" => Some(ContentType::TvShow),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one source row before cleaning
// ---------------------------------------------------------------------------

/// A source row as read from disk. Every cell is optional; the loader
/// decides which absences are fatal for the row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub title: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub listed_in: Option<String>,
}

// ---------------------------------------------------------------------------
// Record – one cleaned catalog entry
// ---------------------------------------------------------------------------

/// A cleaned catalog entry with its derived fields.
///
/// Records are immutable once the loader hands them out.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Row position in the source (0-based, data rows only).
    pub index: usize,
    pub content_type: ContentType,
    pub title: String,
    pub director: String,
    pub cast: String,
    /// Comma-separated country list; `"Other"` when the source had none.
    pub country: String,
    pub date_added: String,
    pub release_year: Option<i32>,
    pub rating: String,
    pub duration: String,
    /// Comma-separated genre list.
    pub listed_in: String,

    // -- derived --
    pub year_added: Option<i32>,
    pub years_difference: Option<i32>,
    pub duration_minutes: Option<f64>,
}

/// Multi-valued text fields that can be expanded one row per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiValued {
    Country,
    Genre,
}

impl Record {
    /// Raw comma-separated value of a multi-valued field.
    pub fn multi_value(&self, field: MultiValued) -> &str {
        match field {
            MultiValued::Country => &self.country,
            MultiValued::Genre => &self.listed_in,
        }
    }

    pub fn is_movie(&self) -> bool {
        self.content_type == ContentType::Movie
    }
}

// ---------------------------------------------------------------------------
// LoadReport
// ---------------------------------------------------------------------------

/// What happened while cleaning the source rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped_missing_date_added: usize,
    pub dropped_missing_rating: usize,
    pub dropped_missing_duration: usize,
    pub dropped_invalid_type: usize,
    /// Source rows that were not records at all (non-object JSON entries).
    pub dropped_not_object: usize,
    pub imputed_director: usize,
    pub imputed_cast: usize,
    pub imputed_country: usize,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset plus a summary of the cleaning pass.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub records: Vec<Record>,
    pub report: LoadReport,
}

impl Catalog {
    pub fn new(records: Vec<Record>, report: LoadReport) -> Self {
        Catalog { records, report }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct release years.
    pub fn release_years(&self) -> BTreeSet<i32> {
        self.records.iter().filter_map(|r| r.release_year).collect()
    }
}
