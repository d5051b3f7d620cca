use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use log::{debug, info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::derive::{parse_duration_minutes, parse_release_year, parse_year_added, years_difference};
use super::model::{
    Catalog, ContentType, LoadReport, RawRecord, Record, OTHER_COUNTRY, REQUIRED_COLUMNS, UNKNOWN,
};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the required columns
/// * `.json`    – `[{ "type": "Movie", "title": ..., ... }, ...]`
/// * `.parquet` – one column per field (strings, or integers for `release_year`)
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let catalog = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(PipelineError::UnsupportedFormat(other.to_string())),
    }?;

    let report = &catalog.report;
    info!(
        "loaded {} of {} rows from {}",
        report.rows_kept,
        report.rows_read,
        path.display()
    );
    if report.dropped_invalid_type > 0 {
        warn!(
            "{} row(s) dropped for an unknown or missing type",
            report.dropped_invalid_type
        );
    }
    Ok(catalog)
}

/// Check the source schema once, before any row is read.
fn check_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let present: BTreeSet<&str> = present.into_iter().map(str::trim).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::MalformedInput { missing })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path)?;
    load_csv_reader(file)
}

/// Load a CSV catalog from any reader. Columns beyond the required ones are
/// ignored; cells missing from a short row read as absent.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    check_columns(reader.headers()?.iter())?;

    let rows = reader
        .deserialize::<RawRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(clean_records(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "type": "Movie", "title": "Dick Johnson Is Dead", "director": "Kirsten Johnson",
///     "cast": null, "country": "United States", "date_added": "September 25, 2021",
///     "release_year": 2020, "rating": "PG-13", "duration": "90 min",
///     "listed_in": "Documentaries" },
///   ...
/// ]
/// ```
///
/// The schema is the union of keys across all objects. An empty array is an
/// empty catalog.
fn load_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path)?;
    load_json_str(&text)
}

fn load_json_str(text: &str) -> Result<Catalog> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = root.as_array().ok_or_else(|| PipelineError::MalformedInput {
        missing: vec!["<top-level array>".to_string()],
    })?;

    let objects: Vec<Option<&serde_json::Map<String, JsonValue>>> =
        rows.iter().map(JsonValue::as_object).collect();
    let skipped = objects.iter().filter(|o| o.is_none()).count();
    if skipped > 0 {
        warn!("{skipped} JSON row(s) are not objects and were skipped");
    }

    if skipped < objects.len() {
        check_columns(objects.iter().flatten().flat_map(|o| o.keys().map(String::as_str)))?;
    }

    let raw = objects
        .into_iter()
        .map(|obj| {
            let obj = obj?;
            let cell = |key: &str| json_cell(obj.get(key));
            Some(RawRecord {
                content_type: cell("type"),
                title: cell("title"),
                director: cell("director"),
                cast: cell("cast"),
                country: cell("country"),
                date_added: cell("date_added"),
                release_year: cell("release_year"),
                rating: cell("rating"),
                duration: cell("duration"),
                listed_in: cell("listed_in"),
            })
        })
        .collect::<Vec<_>>();
    Ok(clean_rows(raw))
}

fn json_cell(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet catalog. Works with files written by Pandas
/// (`df.to_parquet()`) and Polars (`df.write_parquet()`); string columns may
/// be `Utf8`, `LargeUtf8` or dictionary-encoded.
fn load_parquet(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    check_columns(schema.fields().iter().map(|f| f.name().as_str()))?;

    let indices: Vec<usize> = REQUIRED_COLUMNS
        .iter()
        .map(|c| schema.index_of(c))
        .collect::<std::result::Result<_, _>>()?;

    let reader = builder.build()?;
    let mut raw = Vec::new();
    for batch in reader {
        let batch = batch?;
        let cols: Vec<&ArrayRef> = indices.iter().map(|&i| batch.column(i)).collect();
        for row in 0..batch.num_rows() {
            let cell = |c: usize| extract_cell(cols[c], row);
            raw.push(RawRecord {
                content_type: cell(0),
                title: cell(1),
                director: cell(2),
                cast: cell(3),
                country: cell(4),
                date_added: cell(5),
                release_year: cell(6),
                rating: cell(7),
                duration: cell(8),
                listed_in: cell(9),
            });
        }
    }
    debug!("read {} parquet rows from {}", raw.len(), path.display());
    Ok(clean_records(raw))
}

/// Render a single Arrow cell as text; `None` for nulls.
fn extract_cell(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => col.as_string_opt::<i32>().map(|a| a.value(row).to_string()),
        DataType::LargeUtf8 => col.as_string_opt::<i64>().map(|a| a.value(row).to_string()),
        _ => array_value_to_string(&**col, row).ok(),
    }
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Trimmed cell, or `None` when absent or blank.
fn present(cell: Option<String>) -> Option<String> {
    let cell = cell?;
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == cell.len() {
        Some(cell)
    } else {
        Some(trimmed.to_string())
    }
}

fn impute(cell: Option<String>, sentinel: &str, counter: &mut usize) -> String {
    present(cell).unwrap_or_else(|| {
        *counter += 1;
        sentinel.to_string()
    })
}

/// Apply the missing-value policy and compute derived fields.
///
/// Rows missing `date_added`, `rating` or `duration` are dropped, as are rows
/// whose `type` is not a known content type. `director` and `cast` default to
/// `"Unknown"`, `country` to `"Other"`.
pub fn clean_records<I: IntoIterator<Item = RawRecord>>(rows: I) -> Catalog {
    clean_rows(rows.into_iter().map(Some))
}

/// Like [`clean_records`], with `None` standing for a source row that could
/// not be read as a record at all. Such rows still count and keep their
/// position.
fn clean_rows<I: IntoIterator<Item = Option<RawRecord>>>(rows: I) -> Catalog {
    let mut report = LoadReport::default();
    let mut records = Vec::new();

    for (index, raw) in rows.into_iter().enumerate() {
        report.rows_read += 1;
        let Some(raw) = raw else {
            report.dropped_not_object += 1;
            continue;
        };
        if let Some(record) = clean_row(index, raw, &mut report) {
            records.push(record);
        }
    }
    report.rows_kept = records.len();
    Catalog::new(records, report)
}

fn clean_row(index: usize, raw: RawRecord, report: &mut LoadReport) -> Option<Record> {
    let Some(date_added) = present(raw.date_added) else {
        report.dropped_missing_date_added += 1;
        return None;
    };
    let Some(rating) = present(raw.rating) else {
        report.dropped_missing_rating += 1;
        return None;
    };
    let Some(duration) = present(raw.duration) else {
        report.dropped_missing_duration += 1;
        return None;
    };
    let Some(content_type) = present(raw.content_type)
        .as_deref()
        .and_then(ContentType::parse)
    else {
        debug!("row {index}: unknown content type");
        report.dropped_invalid_type += 1;
        return None;
    };

    let director = impute(raw.director, UNKNOWN, &mut report.imputed_director);
    let cast = impute(raw.cast, UNKNOWN, &mut report.imputed_cast);
    let country = impute(raw.country, OTHER_COUNTRY, &mut report.imputed_country);

    let release_year = present(raw.release_year)
        .as_deref()
        .and_then(parse_release_year);
    let year_added = parse_year_added(&date_added);
    let duration_minutes = parse_duration_minutes(&duration);

    Some(Record {
        index,
        content_type,
        title: present(raw.title).unwrap_or_default(),
        director,
        cast,
        country,
        date_added,
        release_year,
        rating,
        duration,
        listed_in: present(raw.listed_in).unwrap_or_default(),
        year_added,
        years_difference: years_difference(year_added, release_year),
        duration_minutes,
    })
}
