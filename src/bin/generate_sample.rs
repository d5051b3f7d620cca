use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use log::info;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const GENRES: &[&str] = &[
    "Dramas",
    "Comedies",
    "International Movies",
    "Documentaries",
    "Action & Adventure",
    "Independent Movies",
    "Thrillers",
    "Romantic Movies",
    "Horror Movies",
    "Children & Family Movies",
    "Crime TV Shows",
    "Kids' TV",
    "Docuseries",
    "Anime Series",
];

const COUNTRIES: &[&str] = &[
    "United States",
    "India",
    "United Kingdom",
    "Japan",
    "South Korea",
    "Canada",
    "Spain",
    "France",
    "Mexico",
    "Egypt",
    "Nigeria",
    "Brazil",
];

const RATINGS: &[&str] = &["TV-MA", "TV-14", "TV-PG", "R", "PG-13", "PG", "TV-Y7", "TV-G", "NR"];

const DIRECTORS: &[&str] = &[
    "Rajiv Chilaka",
    "Raúl Campos, Jan Suter",
    "Marcus Raboy",
    "Suhas Kadav",
    "Jay Karas",
    "Cathy Garcia-Molina",
    "Martin Scorsese",
    "Youssef Chahine",
    "Jay Chapman",
    "Steven Spielberg",
];

const WORDS: &[&str] = &[
    "Midnight", "River", "Empire", "Lost", "Garden", "Echo", "Silent", "Storm", "Paper", "Crown",
    "Shadow", "Harbor", "Last", "Summer", "Signal",
];

/// Write a synthetic catalog with realistic gaps and malformed cells.
#[derive(Debug, Parser)]
#[command(name = "generate-sample")]
struct Cli {
    /// Output file; `.csv` or `.parquet`
    #[arg(default_value = "sample_catalog.parquet")]
    output: PathBuf,

    /// Number of rows
    #[arg(short, long, default_value_t = 1000)]
    rows: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Serialize)]
struct SampleRow {
    show_id: String,
    #[serde(rename = "type")]
    content_type: &'static str,
    title: String,
    director: Option<String>,
    cast: Option<String>,
    country: Option<String>,
    date_added: Option<String>,
    release_year: i64,
    rating: Option<String>,
    duration: Option<String>,
    listed_in: String,
}

fn pick_many(rng: &mut StdRng, pool: &[&str], max: usize) -> String {
    let n = rng.gen_range(1..=max);
    pool.choose_multiple(rng, n).copied().collect::<Vec<_>>().join(", ")
}

/// `Some(value)` except for roughly `missing_pct` percent of calls.
fn mostly<T>(rng: &mut StdRng, missing_pct: u32, value: T) -> Option<T> {
    (rng.gen_range(0..100) >= missing_pct).then_some(value)
}

fn sample_row(rng: &mut StdRng, id: usize) -> SampleRow {
    let is_movie = rng.gen_bool(0.7);
    let release_year: i64 = rng.gen_range(1960..=2021);

    // Mostly added a few years after release; sometimes before (pre-release deals).
    let added_year = (release_year + rng.gen_range(-1..=8)).clamp(2008, 2021) as i32;
    let added = NaiveDate::from_ymd_opt(added_year, rng.gen_range(1..=12), rng.gen_range(1..=28));
    let date_added = added.map(|d| {
        if rng.gen_bool(0.01) {
            // Not in the expected textual format.
            format!("{}-{:02}-{:02}", d.year(), d.month(), d.day())
        } else {
            d.format("%B %-d, %Y").to_string()
        }
    });

    let duration = if is_movie {
        format!("{} min", rng.gen_range(60..=180))
    } else {
        match rng.gen_range(1..=5) {
            1 => "1 Season".to_string(),
            n => format!("{n} Seasons"),
        }
    };

    let title = format!(
        "{} {}",
        WORDS.choose(rng).copied().unwrap_or("Untitled"),
        WORDS.choose(rng).copied().unwrap_or("Story")
    );
    let director = DIRECTORS.choose(rng).map(|d| d.to_string());
    let cast = pick_many(rng, WORDS, 3);
    let country = pick_many(rng, COUNTRIES, 3);
    let rating = RATINGS.choose(rng).map(|r| r.to_string());

    SampleRow {
        show_id: format!("s{}", id + 1),
        content_type: if is_movie { "Movie" } else { "TV Show" },
        title,
        director: director.and_then(|d| mostly(rng, 30, d)),
        cast: mostly(rng, 10, cast),
        country: mostly(rng, 9, country),
        date_added: date_added.and_then(|d| mostly(rng, 1, d)),
        release_year,
        rating: rating.and_then(|r| mostly(rng, 1, r)),
        duration: mostly(rng, 1, duration),
        listed_in: pick_many(rng, GENRES, 3),
    }
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    fn strings<'a>(rows: &'a [SampleRow], f: impl Fn(&'a SampleRow) -> Option<&'a str>) -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("show_id", DataType::Utf8, false),
        Field::new("type", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("director", DataType::Utf8, true),
        Field::new("cast", DataType::Utf8, true),
        Field::new("country", DataType::Utf8, true),
        Field::new("date_added", DataType::Utf8, true),
        Field::new("release_year", DataType::Int64, false),
        Field::new("rating", DataType::Utf8, true),
        Field::new("duration", DataType::Utf8, true),
        Field::new("listed_in", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        strings(rows, |r| Some(r.show_id.as_str())),
        strings(rows, |r| Some(r.content_type)),
        strings(rows, |r| Some(r.title.as_str())),
        strings(rows, |r| r.director.as_deref()),
        strings(rows, |r| r.cast.as_deref()),
        strings(rows, |r| r.country.as_deref()),
        strings(rows, |r| r.date_added.as_deref()),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.release_year).collect::<Vec<_>>())),
        strings(rows, |r| r.rating.as_deref()),
        strings(rows, |r| r.duration.as_deref()),
        strings(rows, |r| Some(r.listed_in.as_str())),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let rows: Vec<SampleRow> = (0..cli.rows).map(|i| sample_row(&mut rng, i)).collect();

    let ext = cli
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&cli.output, &rows)?,
        "parquet" | "pq" => write_parquet(&cli.output, &rows)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    info!("seed {}", cli.seed);
    println!("Wrote {} catalog rows to {}", rows.len(), cli.output.display());
    Ok(())
}
