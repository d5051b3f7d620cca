use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use crate::analysis::{
    grouped_counts, grouped_summaries, top_k, top_k_keys, AxisOrder, CrossTab, Statistic, Summary,
};
use crate::config::AnalysisConfig;
use crate::data::expand::{expand, expand_pair};
use crate::data::filter::RecordFilter;
use crate::data::model::{Catalog, ContentType, LoadReport, MultiValued, Record, UNKNOWN};

/// Number of countries offered for selection.
pub const COUNTRY_OPTIONS: usize = 30;
/// Countries used by the duration section when none are selected.
pub const DURATION_FALLBACK_COUNTRIES: usize = 20;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Every aggregate view of one analysis run, ready for a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub load: LoadReport,
    pub overview: Overview,
    pub options: Options,
    /// `None` when no country is selected.
    pub genres_by_country: Option<GenresByCountry>,
    pub genres_by_rating: GenresByRating,
    pub creators_by_year: CreatorsByYear,
    pub creators_by_rating: CreatorsByRating,
    pub duration_by_country: DurationByCountry,
    pub release_lag: ReleaseLag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub titles: usize,
    pub movies: usize,
    pub tv_shows: usize,
    pub countries: usize,
}

/// Values a caller can pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Options {
    /// Most frequent countries in the whole catalog.
    pub countries: Vec<String>,
    /// Distinct ratings in the base subset, sorted.
    pub ratings: Vec<String>,
    /// Distinct release years in the whole catalog, sorted.
    pub release_years: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenresByCountry {
    pub top_genres: Vec<String>,
    /// Countries × genres.
    pub matrix: CrossTab,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingGenreCount {
    pub rating: String,
    pub genre: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenresByRating {
    pub top_genres: Vec<String>,
    pub counts: Vec<RatingGenreCount>,
    /// Ratings × genres.
    pub matrix: CrossTab,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub release_year: i32,
    pub director: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatorsByYear {
    pub ranking: Vec<Ranked>,
    pub by_year: Vec<YearCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorRatingCount {
    pub director: String,
    pub rating: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatorsByRating {
    /// Directors by total titles, largest first. Shared by `counts` and
    /// `matrix`.
    pub order: Vec<String>,
    pub counts: Vec<DirectorRatingCount>,
    /// Directors × ratings; only ratings with at least one title.
    pub matrix: CrossTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountrySource {
    Selected,
    MostFrequent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryDuration {
    pub country: String,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationByCountry {
    pub statistic: Statistic,
    pub source: CountrySource,
    /// Ascending by `statistic`.
    pub rows: Vec<CountryDuration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LagBin {
    pub content_type: ContentType,
    pub years: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeLag {
    pub content_type: ContentType,
    #[serde(flatten)]
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagTrend {
    pub year_added: i32,
    pub content_type: ContentType,
    pub mean_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReleaseLag {
    pub window: (i32, i32),
    pub histogram: Vec<LagBin>,
    pub by_type: Vec<TypeLag>,
    pub by_year_added: Vec<LagTrend>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Run every section over the catalog.
///
/// Sections work on the base subset (content type and release year
/// predicates); countries and ratings are applied per section.
pub fn build_report(catalog: &Catalog, config: &AnalysisConfig) -> Report {
    let base = config.base_filter().apply(&catalog.records);
    debug!("base subset: {} of {} records", base.len(), catalog.len());

    Report {
        load: catalog.report.clone(),
        overview: overview(&base),
        options: options(catalog, &base),
        genres_by_country: genres_by_country(&base, &config.countries, config.top_genres),
        genres_by_rating: genres_by_rating(&base, &config.ratings, config.top_genres),
        creators_by_year: creators_by_year(&base, config.top_creators),
        creators_by_rating: creators_by_rating(&base, config.top_creators),
        duration_by_country: duration_by_country(&base, &config.countries, config.duration_statistic),
        release_lag: release_lag(&base, config.lag_window),
    }
}

pub fn overview(base: &[&Record]) -> Overview {
    let movies = base.iter().filter(|r| r.is_movie()).count();
    let countries: BTreeSet<&str> = expand(base.iter().copied(), MultiValued::Country)
        .into_iter()
        .map(|row| row.value)
        .collect();
    Overview {
        titles: base.len(),
        movies,
        tv_shows: base.len() - movies,
        countries: countries.len(),
    }
}

pub fn options(catalog: &Catalog, base: &[&Record]) -> Options {
    let countries = top_k_keys(
        expand(&catalog.records, MultiValued::Country)
            .into_iter()
            .map(|row| row.value),
        COUNTRY_OPTIONS,
    );
    let ratings: BTreeSet<&str> = base.iter().map(|r| r.rating.as_str()).collect();
    Options {
        countries: countries.into_iter().map(String::from).collect(),
        ratings: ratings.into_iter().map(String::from).collect(),
        release_years: catalog.release_years().into_iter().collect(),
    }
}

/// Genre concentration per selected country.
pub fn genres_by_country(
    base: &[&Record],
    countries: &BTreeSet<String>,
    top: usize,
) -> Option<GenresByCountry> {
    if countries.is_empty() {
        return None;
    }
    let filter = RecordFilter::default().with_countries(countries.iter().cloned());
    let pairs: Vec<(&str, &str)> = expand_pair(base.iter().copied(), MultiValued::Country, MultiValued::Genre)
        .into_iter()
        .filter(|row| filter.matches_country(row.first))
        .map(|row| (row.first, row.second))
        .collect();

    let top_genres: Vec<String> = top_k_keys(pairs.iter().map(|&(_, genre)| genre), top)
        .into_iter()
        .map(String::from)
        .collect();
    let matrix = CrossTab::from_pairs(pairs, AxisOrder::Sorted, AxisOrder::Given(&top_genres));
    debug!(
        "genres by country: {} countries x {} genres",
        matrix.rows.len(),
        matrix.columns.len()
    );
    Some(GenresByCountry { top_genres, matrix })
}

/// Top genres split by audience rating.
pub fn genres_by_rating(base: &[&Record], ratings: &BTreeSet<String>, top: usize) -> GenresByRating {
    let rows = expand(base.iter().copied(), MultiValued::Genre);
    let top_genres: Vec<String> = top_k_keys(rows.iter().map(|row| row.value), top)
        .into_iter()
        .map(String::from)
        .collect();

    let filter = RecordFilter::default().with_ratings(ratings.iter().cloned());
    let pairs = filter
        .apply_expanded(&rows)
        .into_iter()
        .map(|row| (row.record.rating.as_str(), row.value));
    let matrix = CrossTab::from_pairs(pairs, AxisOrder::Sorted, AxisOrder::Given(&top_genres));

    let counts = matrix
        .nonzero_cells()
        .map(|(rating, genre, count)| RatingGenreCount {
            rating: rating.to_string(),
            genre: genre.to_string(),
            count,
        })
        .collect();
    GenresByRating {
        top_genres,
        counts,
        matrix,
    }
}

/// Records with a known director.
fn credited<'a>(base: &[&'a Record]) -> Vec<&'a Record> {
    base.iter().copied().filter(|r| r.director != UNKNOWN).collect()
}

/// Most prolific directors and their titles per release year.
pub fn creators_by_year(base: &[&Record], top: usize) -> CreatorsByYear {
    let credited = credited(base);
    let ranking = top_k(credited.iter().map(|r| r.director.as_str()), top);
    let names: BTreeSet<&str> = ranking.iter().map(|&(name, _)| name).collect();

    let by_year = grouped_counts(
        credited
            .iter()
            .filter(|r| names.contains(r.director.as_str()))
            .filter_map(|r| Some((r.release_year?, r.director.as_str()))),
    )
    .into_iter()
    .map(|((release_year, director), count)| YearCount {
        release_year,
        director: director.to_string(),
        count,
    })
    .collect();

    CreatorsByYear {
        ranking: ranking
            .into_iter()
            .map(|(name, count)| Ranked {
                name: name.to_string(),
                count,
            })
            .collect(),
        by_year,
    }
}

/// Rating mix of the most prolific directors.
pub fn creators_by_rating(base: &[&Record], top: usize) -> CreatorsByRating {
    let credited = credited(base);
    let directors: Vec<String> = top_k_keys(credited.iter().map(|r| r.director.as_str()), top)
        .into_iter()
        .map(String::from)
        .collect();

    let pairs = credited
        .iter()
        .map(|r| (r.director.as_str(), r.rating.as_str()));
    let matrix = CrossTab::from_pairs(pairs, AxisOrder::Given(&directors), AxisOrder::Sorted)
        .drop_empty_columns();
    let order = matrix.order_by_total_desc();
    let matrix = matrix.reorder_rows(&order);

    let counts = matrix
        .nonzero_cells()
        .map(|(director, rating, count)| DirectorRatingCount {
            director: director.to_string(),
            rating: rating.to_string(),
            count,
        })
        .collect();
    CreatorsByRating {
        order,
        counts,
        matrix,
    }
}

/// Movie runtime per country.
///
/// With no countries selected, falls back to the most frequent countries
/// among the movies being measured.
pub fn duration_by_country(
    base: &[&Record],
    countries: &BTreeSet<String>,
    statistic: Statistic,
) -> DurationByCountry {
    let movies = base
        .iter()
        .copied()
        .filter(|r| r.is_movie() && r.duration_minutes.is_some());
    let rows = expand(movies, MultiValued::Country);

    let (filter, source) = if countries.is_empty() {
        let fallback = top_k_keys(rows.iter().map(|row| row.value), DURATION_FALLBACK_COUNTRIES);
        (
            RecordFilter::default().with_countries(fallback),
            CountrySource::MostFrequent,
        )
    } else {
        (
            RecordFilter::default().with_countries(countries.iter().cloned()),
            CountrySource::Selected,
        )
    };

    let selected = filter.apply_expanded(&rows);
    let mut rows: Vec<CountryDuration> = grouped_summaries(
        selected
            .iter()
            .filter_map(|row| Some((row.value, row.record.duration_minutes?))),
    )
    .into_iter()
    .map(|(country, summary)| CountryDuration {
        country: country.to_string(),
        summary,
    })
    .collect();
    rows.sort_by(|a, b| {
        a.summary
            .statistic(statistic)
            .total_cmp(&b.summary.statistic(statistic))
    });

    DurationByCountry {
        statistic,
        source,
        rows,
    }
}

/// Years between release and catalog addition.
///
/// Only records with a defined lag inside `window` take part.
pub fn release_lag(base: &[&Record], window: (i32, i32)) -> ReleaseLag {
    let lagged: Vec<(&Record, i32)> = base
        .iter()
        .filter_map(|r| r.years_difference.map(|d| (*r, d)))
        .filter(|&(_, d)| (window.0..=window.1).contains(&d))
        .collect();

    let histogram = grouped_counts(lagged.iter().map(|&(r, d)| (r.content_type, d)))
        .into_iter()
        .map(|((content_type, years), count)| LagBin {
            content_type,
            years,
            count,
        })
        .collect();

    let by_type = grouped_summaries(lagged.iter().map(|&(r, d)| (r.content_type, f64::from(d))))
        .into_iter()
        .map(|(content_type, summary)| TypeLag {
            content_type,
            summary,
        })
        .collect();

    let by_year_added = grouped_summaries(
        lagged
            .iter()
            .filter_map(|&(r, d)| Some(((r.year_added?, r.content_type), f64::from(d)))),
    )
    .into_iter()
    .map(|((year_added, content_type), summary)| LagTrend {
        year_added,
        content_type,
        mean_years: summary.mean,
    })
    .collect();

    ReleaseLag {
        window,
        histogram,
        by_type,
        by_year_added,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testing::RecordBuilder;

    fn refs(records: &[Record]) -> Vec<&Record> {
        records.iter().collect()
    }

    fn set(xs: &[&str]) -> BTreeSet<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_overview_counts_distinct_countries() {
        let records = vec![
            RecordBuilder::movie().country("US, India").build(),
            RecordBuilder::show().country("India").build(),
        ];
        let o = overview(&refs(&records));
        assert_eq!(o, Overview { titles: 2, movies: 1, tv_shows: 1, countries: 2 });
    }

    #[test]
    fn test_genres_by_country_totals_match_rows() {
        let records = vec![
            RecordBuilder::movie().country("US, India").genres("Dramas, Comedies").build(),
            RecordBuilder::movie().country("India").genres("Dramas").build(),
            RecordBuilder::movie().country("Japan").genres("Anime").build(),
        ];
        let base = refs(&records);
        let section = genres_by_country(&base, &set(&["India", "US"]), 10).unwrap();

        // 2x2 pairs from the first record + 1 from the second
        assert_eq!(section.matrix.total(), 5);
        assert_eq!(section.top_genres, vec!["Dramas", "Comedies"]);
        assert_eq!(section.matrix.rows, vec!["India", "US"]);
        assert_eq!(section.matrix.get("India", "Dramas"), Some(2));

        assert!(genres_by_country(&base, &BTreeSet::new(), 10).is_none());
    }

    #[test]
    fn test_genres_by_rating_limits_to_top_genres() {
        let records = vec![
            RecordBuilder::movie().rating("PG").genres("Dramas, Comedies").build(),
            RecordBuilder::movie().rating("R").genres("Dramas").build(),
            RecordBuilder::movie().rating("R").genres("Horror").build(),
        ];
        let base = refs(&records);
        let all = genres_by_rating(&base, &BTreeSet::new(), 2);
        assert_eq!(all.top_genres, vec!["Dramas", "Comedies"]);
        assert_eq!(all.matrix.total(), 3);

        let r_only = genres_by_rating(&base, &set(&["R"]), 2);
        assert_eq!(
            r_only.counts,
            vec![RatingGenreCount { rating: "R".into(), genre: "Dramas".into(), count: 1 }]
        );
    }

    #[test]
    fn test_creators_skip_unknown() {
        let records = vec![
            RecordBuilder::movie().director(UNKNOWN).build(),
            RecordBuilder::movie().director(UNKNOWN).build(),
            RecordBuilder::movie().director("Ava").release_year(Some(2019)).build(),
            RecordBuilder::movie().director("Ava").release_year(Some(2020)).rating("PG").build(),
            RecordBuilder::movie().director("Ben").release_year(Some(2020)).build(),
        ];
        let base = refs(&records);

        let by_year = creators_by_year(&base, 5);
        assert_eq!(by_year.ranking[0], Ranked { name: "Ava".into(), count: 2 });
        assert_eq!(by_year.ranking.len(), 2);
        assert_eq!(by_year.by_year.len(), 3);

        let by_rating = creators_by_rating(&base, 5);
        assert_eq!(by_rating.order, vec!["Ava", "Ben"]);
        assert_eq!(by_rating.matrix.rows, by_rating.order);
        assert_eq!(by_rating.matrix.columns, vec!["PG", "TV-MA"]);
        assert_eq!(by_rating.matrix.total(), 3);
    }

    #[test]
    fn test_duration_single_movie_group() {
        let records = vec![
            RecordBuilder::movie().country("Peru").minutes(101.0).build(),
            RecordBuilder::show().country("Peru").build(),
        ];
        let section = duration_by_country(&refs(&records), &BTreeSet::new(), Statistic::Mean);
        assert_eq!(section.source, CountrySource::MostFrequent);
        assert_eq!(section.rows.len(), 1);
        let peru = &section.rows[0].summary;
        assert_eq!(peru.count, 1);
        assert_eq!(peru.mean, 101.0);
        assert_eq!(peru.std_dev, None);
    }

    #[test]
    fn test_duration_sorted_by_statistic() {
        let records = vec![
            RecordBuilder::movie().country("A").minutes(100.0).build(),
            RecordBuilder::movie().country("A").minutes(200.0).build(),
            RecordBuilder::movie().country("A").minutes(210.0).build(),
            RecordBuilder::movie().country("B").minutes(180.0).build(),
            RecordBuilder::movie().country("C").minutes(90.0).build(),
        ];
        let base = refs(&records);
        let by_mean = duration_by_country(&base, &set(&["A", "B"]), Statistic::Mean);
        assert_eq!(by_mean.source, CountrySource::Selected);
        let order: Vec<&str> = by_mean.rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);

        let by_median = duration_by_country(&base, &set(&["A", "B"]), Statistic::Median);
        let order: Vec<&str> = by_median.rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(order, vec!["B", "A"]);
    }

    #[test]
    fn test_release_lag_excludes_undefined_and_out_of_window() {
        let records = vec![
            RecordBuilder::movie().release_year(Some(2015)).year_added(Some(2021)).build(),
            RecordBuilder::movie().release_year(Some(1950)).year_added(Some(2021)).build(),
            RecordBuilder::show().release_year(Some(2020)).year_added(None).build(),
        ];
        let base = refs(&records);
        let lag = release_lag(&base, (-2, 30));
        assert_eq!(
            lag.histogram,
            vec![LagBin { content_type: ContentType::Movie, years: 6, count: 1 }]
        );
        assert_eq!(lag.by_type.len(), 1);
        assert_eq!(lag.by_type[0].summary.mean, 6.0);
        assert_eq!(lag.by_year_added[0].year_added, 2021);

        // the undated show still counts elsewhere
        assert_eq!(overview(&base).tv_shows, 1);
    }
}
