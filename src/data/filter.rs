use std::borrow::Borrow;
use std::collections::BTreeSet;

use super::expand::{split_tokens, ExpandedRow};
use super::model::{ContentType, MultiValued, Record};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per dimension
// ---------------------------------------------------------------------------

/// Conjunction of per-dimension predicates.
///
/// Dimensions are ANDed; within a dimension a row passes when its value is
/// one of the selected ones. An empty selection (or no year range) places no
/// restriction on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub content_types: BTreeSet<ContentType>,
    /// Inclusive `(min, max)` release-year bounds.
    pub release_years: Option<(i32, i32)>,
    pub countries: BTreeSet<String>,
    pub ratings: BTreeSet<String>,
}

/// Membership test where an empty selection means "everything".
fn selected<T, Q>(selection: &BTreeSet<T>, value: &Q) -> bool
where
    T: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    selection.is_empty() || selection.contains(value)
}

impl RecordFilter {
    pub fn with_content_types(mut self, types: impl IntoIterator<Item = ContentType>) -> Self {
        self.content_types = types.into_iter().collect();
        self
    }

    pub fn with_release_years(mut self, min: i32, max: i32) -> Self {
        self.release_years = Some((min, max));
        self
    }

    pub fn with_countries<S: Into<String>>(mut self, countries: impl IntoIterator<Item = S>) -> Self {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ratings<S: Into<String>>(mut self, ratings: impl IntoIterator<Item = S>) -> Self {
        self.ratings = ratings.into_iter().map(Into::into).collect();
        self
    }

    /// Whether every dimension is unrestricted.
    pub fn is_unrestricted(&self) -> bool {
        self.content_types.is_empty()
            && self.release_years.is_none()
            && self.countries.is_empty()
            && self.ratings.is_empty()
    }

    pub fn matches_country(&self, country: &str) -> bool {
        selected(&self.countries, country)
    }

    pub fn matches_rating(&self, rating: &str) -> bool {
        selected(&self.ratings, rating)
    }

    fn matches_release_year(&self, year: Option<i32>) -> bool {
        match (self.release_years, year) {
            (None, _) => true,
            (Some((min, max)), Some(y)) => (min..=max).contains(&y),
            // An undefined year can't satisfy an active range.
            (Some(_), None) => false,
        }
    }

    /// Predicates that only look at scalar record fields.
    fn matches_scalars(&self, record: &Record) -> bool {
        selected(&self.content_types, &record.content_type)
            && self.matches_release_year(record.release_year)
            && self.matches_rating(&record.rating)
    }

    /// A record passes the country predicate when any of its countries is
    /// selected.
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_scalars(record)
            && (self.countries.is_empty()
                || split_tokens(&record.country).any(|c| self.countries.contains(c)))
    }

    /// Like [`matches`](Self::matches), but a country-expanded row is judged
    /// on its own country token.
    pub fn matches_expanded(&self, row: &ExpandedRow<'_>) -> bool {
        match row.field {
            MultiValued::Country => {
                self.matches_scalars(row.record) && self.matches_country(row.value)
            }
            MultiValued::Genre => self.matches(row.record),
        }
    }

    /// Return the records that pass every predicate, in input order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    pub fn apply_expanded<'a>(&self, rows: &[ExpandedRow<'a>]) -> Vec<ExpandedRow<'a>> {
        rows.iter()
            .filter(|row| self.matches_expanded(row))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::expand::expand;
    use crate::data::testing::RecordBuilder;

    #[test]
    fn test_empty_filter_keeps_everything() {
        let records = vec![
            RecordBuilder::movie().build(),
            RecordBuilder::show().release_year(None).build(),
        ];
        let filter = RecordFilter::default();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(&records).len(), 2);
    }

    #[test]
    fn test_type_and_year_range() {
        let records = vec![
            RecordBuilder::movie().title("movie").release_year(Some(2000)).build(),
            RecordBuilder::show().title("show").release_year(Some(2000)).build(),
        ];
        let filter = RecordFilter::default()
            .with_content_types([ContentType::Movie])
            .with_release_years(2000, 2000);
        let kept = filter.apply(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "movie");
    }

    #[test]
    fn test_year_range_is_inclusive_and_excludes_undefined() {
        let records = vec![
            RecordBuilder::movie().release_year(Some(1999)).build(),
            RecordBuilder::movie().release_year(Some(2000)).build(),
            RecordBuilder::movie().release_year(Some(2005)).build(),
            RecordBuilder::movie().release_year(Some(2006)).build(),
            RecordBuilder::movie().release_year(None).build(),
        ];
        let filter = RecordFilter::default().with_release_years(2000, 2005);
        let years: Vec<Option<i32>> = filter.apply(&records).iter().map(|r| r.release_year).collect();
        assert_eq!(years, vec![Some(2000), Some(2005)]);
    }

    #[test]
    fn test_country_membership_on_records_and_rows() {
        let records = vec![
            RecordBuilder::movie().country("France, Belgium").build(),
            RecordBuilder::movie().country("Japan").build(),
        ];
        let filter = RecordFilter::default().with_countries(["Belgium"]);
        assert_eq!(filter.apply(&records).len(), 1);

        let rows = expand(&records, MultiValued::Country);
        let kept = filter.apply_expanded(&rows);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].value, "Belgium");
    }

    #[test]
    fn test_rating_membership() {
        let records = vec![
            RecordBuilder::movie().rating("PG").build(),
            RecordBuilder::movie().rating("R").build(),
            RecordBuilder::movie().rating("TV-MA").build(),
        ];
        let filter = RecordFilter::default().with_ratings(["PG", "TV-MA"]);
        let ratings: Vec<&str> = filter.apply(&records).iter().map(|r| r.rating.as_str()).collect();
        assert_eq!(ratings, vec!["PG", "TV-MA"]);
    }
}
