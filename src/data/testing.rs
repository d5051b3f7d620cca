//! Record fixtures for unit tests.

use super::derive::years_difference;
use super::model::{ContentType, Record};

pub(crate) struct RecordBuilder(Record);

impl RecordBuilder {
    fn new(content_type: ContentType, duration: &str, minutes: Option<f64>) -> Self {
        RecordBuilder(Record {
            index: 0,
            content_type,
            title: "Untitled".into(),
            director: "Director".into(),
            cast: "Cast".into(),
            country: "United States".into(),
            date_added: "January 1, 2021".into(),
            release_year: Some(2020),
            rating: "TV-MA".into(),
            duration: duration.into(),
            listed_in: "Dramas".into(),
            year_added: Some(2021),
            years_difference: Some(1),
            duration_minutes: minutes,
        })
    }

    pub fn movie() -> Self {
        Self::new(ContentType::Movie, "90 min", Some(90.0))
    }

    pub fn show() -> Self {
        Self::new(ContentType::TvShow, "1 Season", None)
    }

    pub fn title(mut self, title: &str) -> Self {
        self.0.title = title.into();
        self
    }

    pub fn director(mut self, director: &str) -> Self {
        self.0.director = director.into();
        self
    }

    pub fn country(mut self, country: &str) -> Self {
        self.0.country = country.into();
        self
    }

    pub fn genres(mut self, genres: &str) -> Self {
        self.0.listed_in = genres.into();
        self
    }

    pub fn rating(mut self, rating: &str) -> Self {
        self.0.rating = rating.into();
        self
    }

    pub fn release_year(mut self, year: Option<i32>) -> Self {
        self.0.release_year = year;
        self
    }

    pub fn year_added(mut self, year: Option<i32>) -> Self {
        self.0.year_added = year;
        self
    }

    pub fn minutes(mut self, minutes: f64) -> Self {
        self.0.duration = format!("{minutes} min");
        self.0.duration_minutes = Some(minutes);
        self
    }

    pub fn build(mut self) -> Record {
        self.0.years_difference = years_difference(self.0.year_added, self.0.release_year);
        self.0
    }
}
