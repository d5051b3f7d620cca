use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Textual date format of `date_added`, e.g. `"September 9, 2021"`.
pub const DATE_ADDED_FORMAT: &str = "%B %d, %Y";

static MINUTES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*min").expect("duration regex is valid"));

/// Year the title was added to the catalog, or `None` if the date does not
/// follow [`DATE_ADDED_FORMAT`].
pub fn parse_year_added(date_added: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date_added.trim(), DATE_ADDED_FORMAT)
        .ok()
        .map(|d| d.year())
}

/// `year_added - release_year`; undefined if either side is, or if the
/// difference does not fit in an `i32`.
pub fn years_difference(year_added: Option<i32>, release_year: Option<i32>) -> Option<i32> {
    year_added?.checked_sub(release_year?)
}

/// Runtime in minutes for durations like `"90 min"`.
///
/// Season counts (`"2 Seasons"`) are not minutes and yield `None`.
pub fn parse_duration_minutes(duration: &str) -> Option<f64> {
    MINUTES_RE
        .captures(duration.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .map(f64::from)
}

/// Integer release year; tolerates a float spelling such as `"2019.0"`.
pub fn parse_release_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(y) = raw.parse::<i32>() {
        return Some(y);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f.abs() < i32::MAX as f64 => Some(f as i32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_added() {
        assert_eq!(parse_year_added("September 9, 2021"), Some(2021));
        assert_eq!(parse_year_added(" August 4, 2017"), Some(2017));
        assert_eq!(parse_year_added("2021-09-09"), None);
        assert_eq!(parse_year_added("Someday"), None);
    }

    #[test]
    fn test_years_difference() {
        assert_eq!(years_difference(Some(2021), Some(2015)), Some(6));
        assert_eq!(years_difference(Some(2019), Some(2020)), Some(-1));
        assert_eq!(years_difference(None, Some(2015)), None);
        assert_eq!(years_difference(Some(2021), None), None);
    }

    #[test]
    fn test_years_difference_extreme_release_year() {
        let release = parse_release_year("-2147483000");
        assert_eq!(release, Some(-2_147_483_000));
        assert_eq!(years_difference(Some(2020), release), None);
        assert_eq!(years_difference(Some(i32::MIN), Some(1)), None);
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(parse_duration_minutes("90 min"), Some(90.0));
        assert_eq!(parse_duration_minutes("125min"), Some(125.0));
        assert_eq!(parse_duration_minutes("2 Seasons"), None);
        assert_eq!(parse_duration_minutes("1 Season"), None);
        assert_eq!(parse_duration_minutes("min"), None);
    }

    #[test]
    fn test_release_year() {
        assert_eq!(parse_release_year("2015"), Some(2015));
        assert_eq!(parse_release_year("2015.0"), Some(2015));
        assert_eq!(parse_release_year("20x5"), None);
    }
}
