//! Which slice of the calendar a scrape targets, and the label it is reported under.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::GhcalError;

/// A calendar request: one specific year or the rolling trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CalendarWindow {
    /// A specific calendar year.
    ///
    /// The upstream query for this window only spans December 1-31 of the
    /// year; see `ghcal-github` for the request shape.
    Year(i32),
    /// The rolling most-recent-365-days view.
    Trailing,
}

impl CalendarWindow {
    /// Label used to key this window's results in a report.
    #[must_use]
    pub const fn label(self) -> YearLabel {
        match self {
            Self::Year(y) => YearLabel::Year(y),
            Self::Trailing => YearLabel::LastYear,
        }
    }
}

/// Key of the report maps: a four-digit year or the trailing-window literal.
///
/// Serializes as a plain string (`"2022"`, `"last_year"`) so it can be used as
/// a JSON object key. Years sort before the trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum YearLabel {
    /// A specific calendar year.
    Year(i32),
    /// The trailing 365-day window.
    LastYear,
}

impl YearLabel {
    /// Literal used for the trailing window.
    pub const LAST_YEAR: &'static str = "last_year";
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(y) => write!(f, "{y}"),
            Self::LastYear => f.write_str(Self::LAST_YEAR),
        }
    }
}

impl FromStr for YearLabel {
    type Err = GhcalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::LAST_YEAR {
            return Ok(Self::LastYear);
        }
        s.parse::<i32>()
            .map(Self::Year)
            .map_err(|e| GhcalError::parse(format!("year label {s:?}: {e}")))
    }
}

impl Serialize for YearLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_render_and_parse() {
        assert_eq!(YearLabel::Year(2022).to_string(), "2022");
        assert_eq!(YearLabel::LastYear.to_string(), "last_year");
        assert_eq!("2021".parse::<YearLabel>().unwrap(), YearLabel::Year(2021));
        assert_eq!(
            "last_year".parse::<YearLabel>().unwrap(),
            YearLabel::LastYear
        );
        assert!(matches!(
            "lastyear".parse::<YearLabel>(),
            Err(GhcalError::Parse(_))
        ));
    }

    #[test]
    fn years_sort_before_trailing_window() {
        let mut labels = vec![YearLabel::LastYear, YearLabel::Year(2022), YearLabel::Year(2019)];
        labels.sort();
        assert_eq!(
            labels,
            vec![YearLabel::Year(2019), YearLabel::Year(2022), YearLabel::LastYear]
        );
    }

    #[test]
    fn window_labels() {
        assert_eq!(CalendarWindow::Year(2020).label(), YearLabel::Year(2020));
        assert_eq!(CalendarWindow::Trailing.label(), YearLabel::LastYear);
    }
}
