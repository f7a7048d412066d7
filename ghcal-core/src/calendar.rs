use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use crate::markup::{Tag, Token, Tokenizer};
use crate::{Day, GhcalError, YearScrape};

/// Tooltip prefix used by days without activity.
pub const NO_CONTRIBUTIONS: &str = "No contributions";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A grid cell: the day it describes plus the identifier its tooltip will reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// Correlation identifier (the cell's `id` attribute, empty if absent).
    pub id: String,
    /// The day, with its count not yet attached.
    pub day: Day,
}

impl DayCell {
    /// Extract a cell from a `<td data-date=...>` tag; other tags yield `None`.
    ///
    /// A missing `data-level` is read as level 0.
    ///
    /// # Errors
    /// Returns `GhcalError::Parse` on a malformed date or level value.
    pub fn from_tag(tag: &Tag) -> Result<Option<Self>, GhcalError> {
        if !tag.is("td") {
            return Ok(None);
        }
        let Some(raw_date) = tag.attr("data-date") else {
            return Ok(None);
        };
        let date = NaiveDate::parse_from_str(raw_date.trim(), DATE_FORMAT)
            .map_err(|e| GhcalError::parse(format!("day date {raw_date:?}: {e}")))?;
        let level = match tag.attr("data-level") {
            Some(raw) => raw
                .trim()
                .parse::<u8>()
                .map_err(|e| GhcalError::parse(format!("day level {raw:?}: {e}")))?,
            None => 0,
        };
        let id = tag.attr("id").unwrap_or_default().to_string();
        Ok(Some(Self {
            id,
            day: Day::new(date, level),
        }))
    }
}

/// Identifier referenced by a `<tool-tip for=...>` tag.
#[must_use]
pub fn tooltip_target(tag: &Tag) -> Option<&str> {
    if tag.is("tool-tip") {
        tag.attr("for")
    } else {
        None
    }
}

/// Parse a tooltip's text into a contribution count.
///
/// Text starting with [`NO_CONTRIBUTIONS`] is zero; otherwise the first
/// whitespace-separated field must be the count (`"5 contributions on ..."`).
///
/// # Errors
/// Returns `GhcalError::Parse` if the leading field is not a count.
pub fn parse_tooltip_count(text: &str) -> Result<u32, GhcalError> {
    let text = text.trim_start();
    if text.starts_with(NO_CONTRIBUTIONS) {
        return Ok(0);
    }
    let field = text.split_whitespace().next().unwrap_or_default();
    field
        .parse::<u32>()
        .map_err(|e| GhcalError::parse(format!("tooltip count {text:?}: {e}")))
}

/// Days of one page, addressable by their cell identifier.
///
/// Scoped to a single parse: cells are inserted as they stream past and
/// tooltips later attach counts through the identifier. Days are stored by
/// date, so a later cell for the same date replaces the earlier one.
#[derive(Debug, Default)]
pub struct DayArena {
    ids: HashMap<String, NaiveDate>,
    id_of: HashMap<NaiveDate, String>,
    days: BTreeMap<NaiveDate, Day>,
    counted: HashSet<NaiveDate>,
}

impl DayArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cell, count left at zero.
    ///
    /// A replaced cell's identifier is forgotten, so its tooltip can no
    /// longer reach the replacing day.
    pub fn insert(&mut self, cell: DayCell) {
        let date = cell.day.date;
        self.counted.remove(&date);
        if let Some(old_id) = self.id_of.remove(&date) {
            self.ids.remove(&old_id);
        }
        if let Some(prev_date) = self.ids.insert(cell.id.clone(), date)
            && prev_date != date
        {
            self.id_of.remove(&prev_date);
        }
        self.id_of.insert(date, cell.id);
        self.days.insert(date, cell.day);
    }

    /// True if a cell with this identifier has been seen.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Attach `count` to the day behind `id`. Returns false for an unknown identifier.
    pub fn attach_count(&mut self, id: &str, count: u32) -> bool {
        let Some(date) = self.ids.get(id).copied() else {
            return false;
        };
        let Some(day) = self.days.get_mut(&date) else {
            return false;
        };
        day.count = count;
        self.counted.insert(date);
        true
    }

    /// Number of distinct days stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// True if no cell was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Finish the page: days ascending by date, total derived from the counts.
    #[must_use]
    pub fn finish(self) -> YearScrape {
        let missing = self.days.len() - self.counted.len();
        YearScrape::new(self.days.into_values().collect(), missing)
    }
}

/// Parse one calendar page into a date-ordered day series and its total.
///
/// Tooltips for identifiers not seen yet are ignored, and days whose tooltip
/// never arrives keep a zero count (reported in `YearScrape::missing_counts`).
///
/// # Errors
/// Returns `GhcalError::Parse` on a tokenizer failure or on a malformed
/// date, level, or count.
pub fn parse_calendar_page(page: &[u8]) -> Result<YearScrape, GhcalError> {
    let mut tokens = Tokenizer::new(page);
    let mut arena = DayArena::new();

    while let Some(token) = tokens.next() {
        let Token::Start(tag) = token? else {
            continue;
        };
        if let Some(cell) = DayCell::from_tag(&tag)? {
            arena.insert(cell);
            continue;
        }
        let Some(target) = tooltip_target(&tag) else {
            continue;
        };
        if !arena.contains(target) {
            #[cfg(feature = "tracing")]
            tracing::trace!(target_id = %target, "tooltip for unknown cell ignored");
            continue;
        }
        if let Some(text) = tokens.next_text()? {
            let count = parse_tooltip_count(&text)?;
            arena.attach_count(target, count);
        }
    }

    Ok(arena.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cell_carries_date_level_and_id() {
        let tag = Tag::new(
            "td",
            [
                ("data-date", "2022-03-04"),
                ("id", "contribution-day-component-5-9"),
                ("data-level", "3"),
            ],
        );
        let cell = DayCell::from_tag(&tag).unwrap().unwrap();
        assert_eq!(cell.id, "contribution-day-component-5-9");
        assert_eq!(cell.day, Day::new(date(2022, 3, 4), 3));
    }

    #[test]
    fn non_cell_tags_are_not_cells() {
        assert!(DayCell::from_tag(&Tag::new("td", [("class", "label")])).unwrap().is_none());
        assert!(
            DayCell::from_tag(&Tag::new("div", [("data-date", "2022-01-01")]))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn malformed_date_or_level_is_a_parse_error() {
        let bad_date = Tag::new("td", [("data-date", "2022-13-01"), ("data-level", "1")]);
        assert!(matches!(DayCell::from_tag(&bad_date), Err(GhcalError::Parse(_))));
        let bad_level = Tag::new("td", [("data-date", "2022-01-01"), ("data-level", "high")]);
        assert!(matches!(DayCell::from_tag(&bad_level), Err(GhcalError::Parse(_))));
    }

    #[test]
    fn missing_level_reads_as_zero() {
        let tag = Tag::new("td", [("data-date", "2022-01-01"), ("id", "a")]);
        assert_eq!(DayCell::from_tag(&tag).unwrap().unwrap().day.level, 0);
    }

    #[test]
    fn tooltip_counts() {
        assert_eq!(parse_tooltip_count("5 contributions on 2022-01-01").unwrap(), 5);
        assert_eq!(parse_tooltip_count("1 contribution on January 3rd.").unwrap(), 1);
        assert_eq!(parse_tooltip_count("\n   12 contributions").unwrap(), 12);
        assert_eq!(parse_tooltip_count("No contributions on 2022-01-02").unwrap(), 0);
        assert!(matches!(
            parse_tooltip_count("Many contributions"),
            Err(GhcalError::Parse(_))
        ));
        assert!(matches!(parse_tooltip_count(""), Err(GhcalError::Parse(_))));
    }

    #[test]
    fn tooltip_target_only_for_tool_tips() {
        assert_eq!(tooltip_target(&Tag::new("tool-tip", [("for", "x")])), Some("x"));
        assert_eq!(tooltip_target(&Tag::new("span", [("for", "x")])), None);
        assert_eq!(tooltip_target(&Tag::new("tool-tip", [("id", "x")])), None);
    }

    #[test]
    fn arena_ignores_unknown_identifiers() {
        let mut arena = DayArena::new();
        arena.insert(DayCell {
            id: "a".into(),
            day: Day::new(date(2022, 1, 1), 1),
        });
        assert!(!arena.attach_count("b", 9));
        assert!(arena.attach_count("a", 4));
        let scrape = arena.finish();
        assert_eq!(scrape.total, 4);
        assert_eq!(scrape.days, vec![Day::new(date(2022, 1, 1), 1).with_count(4)]);
        assert_eq!(scrape.missing_counts, 0);
    }

    #[test]
    fn arena_keeps_one_day_per_date() {
        let mut arena = DayArena::new();
        arena.insert(DayCell {
            id: "a".into(),
            day: Day::new(date(2022, 1, 1), 1),
        });
        arena.attach_count("a", 3);
        arena.insert(DayCell {
            id: "b".into(),
            day: Day::new(date(2022, 1, 1), 2),
        });
        assert_eq!(arena.len(), 1);
        let scrape = arena.finish();
        assert_eq!(scrape.days, vec![Day::new(date(2022, 1, 1), 2)]);
        assert_eq!(scrape.missing_counts, 1);
    }

    #[test]
    fn replaced_cell_identifier_no_longer_attaches() {
        let mut arena = DayArena::new();
        arena.insert(DayCell {
            id: "a".into(),
            day: Day::new(date(2022, 1, 1), 1),
        });
        arena.insert(DayCell {
            id: "b".into(),
            day: Day::new(date(2022, 1, 1), 2),
        });
        assert!(!arena.contains("a"));
        assert!(!arena.attach_count("a", 9));
        assert!(arena.attach_count("b", 4));
        let scrape = arena.finish();
        assert_eq!(scrape.days, vec![Day::new(date(2022, 1, 1), 2).with_count(4)]);
        assert_eq!(scrape.missing_counts, 0);
    }

    #[test]
    fn stale_tooltip_on_page_leaves_replacing_day_uncounted() {
        let page = br#"
            <td data-date="2022-01-01" id="old" data-level="1"></td>
            <td data-date="2022-01-01" id="new" data-level="3"></td>
            <tool-tip for="old">8 contributions</tool-tip>
        "#;
        let scrape = parse_calendar_page(page).unwrap();
        assert_eq!(scrape.total, 0);
        assert_eq!(scrape.days, vec![Day::new(date(2022, 1, 1), 3)]);
        assert_eq!(scrape.missing_counts, 1);
    }

    #[test]
    fn tooltip_without_leading_text_is_skipped() {
        let page = br#"
            <td data-date="2022-01-01" id="d0" data-level="2"></td>
            <tool-tip for="d0"><span>5</span></tool-tip>
        "#;
        let scrape = parse_calendar_page(page).unwrap();
        assert_eq!(scrape.total, 0);
        assert_eq!(scrape.days, vec![Day::new(date(2022, 1, 1), 2)]);
        assert_eq!(scrape.missing_counts, 1);
    }

    #[test]
    fn page_correlates_tooltips_with_cells() {
        let page = br#"
            <table><tbody><tr>
              <td data-date="2022-01-02" id="day-1" data-level="0" class="ContributionCalendar-day"></td>
              <td data-date="2022-01-01" id="day-0" data-level="2" class="ContributionCalendar-day"></td>
              <td data-date="2022-01-03" id="day-2" data-level="1" class="ContributionCalendar-day"></td>
            </tr></tbody></table>
            <tool-tip for="day-0" class="sr-only">5 contributions on 2022-01-01</tool-tip>
            <tool-tip for="day-1" class="sr-only">No contributions on 2022-01-02</tool-tip>
            <tool-tip for="day-9" class="sr-only">7 contributions on 2099-01-01</tool-tip>
        "#;
        let scrape = parse_calendar_page(page).unwrap();
        assert_eq!(scrape.total, 5);
        assert_eq!(
            scrape.days,
            vec![
                Day::new(date(2022, 1, 1), 2).with_count(5),
                Day::new(date(2022, 1, 2), 0),
                Day::new(date(2022, 1, 3), 1),
            ]
        );
        assert_eq!(scrape.missing_counts, 1);
    }

    #[test]
    fn tooltip_before_its_cell_is_ignored() {
        let page = br#"
            <tool-tip for="day-0">3 contributions</tool-tip>
            <td data-date="2022-01-01" id="day-0" data-level="1"></td>
        "#;
        let scrape = parse_calendar_page(page).unwrap();
        assert_eq!(scrape.total, 0);
        assert_eq!(scrape.days[0].count, 0);
    }

    #[test]
    fn malformed_count_fails_the_page() {
        let page = br#"
            <td data-date="2022-01-01" id="day-0" data-level="1"></td>
            <tool-tip for="day-0">lots of contributions</tool-tip>
        "#;
        assert!(matches!(parse_calendar_page(page), Err(GhcalError::Parse(_))));
    }

    #[test]
    fn empty_page_yields_empty_series() {
        let scrape = parse_calendar_page(b"").unwrap();
        assert_eq!(scrape, YearScrape::default());
    }
}
