use std::fmt::Write as _;

use chrono::NaiveDate;

/// One calendar cell to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellFixture {
    /// Cell date.
    pub date: NaiveDate,
    /// Intensity bucket written to `data-level`.
    pub level: u8,
    /// Tooltip count; `None` renders the cell without a tooltip.
    pub count: Option<u32>,
}

impl CellFixture {
    /// Cell with a tooltip carrying `count`.
    #[must_use]
    pub const fn new(date: NaiveDate, level: u8, count: u32) -> Self {
        Self {
            date,
            level,
            count: Some(count),
        }
    }

    /// Cell whose tooltip is missing from the page.
    #[must_use]
    pub const fn without_tooltip(date: NaiveDate, level: u8) -> Self {
        Self {
            date,
            level,
            count: None,
        }
    }
}

/// Contributions tab listing `years` as year links, in the given order.
#[must_use]
pub fn years_page(years: &[i32]) -> String {
    let mut out = String::from(
        "<html><body><div class=\"js-profile-timeline-year-list\"><ul class=\"filter-list small\">",
    );
    for y in years {
        let _ = write!(
            out,
            "<li><a class=\"js-year-link filter-item px-3 mb-2 py-2\" href=\"#year-link-{y}\">\n  {y}\n</a></li>"
        );
    }
    out.push_str("</ul></div></body></html>");
    out
}

fn tooltip_text(cell: &CellFixture, count: u32) -> String {
    let date = cell.date.format("%B %-d");
    match count {
        0 => format!("No contributions on {date}."),
        1 => format!("1 contribution on {date}."),
        n => format!("{n} contributions on {date}."),
    }
}

/// Calendar grid for `cells`.
///
/// Cells are emitted in order and all tooltips follow the table, the way
/// the upstream fragment lays them out.
#[must_use]
pub fn calendar_page(cells: &[CellFixture]) -> String {
    let mut out = String::from(
        "<div class=\"js-calendar-graph\"><table class=\"ContributionCalendar-grid\"><tbody><tr>",
    );
    for (i, cell) in cells.iter().enumerate() {
        let _ = write!(
            out,
            "<td tabindex=\"0\" data-ix=\"{i}\" aria-selected=\"false\" data-date=\"{}\" id=\"contribution-day-component-{i}\" data-level=\"{}\" role=\"gridcell\" class=\"ContributionCalendar-day\"></td>",
            cell.date.format("%Y-%m-%d"),
            cell.level,
        );
    }
    out.push_str("</tr></tbody></table>");
    for (i, cell) in cells.iter().enumerate() {
        if let Some(count) = cell.count {
            let _ = write!(
                out,
                "<tool-tip id=\"tooltip-{i}\" for=\"contribution-day-component-{i}\" popover=\"manual\" data-direction=\"n\" class=\"sr-only position-absolute\">{}</tool-tip>",
                tooltip_text(cell, count),
            );
        }
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghcal_core::{parse_calendar_page, parse_years_page};

    #[test]
    fn years_page_parses_back() {
        let page = years_page(&[2023, 2022, 2021]);
        assert_eq!(parse_years_page(page.as_bytes()).unwrap(), vec![2023, 2022, 2021]);
    }

    #[test]
    fn calendar_page_parses_back() {
        let d = |day| NaiveDate::from_ymd_opt(2022, 12, day).unwrap();
        let page = calendar_page(&[
            CellFixture::new(d(1), 1, 1),
            CellFixture::new(d(2), 0, 0),
            CellFixture::without_tooltip(d(3), 2),
            CellFixture::new(d(4), 4, 17),
        ]);
        let scrape = parse_calendar_page(page.as_bytes()).unwrap();
        assert_eq!(scrape.total, 18);
        assert_eq!(scrape.missing_counts, 1);
        let counts: Vec<u32> = scrape.days.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 17]);
    }
}
