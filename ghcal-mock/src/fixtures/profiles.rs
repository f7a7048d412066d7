use chrono::NaiveDate;

use super::pages::{CellFixture, calendar_page, years_page};

/// Username served with canned data by [`crate::MockSource`].
pub const OCTOCAT: &str = "octocat";
/// Username whose year discovery always fails.
pub const FAIL: &str = "FAIL";
/// Username whose every request stalls before answering.
pub const SLOW: &str = "SLOW";

/// Years listed for [`OCTOCAT`], most recent first as the tab orders them.
pub const OCTOCAT_YEARS: [i32; 2] = [2022, 2021];

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Contributions tab listing [`OCTOCAT_YEARS`].
pub fn octocat_years() -> String {
    years_page(&OCTOCAT_YEARS)
}

/// Calendar page for one of [`OCTOCAT`]'s years, `None` for unlisted years.
pub fn octocat_year(year: i32) -> Option<String> {
    match year {
        2021 => Some(calendar_page(&[
            CellFixture::new(ymd(2021, 12, 1), 1, 2),
            CellFixture::new(ymd(2021, 12, 2), 0, 0),
            CellFixture::new(ymd(2021, 12, 3), 3, 7),
        ])),
        2022 => Some(calendar_page(&[
            CellFixture::new(ymd(2022, 12, 30), 2, 4),
            CellFixture::new(ymd(2022, 12, 31), 0, 0),
        ])),
        _ => None,
    }
}

/// Calendar page for [`OCTOCAT`]'s trailing window.
pub fn octocat_trailing() -> String {
    calendar_page(&[
        CellFixture::new(ymd(2022, 1, 1), 0, 0),
        CellFixture::new(ymd(2022, 1, 2), 1, 1),
        CellFixture::new(ymd(2022, 1, 3), 2, 3),
    ])
}
