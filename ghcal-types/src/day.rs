//! A single cell of the activity calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day: its date, the grid's intensity bucket, and the exact count.
///
/// `level` is read from the grid cell and `count` from the paired tooltip;
/// a day whose tooltip never arrived keeps `count == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Day {
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Intensity bucket (0 = no activity, higher = more).
    pub level: u8,
    /// Number of contributions on this date.
    pub count: u32,
}

impl Day {
    /// Build a day with no count attached yet.
    #[must_use]
    pub const fn new(date: NaiveDate, level: u8) -> Self {
        Self {
            date,
            level,
            count: 0,
        }
    }

    /// Return a copy of this day with `count` attached.
    #[must_use]
    pub const fn with_count(self, count: u32) -> Self {
        Self { count, ..self }
    }
}
