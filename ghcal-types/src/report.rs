//! Per-window scrape results and the aggregated response envelope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Day, GhcalError, YearLabel};

/// Outcome of scraping one calendar window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearScrape {
    /// Sum of all day counts.
    pub total: u64,
    /// Days strictly ascending by date, one entry per date.
    pub days: Vec<Day>,
    /// Days whose tooltip never arrived; their count was left at zero.
    pub missing_counts: usize,
}

impl YearScrape {
    /// Build a scrape from a date-ordered day series, deriving the total.
    #[must_use]
    pub fn new(days: Vec<Day>, missing_counts: usize) -> Self {
        let total = days.iter().map(|d| u64::from(d.count)).sum();
        Self {
            total,
            days,
            missing_counts,
        }
    }
}

/// Aggregated contributions for one user, keyed by year label.
///
/// Serializes as `{"totals": {...}, "contributions": {...}}`. Both maps are
/// always present, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContributionsReport {
    /// Total contributions per label.
    pub totals: BTreeMap<YearLabel, u64>,
    /// Day series per label.
    pub contributions: BTreeMap<YearLabel, Vec<Day>>,
}

impl ContributionsReport {
    /// Record a window's scrape under `label`, replacing any previous entry.
    pub fn insert(&mut self, label: YearLabel, scrape: YearScrape) {
        self.totals.insert(label, scrape.total);
        self.contributions.insert(label, scrape.days);
    }

    /// Number of labels with data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// True when no window contributed data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Encode the report as JSON bytes.
    ///
    /// # Errors
    /// Returns `GhcalError::Serialization` if encoding fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, GhcalError> {
        Ok(serde_json::to_vec(self)?)
    }
}
