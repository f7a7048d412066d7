//! ghcal scrapes a GitHub profile's contribution calendar.
//!
//! Overview
//! - Discovers the years with recorded activity from the profile's
//!   contributions tab.
//! - Scrapes one calendar window per year plus the trailing 365-day window,
//!   concurrently, through any [`CalendarSource`].
//! - Merges the per-window results into a [`ContributionsReport`] keyed by
//!   year label (`"2021"`, ..., `"last_year"`).
//!
//! Failure model
//! - Year discovery failing fails the whole call.
//! - A failing, timed-out or panicking window is logged and left out; the
//!   report is still produced, possibly with both maps empty.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ghcal::Ghcal;
//! use ghcal_github::GithubSource;
//!
//! let ghcal = Ghcal::builder()
//!     .source(Arc::new(GithubSource::new_default()?))
//!     .window_timeout(std::time::Duration::from_secs(10))
//!     .build()?;
//! let report = ghcal.contributions("octocat").await?;
//! println!("{:?}", report.totals);
//! ```
#![warn(missing_docs)]

pub(crate) mod core;

pub use core::{Ghcal, GhcalBuilder};

// Re-export core types for convenience
pub use ghcal_core::{
    CacheConfig, CalendarSource, CalendarWindow, ContributionsReport, Day, GhcalConfig,
    GhcalError, YearLabel, YearScrape,
};
