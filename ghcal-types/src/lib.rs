//! Ghcal-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod day;
mod error;
mod report;
mod window;

pub use config::{CacheConfig, GhcalConfig};
pub use day::Day;
pub use error::GhcalError;
pub use report::{ContributionsReport, YearScrape};
pub use window::{CalendarWindow, YearLabel};
