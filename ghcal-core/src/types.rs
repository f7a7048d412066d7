//! Re-export of the shared data model from `ghcal-types`.
// Consolidated re-exports so downstream crates can depend on `ghcal-core` only

pub use ghcal_types::{
    CacheConfig, CalendarWindow, ContributionsReport, Day, GhcalConfig, GhcalError, YearLabel,
    YearScrape,
};
