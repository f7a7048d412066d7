//! ghcal-core
//!
//! Core types, traits, and parsers shared across the ghcal workspace.
//!
//! - `types`: re-exports of the shared data model (days, labels, reports).
//! - `connector`: the `CalendarSource` trait implemented by page fetchers.
//! - `markup`: a lazy, HTML-tolerant token stream over page bytes.
//! - `years`: discovery of the years with recorded activity.
//! - `calendar`: day-cell extraction and tooltip correlation for one page.
//!
//! Parsing is synchronous and CPU-bound; only `CalendarSource` is async.
#![warn(missing_docs)]

/// Page-fetching trait implemented by upstream connectors.
pub mod connector;
/// Markup token stream.
pub mod markup;
/// Calendar page parsing: day cells, tooltips, and the per-window series.
pub mod calendar;
/// Year discovery from the contributions tab.
pub mod years;
pub mod types;

pub use calendar::{DayArena, DayCell, parse_calendar_page};
pub use connector::CalendarSource;
pub use markup::{Tag, Token, Tokenizer};
pub use types::*;
pub use years::parse_years_page;
