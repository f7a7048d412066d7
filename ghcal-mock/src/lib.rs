//! ghcal-mock
//!
//! Calendar sources for CI-safe tests and examples. [`MockSource`] serves
//! canned pages keyed by username; [`DynamicMockSource`] defers every call
//! to a controller the test drives.
use std::time::Duration;

use async_trait::async_trait;
use ghcal_core::{CalendarSource, CalendarWindow, GhcalError};

mod dynamic;
pub mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior, RecordedCall};
pub use fixtures::pages::{CellFixture, calendar_page, years_page};
pub use fixtures::profiles::{FAIL, OCTOCAT, OCTOCAT_YEARS, SLOW};

/// Mock source backed by static fixtures.
///
/// * [`OCTOCAT`] lists [`OCTOCAT_YEARS`] and has a page for every window.
/// * [`FAIL`] fails year discovery.
/// * [`SLOW`] answers like [`OCTOCAT`] after [`MockSource::SLOW_DELAY`].
/// * Anyone else has an empty contributions tab.
pub struct MockSource;

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// Source name used in logs.
    pub const NAME: &'static str = "ghcal-mock";
    /// Latency applied to every [`SLOW`] request.
    pub const SLOW_DELAY: Duration = Duration::from_millis(200);

    /// Create the canned-data source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_stall(username: &str) {
        if username == SLOW {
            tokio::time::sleep(Self::SLOW_DELAY).await;
        }
    }

    fn not_found(username: &str, what: &str) -> GhcalError {
        GhcalError::request(
            format!("mock://{username}/{what}"),
            "status 404 Not Found",
        )
    }
}

#[async_trait]
impl CalendarSource for MockSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn years_page(&self, username: &str) -> Result<Vec<u8>, GhcalError> {
        Self::maybe_stall(username).await;
        match username {
            FAIL => Err(GhcalError::request(
                format!("mock://{username}/years"),
                "forced failure: years",
            )),
            OCTOCAT | SLOW => Ok(fixtures::profiles::octocat_years().into_bytes()),
            _ => Ok(years_page(&[]).into_bytes()),
        }
    }

    async fn calendar_page(
        &self,
        username: &str,
        window: CalendarWindow,
    ) -> Result<Vec<u8>, GhcalError> {
        Self::maybe_stall(username).await;
        if username != OCTOCAT && username != SLOW {
            return Err(Self::not_found(username, &window.label().to_string()));
        }
        let page = match window {
            CalendarWindow::Trailing => Some(fixtures::profiles::octocat_trailing()),
            CalendarWindow::Year(y) => fixtures::profiles::octocat_year(y),
        };
        page.map(String::into_bytes)
            .ok_or_else(|| Self::not_found(username, &window.label().to_string()))
    }
}
