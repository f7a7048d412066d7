use async_trait::async_trait;

use crate::{CalendarWindow, GhcalError};

/// Source of the raw calendar pages for a profile.
///
/// Implementations perform exactly one outbound request per call and return
/// the response body untouched; all parsing happens in this crate.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Stable source name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the contributions tab listing the years with recorded activity.
    async fn years_page(&self, username: &str) -> Result<Vec<u8>, GhcalError>;

    /// Fetch the calendar grid for one window.
    async fn calendar_page(
        &self,
        username: &str,
        window: CalendarWindow,
    ) -> Result<Vec<u8>, GhcalError>;
}
