//! ghcal-github
//!
//! [`CalendarSource`] implementation that fetches GitHub's contributions tab
//! and calendar fragments with `reqwest`.
//!
//! Both endpoints are the ones the profile page itself loads over XHR, so
//! every request carries the profile as `referer` and an
//! `x-requested-with: XMLHttpRequest` header.
#![warn(missing_docs)]

mod builder;

use async_trait::async_trait;
use ghcal_core::{CalendarSource, CalendarWindow, GhcalError};
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use url::Url;

pub use builder::GithubSourceBuilder;

/// Calendar source backed by github.com.
#[derive(Debug, Clone)]
pub struct GithubSource {
    http: reqwest::Client,
    base: Url,
}

impl GithubSource {
    /// Source name used in logs.
    pub const NAME: &'static str = "ghcal-github";
    /// Default upstream host.
    pub const DEFAULT_BASE_URL: &'static str = "https://github.com";
    /// Default `User-Agent`.
    pub const DEFAULT_USER_AGENT: &'static str = concat!("ghcal/", env!("CARGO_PKG_VERSION"));

    /// Start configuring a source.
    #[must_use]
    pub fn builder() -> GithubSourceBuilder {
        GithubSourceBuilder::default()
    }

    /// Source with default settings against github.com.
    ///
    /// # Errors
    /// Returns `GhcalError::Config` if the HTTP client cannot be constructed.
    pub fn new_default() -> Result<Self, GhcalError> {
        Self::builder().build()
    }

    pub(crate) const fn from_parts(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    fn with_segments(&self, segments: &[&str]) -> Result<Url, GhcalError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| GhcalError::Config(format!("base url {} cannot carry a path", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Profile URL, also sent as `referer`.
    ///
    /// # Errors
    /// Returns `GhcalError::Config` if the base URL cannot carry a path.
    pub fn profile_url(&self, username: &str) -> Result<Url, GhcalError> {
        self.with_segments(&[username])
    }

    /// URL of the contributions tab listing the years with activity.
    ///
    /// # Errors
    /// Returns `GhcalError::Config` if the base URL cannot carry a path.
    pub fn years_url(&self, username: &str) -> Result<Url, GhcalError> {
        let mut url = self.profile_url(username)?;
        url.query_pairs_mut()
            .append_pair("action", "show")
            .append_pair("controller", "profiles")
            .append_pair("tab", "contributions")
            .append_pair("user_id", username);
        Ok(url)
    }

    /// URL of the calendar fragment for `window`.
    ///
    /// A specific year asks for `from={year}-12-01&to={year}-12-31`: only
    /// December of that year, which is the range the upstream query has
    /// always used here. The trailing window carries no query.
    ///
    /// # Errors
    /// Returns `GhcalError::Config` if the base URL cannot carry a path.
    pub fn calendar_url(&self, username: &str, window: CalendarWindow) -> Result<Url, GhcalError> {
        let mut url = self.with_segments(&["users", username, "contributions"])?;
        if let CalendarWindow::Year(year) = window {
            url.query_pairs_mut()
                .append_pair("tab", "overview")
                .append_pair("from", &format!("{year}-12-01"))
                .append_pair("to", &format!("{year}-12-31"));
        }
        Ok(url)
    }

    fn headers(&self, username: &str) -> Result<HeaderMap, GhcalError> {
        let profile = self.profile_url(username)?;
        let referer = HeaderValue::from_str(profile.as_str())
            .map_err(|e| GhcalError::request(profile.as_str(), format!("referer header: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, referer);
        headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        Ok(headers)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ghcal_github::fetch",
            skip(self, url),
            fields(url = %url),
            err,
        )
    )]
    async fn fetch(&self, username: &str, url: Url) -> Result<Vec<u8>, GhcalError> {
        let headers = self.headers(username)?;
        let resp = self
            .http
            .get(url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| GhcalError::request(url.as_str(), e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GhcalError::request(url.as_str(), format!("status {status}")));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| GhcalError::request(url.as_str(), format!("read body: {e}")))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl CalendarSource for GithubSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn years_page(&self, username: &str) -> Result<Vec<u8>, GhcalError> {
        let url = self.years_url(username)?;
        self.fetch(username, url).await
    }

    async fn calendar_page(
        &self,
        username: &str,
        window: CalendarWindow,
    ) -> Result<Vec<u8>, GhcalError> {
        let url = self.calendar_url(username, window)?;
        self.fetch(username, url).await
    }
}
