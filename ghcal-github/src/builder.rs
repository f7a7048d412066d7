use std::time::Duration;

use ghcal_core::GhcalError;
use url::Url;

use crate::GithubSource;

/// Builder for [`GithubSource`].
#[derive(Debug, Clone)]
pub struct GithubSourceBuilder {
    base_url: String,
    user_agent: String,
    timeout: Option<Duration>,
}

impl Default for GithubSourceBuilder {
    fn default() -> Self {
        Self {
            base_url: GithubSource::DEFAULT_BASE_URL.to_string(),
            user_agent: GithubSource::DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl GithubSourceBuilder {
    /// Point the source at another host (tests, mirrors, proxies).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Bound every request, connect to last body byte. Unset means no client-side limit.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the source.
    ///
    /// # Errors
    /// Returns `GhcalError::Config` if the base URL is invalid or the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<GithubSource, GhcalError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| GhcalError::Config(format!("base url {:?}: {e}", self.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(GhcalError::Config(format!(
                "base url {:?} cannot carry a path",
                self.base_url
            )));
        }
        let mut http = reqwest::Client::builder().user_agent(self.user_agent);
        if let Some(t) = self.timeout {
            http = http.timeout(t);
        }
        let http = http
            .build()
            .map_err(|e| GhcalError::Config(format!("http client: {e}")))?;
        Ok(GithubSource::from_parts(http, base))
    }
}
