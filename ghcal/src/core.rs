use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use ghcal_core::{
    CalendarSource, CalendarWindow, ContributionsReport, GhcalConfig, GhcalError, YearLabel,
    YearScrape, parse_calendar_page, parse_years_page,
};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Orchestrator that discovers a profile's active years and scrapes every
/// calendar window concurrently.
#[derive(Clone)]
pub struct Ghcal {
    pub(crate) source: Arc<dyn CalendarSource>,
    pub(crate) cfg: GhcalConfig,
}

impl std::fmt::Debug for Ghcal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ghcal")
            .field("source", &self.source.name())
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Builder for constructing a `Ghcal` orchestrator.
#[derive(Default)]
pub struct GhcalBuilder {
    source: Option<Arc<dyn CalendarSource>>,
    cfg: GhcalConfig,
}

impl GhcalBuilder {
    /// Create a builder with no source and no deadlines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page source. Required.
    #[must_use]
    pub fn source(mut self, source: Arc<dyn CalendarSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Bound each window scrape. A window that runs past it is logged and
    /// left out of the report; the other windows are unaffected.
    #[must_use]
    pub const fn window_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.window_timeout = Some(timeout);
        self
    }

    /// Bound a whole aggregation, year discovery included. On expiry every
    /// window still in flight is aborted and the call fails with
    /// `GhcalError::RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub const fn config(mut self, cfg: GhcalConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `GhcalError::Config` if no source was set.
    pub fn build(self) -> Result<Ghcal, GhcalError> {
        let source = self
            .source
            .ok_or_else(|| GhcalError::Config("no calendar source configured".into()))?;
        Ok(Ghcal {
            source,
            cfg: self.cfg,
        })
    }
}

type WindowOutcome = (YearLabel, Result<YearScrape, GhcalError>);

impl Ghcal {
    /// Start building a new `Ghcal` instance.
    #[must_use]
    pub fn builder() -> GhcalBuilder {
        GhcalBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> GhcalConfig {
        self.cfg
    }

    /// Name of the underlying page source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Years with recorded activity, in page order.
    ///
    /// # Errors
    /// Returns the source's error if the contributions tab cannot be fetched,
    /// or `GhcalError::Parse` if it cannot be tokenized.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "ghcal::discover_years", skip(self), err)
    )]
    pub async fn discover_years(&self, username: &str) -> Result<Vec<i32>, GhcalError> {
        let page = self.source.years_page(username).await?;
        parse_years_page(&page)
    }

    /// Scrape one calendar window: a single outbound request, then parse.
    ///
    /// Honors `window_timeout`.
    ///
    /// # Errors
    /// Returns the source's error, `GhcalError::Parse` for a malformed page,
    /// or `GhcalError::WindowTimeout`.
    pub async fn scrape_window(
        &self,
        username: &str,
        window: CalendarWindow,
    ) -> Result<YearScrape, GhcalError> {
        scrape_with_deadline(
            self.source.as_ref(),
            username,
            window,
            self.cfg.window_timeout,
        )
        .await
    }

    /// Aggregate every window of `username` into a report.
    ///
    /// Discovered years are de-duplicated before fan-out. Failed windows are
    /// logged and omitted, so the report may be empty even on success.
    ///
    /// # Errors
    /// Fails only when year discovery fails or `request_timeout` expires.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ghcal::contributions",
            skip(self),
            fields(source = self.source.name()),
            err,
        )
    )]
    pub async fn contributions(&self, username: &str) -> Result<ContributionsReport, GhcalError> {
        match self.cfg.request_timeout {
            Some(deadline) => tokio::time::timeout(deadline, self.aggregate(username))
                .await
                .unwrap_or_else(|_| {
                    Err(GhcalError::request_timeout(format!(
                        "contributions for {username}"
                    )))
                }),
            None => self.aggregate(username).await,
        }
    }

    /// [`Ghcal::contributions`] encoded as the JSON body served to clients.
    ///
    /// # Errors
    /// Everything `contributions` returns, plus `GhcalError::Serialization`.
    pub async fn contributions_json(&self, username: &str) -> Result<Vec<u8>, GhcalError> {
        self.contributions(username).await?.to_json_bytes()
    }

    async fn aggregate(&self, username: &str) -> Result<ContributionsReport, GhcalError> {
        let years = self.discover_years(username).await?;

        let mut windows: BTreeSet<CalendarWindow> =
            years.into_iter().map(CalendarWindow::Year).collect();
        windows.insert(CalendarWindow::Trailing);

        let (tx, mut rx) = mpsc::channel::<WindowOutcome>(windows.len());
        // Dropping the set (request deadline) aborts every task still running.
        let mut tasks = JoinSet::new();
        let mut pending: BTreeSet<YearLabel> = BTreeSet::new();

        for window in windows {
            pending.insert(window.label());
            let source = Arc::clone(&self.source);
            let username = username.to_string();
            let deadline = self.cfg.window_timeout;
            let tx = tx.clone();
            tasks.spawn(async move {
                let res = scrape_with_deadline(source.as_ref(), &username, window, deadline).await;
                // The collector only disappears when the whole call was abandoned.
                let _ = tx.send((window.label(), res)).await;
            });
        }
        drop(tx);

        let mut report = ContributionsReport::default();
        while let Some((label, res)) = rx.recv().await {
            pending.remove(&label);
            match res {
                Ok(scrape) => {
                    #[cfg(feature = "tracing")]
                    if scrape.missing_counts > 0 {
                        tracing::warn!(
                            username,
                            label = %label,
                            missing = scrape.missing_counts,
                            "days without a tooltip; their count was left at zero"
                        );
                    }
                    report.insert(label, scrape);
                }
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(username, label = %label, error = %_e, "window scrape failed; omitting");
                }
            }
        }

        // Every sender is gone: tasks have finished or died.
        while let Some(joined) = tasks.join_next().await {
            if let Err(_e) = joined {
                #[cfg(feature = "tracing")]
                tracing::error!(username, error = %_e, "window task did not complete");
            }
        }
        for _label in &pending {
            #[cfg(feature = "tracing")]
            tracing::warn!(username, label = %_label, "window produced no result; omitting");
        }

        #[cfg(feature = "tracing")]
        tracing::info!(username, windows = report.len(), "aggregation complete");
        Ok(report)
    }
}

async fn scrape_once(
    source: &dyn CalendarSource,
    username: &str,
    window: CalendarWindow,
) -> Result<YearScrape, GhcalError> {
    let page = source.calendar_page(username, window).await?;
    parse_calendar_page(&page)
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "ghcal::scrape_window",
        skip(source, deadline),
        fields(label = %window.label()),
    )
)]
async fn scrape_with_deadline(
    source: &dyn CalendarSource,
    username: &str,
    window: CalendarWindow,
    deadline: Option<Duration>,
) -> Result<YearScrape, GhcalError> {
    let fut = scrape_once(source, username, window);
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .unwrap_or_else(|_| {
                Err(GhcalError::WindowTimeout {
                    label: window.label().to_string(),
                })
            }),
        None => fut.await,
    }
}
