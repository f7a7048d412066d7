use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ghcal_core::{CalendarSource, CalendarWindow, GhcalError};

/// Instruction for how a page fetch should behave.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided body immediately.
    Return(Vec<u8>),
    /// Return the provided body after sleeping.
    Delayed(Duration, Vec<u8>),
    /// Fail immediately with the provided error.
    Fail(GhcalError),
    /// Hang indefinitely (simulate a stalled upstream).
    Hang,
    /// Panic inside the fetch (simulate a crashed task).
    Panic,
}

impl MockBehavior {
    /// Shorthand for [`MockBehavior::Return`] with a string body.
    pub fn page(body: impl Into<String>) -> Self {
        Self::Return(body.into().into_bytes())
    }
}

/// A fetch observed by the dynamic source, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `years_page(username)`.
    Years(String),
    /// `calendar_page(username, window)`.
    Calendar(String, CalendarWindow),
}

#[derive(Default)]
struct InternalState {
    years: Option<MockBehavior>,
    windows: HashMap<CalendarWindow, MockBehavior>,
    calls: Vec<RecordedCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `years_page` calls.
    pub async fn set_years_behavior(&self, behavior: MockBehavior) {
        self.state.lock().await.years = Some(behavior);
    }

    /// Set the behavior for `calendar_page` calls targeting `window`.
    pub async fn set_window_behavior(&self, window: CalendarWindow, behavior: MockBehavior) {
        self.state.lock().await.windows.insert(window, behavior);
    }

    /// Copy of every call observed so far.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of `calendar_page` calls observed so far.
    pub async fn calendar_calls(&self) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| matches!(c, RecordedCall::Calendar(..)))
            .count()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.years = None;
        guard.windows.clear();
        guard.calls.clear();
    }
}

/// A source that defers all behavior to an external controller.
///
/// Calls without a configured behavior fail with a `Request` error.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn CalendarSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn CalendarSource>, controller)
    }

    async fn run(behavior: Option<MockBehavior>, what: String) -> Result<Vec<u8>, GhcalError> {
        match behavior {
            Some(MockBehavior::Return(body)) => Ok(body),
            Some(MockBehavior::Delayed(wait, body)) => {
                tokio::time::sleep(wait).await;
                Ok(body)
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            Some(MockBehavior::Panic) => panic!("mock panic: {what}"),
            None => Err(GhcalError::request(what, "no mock behavior configured")),
        }
    }
}

#[async_trait]
impl CalendarSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn years_page(&self, username: &str) -> Result<Vec<u8>, GhcalError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(RecordedCall::Years(username.to_string()));
            guard.years.clone()
        };
        Self::run(behavior, format!("mock://{username}/years")).await
    }

    async fn calendar_page(
        &self,
        username: &str,
        window: CalendarWindow,
    ) -> Result<Vec<u8>, GhcalError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard
                .calls
                .push(RecordedCall::Calendar(username.to_string(), window));
            guard.windows.get(&window).cloned()
        };
        Self::run(behavior, format!("mock://{username}/{}", window.label())).await
    }
}
