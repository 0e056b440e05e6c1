//! Tab Session Manager
//!
//! `TabSession` is the single owner of the active tab. Switching tabs tears the
//! previous view down completely (poll timer stopped, fetch state closed so
//! late responses are discarded) before the next view gets a fresh fetch
//! state. Inactive tabs keep nothing: every activation fetches again.

use crate::api::{ApiClient, Page};
use crate::config::DashboardConfig;
use crate::error::{ApiError, CoreError};
use crate::event::{EventBus, ViewEvent};
use crate::fetch::{FetchCoordinator, FetchStatus, PendingFetch, Refresh, RequestId};
use crate::poll::PollingScheduler;
use crate::settings::DashboardSettings;
use crate::view_model::{
    AnalyticsView, CallDetailView, CallsView, DashboardView, SettingsView, ViewModel,
};
use callboard_types::{AnalyticsBundle, AnalyticsSummary, CallRecord};
use futures::FutureExt;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// One top-level dashboard tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    Dashboard,
    Calls,
    Analytics,
    Settings,
}

impl ViewId {
    pub const ALL: [ViewId; 4] = [
        ViewId::Dashboard,
        ViewId::Calls,
        ViewId::Analytics,
        ViewId::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "dashboard",
            ViewId::Calls => "calls",
            ViewId::Analytics => "analytics",
            ViewId::Settings => "settings",
        }
    }

    /// Settings is local-only and never talks to the backend
    pub fn fetches_data(&self) -> bool {
        !matches!(self, ViewId::Settings)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(ViewId::Dashboard),
            "calls" => Ok(ViewId::Calls),
            "analytics" => Ok(ViewId::Analytics),
            "settings" => Ok(ViewId::Settings),
            other => Err(format!(
                "unknown view '{}' (expected dashboard, calls, analytics or settings)",
                other
            )),
        }
    }
}

/// View-local parameters read by loaders at request time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewParams {
    pub analytics_days: u32,
    pub calls_page: Page,
}

/// Resources of the active tab
enum ActiveView {
    Dashboard(FetchCoordinator<AnalyticsSummary>),
    Calls(FetchCoordinator<Vec<CallRecord>>),
    Analytics(FetchCoordinator<AnalyticsBundle>),
    Settings,
}

impl ActiveView {
    fn id(&self) -> ViewId {
        match self {
            ActiveView::Dashboard(_) => ViewId::Dashboard,
            ActiveView::Calls(_) => ViewId::Calls,
            ActiveView::Analytics(_) => ViewId::Analytics,
            ActiveView::Settings => ViewId::Settings,
        }
    }

    fn refresh(&self) -> Option<PendingFetch> {
        match self {
            ActiveView::Dashboard(c) => Some(c.refresh()),
            ActiveView::Calls(c) => Some(c.refresh()),
            ActiveView::Analytics(c) => Some(c.refresh()),
            ActiveView::Settings => None,
        }
    }

    fn poll_target(&self) -> Option<Arc<dyn Refresh>> {
        match self {
            ActiveView::Dashboard(c) => Some(Arc::new(c.clone())),
            ActiveView::Calls(c) => Some(Arc::new(c.clone())),
            ActiveView::Analytics(c) => Some(Arc::new(c.clone())),
            ActiveView::Settings => None,
        }
    }

    fn close(&self) {
        match self {
            ActiveView::Dashboard(c) => c.close(),
            ActiveView::Calls(c) => c.close(),
            ActiveView::Analytics(c) => c.close(),
            ActiveView::Settings => {}
        }
    }
}

/// What the rendering layer reads for the active tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub view: ViewId,
    pub status: FetchStatus,
    pub error: Option<String>,
    pub request_id: RequestId,
    /// Built from the last accepted data; `None` until the first success
    pub model: Option<ViewModel>,
}

pub struct TabSession {
    client: ApiClient,
    config: DashboardConfig,
    params: Arc<RwLock<ViewParams>>,
    settings: DashboardSettings,
    scheduler: PollingScheduler,
    active: Option<ActiveView>,
    events: EventBus,
}

impl TabSession {
    pub fn new(client: ApiClient, config: DashboardConfig) -> Self {
        let params = ViewParams {
            analytics_days: config.views.analytics_days,
            calls_page: config.views.calls_page(),
        };
        Self {
            client,
            config,
            params: Arc::new(RwLock::new(params)),
            settings: DashboardSettings::default(),
            scheduler: PollingScheduler::new(),
            active: None,
            events: EventBus::default_capacity(),
        }
    }

    pub fn with_settings(mut self, settings: DashboardSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn active_view(&self) -> Option<ViewId> {
        self.active.as_ref().map(ActiveView::id)
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn params(&self) -> ViewParams {
        *self.params.read()
    }

    pub fn is_polling(&self, view: ViewId) -> bool {
        self.scheduler.is_running(view)
    }

    /// Number of live poll timers across all views
    pub fn live_poll_sessions(&self) -> usize {
        self.scheduler.len()
    }

    /// Make `view` the active tab
    ///
    /// Switching to the tab that is already active does nothing and returns
    /// `None`. Otherwise the previous tab is torn down, a fresh fetch state is
    /// created and its first refresh is returned (`None` for settings).
    pub fn switch_to(&mut self, view: ViewId) -> Result<Option<PendingFetch>, CoreError> {
        if self.active_view() == Some(view) {
            debug!(view = %view, "Already active");
            return Ok(None);
        }

        self.deactivate();

        let active = self.build(view);
        info!(view = %view, "View activated");
        self.events.publish(ViewEvent::Activated(view));
        let pending = active.refresh();
        let poll_target = active.poll_target();
        self.active = Some(active);

        let interval = self.config.polling.interval_for(view);
        if let (Some(interval), Some(target)) = (interval, poll_target) {
            self.scheduler.start(view, interval, target)?;
        }

        Ok(pending)
    }

    /// Manually refresh the active tab
    pub fn refresh(&self) -> Option<PendingFetch> {
        self.active.as_ref().and_then(ActiveView::refresh)
    }

    /// Change the analytics day range; refetches if analytics is active
    pub fn set_analytics_days(&mut self, days: u32) -> Result<Option<PendingFetch>, CoreError> {
        if days == 0 {
            return Err(CoreError::InvalidConfig {
                message: "analytics day range must be greater than zero".to_string(),
            });
        }
        {
            let mut params = self.params.write();
            if params.analytics_days == days {
                return Ok(None);
            }
            params.analytics_days = days;
        }
        debug!(days, "Analytics day range changed");

        Ok(match &self.active {
            Some(ActiveView::Analytics(c)) => Some(c.refresh()),
            _ => None,
        })
    }

    /// Change the calls page; refetches if calls is active
    pub fn set_calls_page(&mut self, page: Page) -> Option<PendingFetch> {
        {
            let mut params = self.params.write();
            if params.calls_page == page {
                return None;
            }
            params.calls_page = page;
        }

        match &self.active {
            Some(ActiveView::Calls(c)) => Some(c.refresh()),
            _ => None,
        }
    }

    /// Current state and view model of the active tab
    pub fn snapshot(&self) -> Option<ViewSnapshot> {
        let active = self.active.as_ref()?;
        let view = active.id();

        let snapshot = match active {
            ActiveView::Dashboard(c) => c.with_state(|state| ViewSnapshot {
                view,
                status: state.status,
                error: state.error.clone(),
                request_id: state.request_id,
                model: state
                    .data
                    .as_ref()
                    .map(|summary| ViewModel::Dashboard(DashboardView::from_summary(summary))),
            }),
            ActiveView::Calls(c) => c.with_state(|state| ViewSnapshot {
                view,
                status: state.status,
                error: state.error.clone(),
                request_id: state.request_id,
                model: state
                    .data
                    .as_ref()
                    .map(|calls| ViewModel::Calls(CallsView::from_records(calls))),
            }),
            ActiveView::Analytics(c) => c.with_state(|state| ViewSnapshot {
                view,
                status: state.status,
                error: state.error.clone(),
                request_id: state.request_id,
                model: state
                    .data
                    .as_ref()
                    .map(|bundle| ViewModel::Analytics(AnalyticsView::from_bundle(bundle))),
            }),
            ActiveView::Settings => ViewSnapshot {
                view,
                status: FetchStatus::Idle,
                error: None,
                request_id: RequestId::default(),
                model: Some(ViewModel::Settings(SettingsView::from_settings(
                    &self.settings,
                ))),
            },
        };
        Some(snapshot)
    }

    /// One-shot fetch of a single call with its transcript
    pub async fn call_detail(&self, call_id: i64) -> Result<CallDetailView, ApiError> {
        let call = self.client.call_detail(call_id).await?;
        Ok(CallDetailView::from_record(&call))
    }

    /// Tear down the active tab, leaving no timers or fetch state behind
    pub fn shutdown(&mut self) {
        self.deactivate();
    }

    fn deactivate(&mut self) {
        let Some(previous) = self.active.take() else {
            return;
        };
        let view = previous.id();
        self.scheduler.stop(view);
        previous.close();
        info!(view = %view, "View deactivated");
        self.events.publish(ViewEvent::Deactivated(view));
    }

    fn build(&self, view: ViewId) -> ActiveView {
        let client = self.client.clone();
        let events = self.events.clone();
        match view {
            ViewId::Dashboard => ActiveView::Dashboard(FetchCoordinator::new(
                view,
                client,
                events,
                |client: ApiClient| async move { client.analytics().await }.boxed(),
            )),
            ViewId::Calls => {
                let params = Arc::clone(&self.params);
                ActiveView::Calls(FetchCoordinator::new(
                    view,
                    client,
                    events,
                    move |client: ApiClient| {
                        let page = params.read().calls_page;
                        async move { client.calls(page).await }.boxed()
                    },
                ))
            }
            ViewId::Analytics => {
                let params = Arc::clone(&self.params);
                ActiveView::Analytics(FetchCoordinator::new(
                    view,
                    client,
                    events,
                    move |client: ApiClient| {
                        let days = params.read().analytics_days;
                        async move { client.analytics_bundle(days).await }.boxed()
                    },
                ))
            }
            ViewId::Settings => ActiveView::Settings,
        }
    }
}

impl Drop for TabSession {
    fn drop(&mut self) {
        self.deactivate();
    }
}
