//! Fetch Coordinator: one per active view
//!
//! Every `refresh()` takes the next request id and spawns the view's loader.
//! When the loader finishes, its result is applied only if that id is still
//! the latest one issued and the view has not been torn down. Anything else
//! is dropped, so a slow early response can never overwrite a newer one.
//!
//! Errors keep the previous `data` (last-known-good) and only record the
//! message for display.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::event::{EventBus, ViewEvent};
use crate::session::ViewId;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Monotonic id of an issued request (0 = nothing issued yet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Loading/error/data state of one view
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub status: FetchStatus,
    /// Payload of the last accepted successful response
    pub data: Option<T>,
    /// Message of the last accepted failure (cleared on success)
    pub error: Option<String>,
    /// Latest request issued for this view
    pub request_id: RequestId,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error: None,
            request_id: RequestId::default(),
        }
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }
}

/// Produces a view's payload from the API client
pub type Loader<T> =
    Arc<dyn Fn(ApiClient) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

struct Shared<T> {
    state: FetchState<T>,
    closed: bool,
}

/// Handle on one issued refresh
pub struct PendingFetch {
    pub request_id: RequestId,
    handle: Option<JoinHandle<bool>>,
}

impl PendingFetch {
    /// Wait for the response; `true` if it was applied, `false` if discarded
    /// (superseded, view closed, or never issued)
    pub async fn settled(self) -> bool {
        match self.handle {
            Some(handle) => handle.await.unwrap_or(false),
            None => false,
        }
    }
}

/// Something a poll timer can refresh
pub trait Refresh: Send + Sync {
    fn view(&self) -> ViewId;

    /// Issue a refresh without waiting for it
    fn trigger(&self) -> RequestId;
}

pub struct FetchCoordinator<T> {
    view: ViewId,
    client: ApiClient,
    loader: Loader<T>,
    shared: Arc<Mutex<Shared<T>>>,
    events: EventBus,
}

impl<T> Clone for FetchCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            client: self.client.clone(),
            loader: Arc::clone(&self.loader),
            shared: Arc::clone(&self.shared),
            events: self.events.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> FetchCoordinator<T> {
    pub fn new<F>(view: ViewId, client: ApiClient, events: EventBus, loader: F) -> Self
    where
        F: Fn(ApiClient) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync + 'static,
    {
        Self {
            view,
            client,
            loader: Arc::new(loader),
            shared: Arc::new(Mutex::new(Shared {
                state: FetchState::default(),
                closed: false,
            })),
            events,
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Snapshot of the current state
    pub fn state(&self) -> FetchState<T> {
        self.shared.lock().state.clone()
    }

    /// Read the state without cloning the payload
    pub fn with_state<R>(&self, f: impl FnOnce(&FetchState<T>) -> R) -> R {
        f(&self.shared.lock().state)
    }

    /// Issue a new request; must be called inside a tokio runtime
    ///
    /// Concurrent refreshes are not collapsed: each one issues its own
    /// request and only the newest may update the state.
    pub fn refresh(&self) -> PendingFetch {
        let request_id = {
            let mut shared = self.shared.lock();
            if shared.closed {
                debug!(view = %self.view, "Refresh on closed view ignored");
                return PendingFetch {
                    request_id: shared.state.request_id,
                    handle: None,
                };
            }
            let next = RequestId(shared.state.request_id.0 + 1);
            shared.state.request_id = next;
            shared.state.status = FetchStatus::Loading;
            next
        };

        debug!(view = %self.view, %request_id, "Refresh issued");
        self.events.publish(ViewEvent::FetchStarted {
            view: self.view,
            request_id,
        });

        let load = (self.loader)(self.client.clone());
        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let view = self.view;

        let handle = tokio::spawn(async move {
            let result = load.await;
            settle(&shared, &events, view, request_id, result)
        });

        PendingFetch {
            request_id,
            handle: Some(handle),
        }
    }

    /// Tear down: later responses are discarded and refreshes are ignored.
    /// In-flight requests are not aborted at the transport level.
    pub fn close(&self) {
        self.shared.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }
}

impl<T: Clone + Send + 'static> Refresh for FetchCoordinator<T> {
    fn view(&self) -> ViewId {
        self.view
    }

    fn trigger(&self) -> RequestId {
        self.refresh().request_id
    }
}

/// Apply `result` if `request_id` is still authoritative
fn settle<T>(
    shared: &Mutex<Shared<T>>,
    events: &EventBus,
    view: ViewId,
    request_id: RequestId,
    result: Result<T, ApiError>,
) -> bool {
    let mut guard = shared.lock();
    if guard.closed || guard.state.request_id != request_id {
        let latest = guard.state.request_id;
        let closed = guard.closed;
        drop(guard);
        debug!(view = %view, %request_id, %latest, closed, "Discarding stale response");
        events.publish(ViewEvent::FetchDiscarded { view, request_id });
        return false;
    }

    let state = &mut guard.state;
    match result {
        Ok(data) => {
            state.status = FetchStatus::Success;
            state.data = Some(data);
            state.error = None;
        }
        Err(e) => {
            warn!(view = %view, %request_id, error = %e, "Fetch failed");
            state.status = FetchStatus::Error;
            state.error = Some(e.to_string());
        }
    }
    let status = state.status;
    drop(guard);

    events.publish(ViewEvent::FetchSettled {
        view,
        request_id,
        status,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawResponse;
    use crate::testing::ScriptedTransport;
    use callboard_types::{AnalyticsBundle, AnalyticsSummary};
    use futures::FutureExt;

    fn summary_coordinator(transport: &ScriptedTransport) -> FetchCoordinator<AnalyticsSummary> {
        let client = ApiClient::new(Arc::new(transport.clone()));
        FetchCoordinator::new(
            ViewId::Dashboard,
            client,
            EventBus::default_capacity(),
            |client: ApiClient| async move { client.analytics().await }.boxed(),
        )
    }

    fn summary_json(total: u64) -> String {
        format!(r#"{{"total_calls": {}, "answered_calls": 0}}"#, total)
    }

    #[tokio::test]
    async fn test_initial_state_is_idle() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);

        let state = coordinator.state();
        assert_eq!(state.status, FetchStatus::Idle);
        assert_eq!(state.request_id, RequestId(0));
        assert!(state.data.is_none());
    }

    #[tokio::test]
    async fn test_refresh_success() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);

        let pending = coordinator.refresh();
        assert_eq!(pending.request_id, RequestId(1));
        assert!(coordinator.state().is_loading());

        transport.next_request().await.respond_json(&summary_json(5));
        assert!(pending.settled().await);

        let state = coordinator.state();
        assert_eq!(state.status, FetchStatus::Success);
        assert_eq!(state.data.unwrap().total_calls, 5);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_out_of_order_responses_keep_latest() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);

        let first = coordinator.refresh();
        let second = coordinator.refresh();
        assert_eq!(first.request_id, RequestId(1));
        assert_eq!(second.request_id, RequestId(2));

        let request_1 = transport.next_request().await;
        let request_2 = transport.next_request().await;

        // Resolve 2 first, then 1
        request_2.respond_json(&summary_json(2));
        assert!(second.settled().await);
        request_1.respond_json(&summary_json(1));
        assert!(!first.settled().await);

        let state = coordinator.state();
        assert_eq!(state.status, FetchStatus::Success);
        assert_eq!(state.data.unwrap().total_calls, 2);
        assert_eq!(state.request_id, RequestId(2));
    }

    #[tokio::test]
    async fn test_stale_response_does_not_end_loading() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);

        let first = coordinator.refresh();
        let _second = coordinator.refresh();

        let request_1 = transport.next_request().await;
        let _request_2 = transport.next_request().await;

        request_1.respond_json(&summary_json(1));
        assert!(!first.settled().await);

        // Request 2 is still outstanding
        let state = coordinator.state();
        assert_eq!(state.status, FetchStatus::Loading);
        assert!(state.data.is_none());
    }

    #[tokio::test]
    async fn test_stale_failure_is_ignored() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);

        let first = coordinator.refresh();
        let second = coordinator.refresh();
        let request_1 = transport.next_request().await;
        let request_2 = transport.next_request().await;

        request_2.respond_json(&summary_json(9));
        second.settled().await;
        request_1.fail("connection reset");
        assert!(!first.settled().await);

        let state = coordinator.state();
        assert_eq!(state.status, FetchStatus::Success);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_late_success_after_latest_failure_is_discarded() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);

        let pending = coordinator.refresh();
        transport.next_request().await.respond_json(&summary_json(3));
        assert!(pending.settled().await);

        let older = coordinator.refresh();
        let latest = coordinator.refresh();
        let latest_id = latest.request_id;
        let request_older = transport.next_request().await;
        let request_latest = transport.next_request().await;

        // Only the latest request may touch the state, even when it fails
        request_latest.respond(RawResponse::new(500, r#"{"detail": "boom"}"#));
        assert!(latest.settled().await);
        request_older.respond_json(&summary_json(7));
        assert!(!older.settled().await);

        let state = coordinator.state();
        assert_eq!(state.status, FetchStatus::Error);
        assert_eq!(state.request_id, latest_id);
        assert_eq!(state.error.as_deref(), Some("analytics summary: HTTP 500: boom"));
        assert_eq!(state.data.unwrap().total_calls, 3);
    }

    #[tokio::test]
    async fn test_failure_keeps_last_known_good() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);

        let pending = coordinator.refresh();
        transport.next_request().await.respond_json(&summary_json(3));
        pending.settled().await;

        let pending = coordinator.refresh();
        transport
            .next_request()
            .await
            .respond(RawResponse::new(503, r#"{"detail": "database locked"}"#));
        assert!(pending.settled().await);

        let state = coordinator.state();
        assert_eq!(state.status, FetchStatus::Error);
        assert_eq!(
            state.error.as_deref(),
            Some("analytics summary: HTTP 503: database locked")
        );
        assert_eq!(state.data.unwrap().total_calls, 3);
    }

    #[tokio::test]
    async fn test_success_after_error_clears_message() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);

        let pending = coordinator.refresh();
        transport.next_request().await.fail("dns failure");
        pending.settled().await;
        assert_eq!(coordinator.state().status, FetchStatus::Error);

        let pending = coordinator.refresh();
        transport.next_request().await.respond_json(&summary_json(1));
        pending.settled().await;

        let state = coordinator.state();
        assert_eq!(state.status, FetchStatus::Success);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_closed_coordinator_discards_in_flight_response() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);

        let pending = coordinator.refresh();
        let request = transport.next_request().await;
        coordinator.close();
        request.respond_json(&summary_json(4));

        assert!(!pending.settled().await);
        assert!(coordinator.state().data.is_none());

        // Further refreshes are not issued
        let ignored = coordinator.refresh();
        assert_eq!(ignored.request_id, RequestId(1));
        assert!(!ignored.settled().await);
        assert_eq!(transport.issued(), 1);
    }

    #[tokio::test]
    async fn test_fan_out_partial_failure_is_atomic() {
        let transport = ScriptedTransport::new();
        let client = ApiClient::new(Arc::new(transport.clone()));
        let coordinator: FetchCoordinator<AnalyticsBundle> = FetchCoordinator::new(
            ViewId::Analytics,
            client,
            EventBus::default_capacity(),
            |client: ApiClient| async move { client.analytics_bundle(7).await }.boxed(),
        );

        // First fetch: both parts succeed
        let pending = coordinator.refresh();
        for _ in 0..2 {
            let request = transport.next_request().await;
            if request.path == "/api/analytics/daily" {
                request.respond_json(
                    r#"[{"date": "2024-01-02", "total_calls": 3, "avg_duration": 10}]"#,
                );
            } else {
                request.respond_json(r#"[{"intent": "billing", "count": 3, "avg_duration": 10}]"#);
            }
        }
        assert!(pending.settled().await);
        let good = coordinator.state().data.unwrap();

        // Second fetch: daily succeeds, intents fail
        let pending = coordinator.refresh();
        for _ in 0..2 {
            let request = transport.next_request().await;
            if request.path == "/api/analytics/daily" {
                request.respond_json(
                    r#"[{"date": "2024-01-03", "total_calls": 8, "avg_duration": 1}]"#,
                );
            } else {
                request.respond(RawResponse::new(500, "Internal Server Error"));
            }
        }
        assert!(pending.settled().await);

        let state = coordinator.state();
        assert_eq!(state.status, FetchStatus::Error);
        assert!(state.error.unwrap().starts_with("intent analytics"));
        assert_eq!(state.data.unwrap(), good);
    }

    #[tokio::test]
    async fn test_events_published_for_settle_and_discard() {
        let transport = ScriptedTransport::new();
        let coordinator = summary_coordinator(&transport);
        let mut rx = coordinator.events.subscribe();

        let first = coordinator.refresh();
        let second = coordinator.refresh();
        let request_1 = transport.next_request().await;
        let request_2 = transport.next_request().await;
        request_1.respond_json(&summary_json(1));
        first.settled().await;
        request_2.respond_json(&summary_json(2));
        second.settled().await;

        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        assert_eq!(
            events,
            vec![
                ViewEvent::FetchStarted {
                    view: ViewId::Dashboard,
                    request_id: RequestId(1)
                },
                ViewEvent::FetchStarted {
                    view: ViewId::Dashboard,
                    request_id: RequestId(2)
                },
                ViewEvent::FetchDiscarded {
                    view: ViewId::Dashboard,
                    request_id: RequestId(1)
                },
                ViewEvent::FetchSettled {
                    view: ViewId::Dashboard,
                    request_id: RequestId(2),
                    status: FetchStatus::Success
                },
            ]
        );
    }
}
