//! In-memory [`Transport`] doubles
//!
//! `StaticTransport` answers immediately from a route table.
//! `ScriptedTransport` parks every request until the caller releases it,
//! which lets tests resolve concurrent requests in any order.

use crate::api::{RawResponse, Transport, TransportFailure};
use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{oneshot, Notify};

type Query = Vec<(&'static str, String)>;

#[derive(Default)]
struct StaticRoutes {
    routes: HashMap<String, RawResponse>,
    requests: Vec<(String, Query)>,
}

/// Answers each path with a fixed response; unknown paths fail at the transport level
#[derive(Clone, Default)]
pub struct StaticTransport {
    inner: Arc<Mutex<StaticRoutes>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, path: &str, status: u16, body: &str) -> Self {
        self.set_response(path, RawResponse::new(status, body));
        self
    }

    pub fn with_ok(self, path: &str, body: &str) -> Self {
        self.with_response(path, 200, body)
    }

    /// Replace the answer for `path` (affects later requests only)
    pub fn set_response(&self, path: &str, response: RawResponse) {
        self.inner.lock().routes.insert(path.to_string(), response);
    }

    /// Every request seen so far, in issue order
    pub fn requests(&self) -> Vec<(String, Query)> {
        self.inner.lock().requests.clone()
    }

    /// Number of requests issued for `path`
    pub fn count(&self, path: &str) -> usize {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }
}

impl Transport for StaticTransport {
    fn get(
        &self,
        path: String,
        query: Query,
    ) -> BoxFuture<'static, Result<RawResponse, TransportFailure>> {
        let mut inner = self.inner.lock();
        let result = inner
            .routes
            .get(&path)
            .cloned()
            .ok_or_else(|| TransportFailure::new(format!("connection refused: {}", path)));
        inner.requests.push((path, query));
        futures::future::ready(result).boxed()
    }
}

/// A request parked inside [`ScriptedTransport`]
pub struct PendingRequest {
    pub path: String,
    pub query: Query,
    responder: oneshot::Sender<Result<RawResponse, TransportFailure>>,
}

impl PendingRequest {
    pub fn respond(self, response: RawResponse) {
        // Receiver gone means the caller stopped waiting; nothing to do
        let _ = self.responder.send(Ok(response));
    }

    pub fn respond_json(self, body: &str) {
        self.respond(RawResponse::ok_json(body));
    }

    pub fn fail(self, message: &str) {
        let _ = self.responder.send(Err(TransportFailure::new(message)));
    }
}

#[derive(Default)]
struct Script {
    pending: Mutex<VecDeque<PendingRequest>>,
    issued: Mutex<usize>,
    notify: Notify,
}

/// Holds every request until the test answers it
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Script>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next unanswered request, oldest first
    pub async fn next_request(&self) -> PendingRequest {
        loop {
            let notified = self.inner.notify.notified();
            if let Some(request) = self.inner.pending.lock().pop_front() {
                return request;
            }
            notified.await;
        }
    }

    /// Total number of requests issued so far
    pub fn issued(&self) -> usize {
        *self.inner.issued.lock()
    }

    /// Requests issued but not yet taken by [`Self::next_request`]
    pub fn waiting(&self) -> usize {
        self.inner.pending.lock().len()
    }
}

impl Transport for ScriptedTransport {
    fn get(
        &self,
        path: String,
        query: Query,
    ) -> BoxFuture<'static, Result<RawResponse, TransportFailure>> {
        let (responder, receiver) = oneshot::channel();
        self.inner.pending.lock().push_back(PendingRequest {
            path,
            query,
            responder,
        });
        *self.inner.issued.lock() += 1;
        self.inner.notify.notify_one();

        async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(TransportFailure::new("request abandoned")))
        }
        .boxed()
    }
}
