//! Event bus for callboard using tokio::broadcast
//!
//! The rendering layer subscribes to learn when a view's fetch state changed
//! and re-reads the view model from the tab session.

use crate::fetch::{FetchStatus, RequestId};
use crate::session::ViewId;
use tokio::sync::broadcast;

/// Events emitted by the synchronization layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// A view became the active tab
    Activated(ViewId),
    /// A view was torn down (timers stopped, fetch state discarded)
    Deactivated(ViewId),
    /// A refresh was issued and the view is loading
    FetchStarted { view: ViewId, request_id: RequestId },
    /// The latest request finished and its result was applied
    FetchSettled {
        view: ViewId,
        request_id: RequestId,
        status: FetchStatus,
    },
    /// A response arrived for a superseded request or a torn-down view
    FetchDiscarded { view: ViewId, request_id: RequestId },
}

/// Event bus for broadcasting view events
///
/// Uses tokio::broadcast for multi-consumer support.
pub struct EventBus {
    sender: broadcast::Sender<ViewEvent>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (256 events)
    pub fn default_capacity() -> Self {
        Self::new(256)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: ViewEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
    }

    /// Subscribe to receive events
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.sender.subscribe()
    }

    /// Get current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
