//! Polling Scheduler: periodic refresh timers keyed by view
//!
//! A poll session is a spawned tokio task that calls [`Refresh::trigger`] every
//! interval. At most one session exists per view: `start` refuses a second one,
//! and `stop` aborts the timer task. Ticks and manual refreshes both go through
//! the coordinator's request-id guard, so they never need to coordinate here.

use crate::error::CoreError;
use crate::fetch::Refresh;
use crate::session::ViewId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

/// Refresh interval of the always-on dashboard summary
pub const DEFAULT_DASHBOARD_INTERVAL: Duration = Duration::from_millis(30_000);

struct PollSession {
    interval: Duration,
    timer: JoinHandle<()>,
}

#[derive(Default)]
pub struct PollingScheduler {
    sessions: HashMap<ViewId, PollSession>,
}

impl PollingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start refreshing `target` every `interval`, first tick one interval from now
    ///
    /// Fails with [`CoreError::PollSessionExists`] if `view` already has a
    /// session; the caller must `stop` it first. Must be called inside a tokio
    /// runtime.
    pub fn start(
        &mut self,
        view: ViewId,
        interval: Duration,
        target: Arc<dyn Refresh>,
    ) -> Result<(), CoreError> {
        if self.sessions.contains_key(&view) {
            return Err(CoreError::PollSessionExists { view });
        }
        if interval.is_zero() {
            return Err(CoreError::InvalidConfig {
                message: format!("poll interval for {} must be greater than zero", view),
            });
        }

        let timer = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            // A slow tick must not be followed by a burst of catch-up refreshes
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let request_id = target.trigger();
                trace!(view = %target.view(), %request_id, "Poll tick");
            }
        });

        info!(view = %view, interval_ms = interval.as_millis() as u64, "Poll session started");
        self.sessions.insert(view, PollSession { interval, timer });
        Ok(())
    }

    /// Cancel the timer for `view`. Stopping a view without a session is a no-op.
    ///
    /// Returns `true` if a session was stopped.
    pub fn stop(&mut self, view: ViewId) -> bool {
        match self.sessions.remove(&view) {
            Some(session) => {
                session.timer.abort();
                info!(view = %view, "Poll session stopped");
                true
            }
            None => {
                debug!(view = %view, "No poll session to stop");
                false
            }
        }
    }

    pub fn stop_all(&mut self) {
        for (view, session) in self.sessions.drain() {
            session.timer.abort();
            debug!(view = %view, "Poll session stopped");
        }
    }

    pub fn is_running(&self, view: ViewId) -> bool {
        self.sessions.contains_key(&view)
    }

    pub fn interval(&self, view: ViewId) -> Option<Duration> {
        self.sessions.get(&view).map(|s| s.interval)
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Drop for PollingScheduler {
    fn drop(&mut self) {
        self.stop_all();
    }
}
