//! Call records from `GET /api/calls` and `GET /api/calls/{id}`

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single call handled by the call-center agent
///
/// Everything except `id` may be absent: calls still in progress have no
/// end time or duration, and unclassified calls have no intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: i64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub caller_number: Option<String>,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    /// Duration in whole seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub intent: Option<String>,
    /// in_progress, completed, failed
    #[serde(default)]
    pub status: Option<String>,
    /// resolved, pending, escalated
    #[serde(default)]
    pub resolution_status: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub recording_path: Option<String>,
}
