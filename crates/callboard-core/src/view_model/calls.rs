//! Call history rows and the single-call detail

use super::format::{format_duration, format_timestamp, or_placeholder, StatusBadge};
use callboard_types::CallRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRow {
    pub id: i64,
    pub caller: String,
    pub started: String,
    pub duration: String,
    pub intent: String,
    pub status: String,
    pub badge: StatusBadge,
}

impl CallRow {
    pub fn from_record(call: &CallRecord) -> Self {
        Self {
            id: call.id,
            caller: or_placeholder(call.caller_number.as_deref(), "Unknown"),
            started: format_timestamp(call.start_time),
            duration: format_duration(call.duration),
            intent: or_placeholder(call.intent.as_deref(), "N/A"),
            status: or_placeholder(call.status.as_deref(), "unknown"),
            badge: StatusBadge::for_status(call.status.as_deref()),
        }
    }
}

/// Call history, in the order the API returned it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallsView {
    pub rows: Vec<CallRow>,
}

impl CallsView {
    pub fn from_records(calls: &[CallRecord]) -> Self {
        Self {
            rows: calls.iter().map(CallRow::from_record).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallDetailView {
    #[serde(flatten)]
    pub row: CallRow,
    pub ended: String,
    pub resolution: String,
    pub transcript: Option<String>,
}

impl CallDetailView {
    pub fn from_record(call: &CallRecord) -> Self {
        Self {
            row: CallRow::from_record(call),
            ended: format_timestamp(call.end_time),
            resolution: or_placeholder(call.resolution_status.as_deref(), "N/A"),
            transcript: call.transcript.clone().filter(|t| !t.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> CallRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_row_fallbacks() {
        let row = CallRow::from_record(&record(r#"{"id": 3}"#));
        assert_eq!(row.caller, "Unknown");
        assert_eq!(row.started, "N/A");
        assert_eq!(row.duration, "N/A");
        assert_eq!(row.intent, "N/A");
        assert_eq!(row.badge, StatusBadge::Info);
    }

    #[test]
    fn test_row_formatting() {
        let row = CallRow::from_record(&record(
            r#"{
                "id": 7, "caller_number": "+15550100",
                "start_time": "2024-05-02T14:30:00", "duration": 125,
                "intent": "billing", "status": "completed"
            }"#,
        ));
        assert_eq!(row.caller, "+15550100");
        assert_eq!(row.started, "2024-05-02 14:30:00");
        assert_eq!(row.duration, "2:05");
        assert_eq!(row.badge, StatusBadge::Success);
    }

    #[test]
    fn test_rows_keep_api_order() {
        let calls = vec![
            record(r#"{"id": 9, "status": "failed"}"#),
            record(r#"{"id": 2, "status": "in_progress"}"#),
        ];
        let view = CallsView::from_records(&calls);
        let ids: Vec<_> = view.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![9, 2]);
        assert_eq!(view.rows[0].badge, StatusBadge::Danger);
        assert_eq!(view.rows[1].badge, StatusBadge::Warning);
    }

    #[test]
    fn test_detail_view() {
        let detail = CallDetailView::from_record(&record(
            r#"{"id": 1, "end_time": "2024-05-02T14:32:05", "transcript": "Caller: hi"}"#,
        ));
        assert_eq!(detail.ended, "2024-05-02 14:32:05");
        assert_eq!(detail.resolution, "N/A");
        assert_eq!(detail.transcript.as_deref(), Some("Caller: hi"));

        let detail = CallDetailView::from_record(&record(r#"{"id": 1, "transcript": "  "}"#));
        assert!(detail.transcript.is_none());
    }
}
