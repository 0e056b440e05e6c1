//! Support tickets from `GET /api/tickets`

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub customer_id: i64,
    /// technical_support, billing, account, ...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// open, in_progress, resolved, closed
    #[serde(default)]
    pub status: Option<String>,
    /// low, normal, high, urgent
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub resolved_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_type_field_maps_to_kind() {
        let json = r#"{
            "id": 9, "customer_id": 3, "type": "billing", "status": "open", "priority": "high"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.kind.as_deref(), Some("billing"));
        assert_eq!(ticket.priority.as_deref(), Some("high"));
    }
}
