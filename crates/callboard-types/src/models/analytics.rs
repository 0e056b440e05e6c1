//! Analytics payloads: summary, daily series and intent breakdown

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Response of `GET /api/analytics`
///
/// Counters missing from the payload default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_calls: u64,
    #[serde(default)]
    pub answered_calls: u64,
    /// Sent by the backend as `total_calls - answered_calls`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missed_calls: Option<u64>,
    /// Average call duration in seconds (rounded to 2 decimals by the backend)
    #[serde(default)]
    pub avg_duration: f64,
    #[serde(default)]
    pub recent_calls_24h: u64,
    #[serde(default)]
    pub total_tickets: u64,
    #[serde(default)]
    pub open_tickets: u64,
    #[serde(default)]
    pub resolved_tickets: u64,
    /// Call count per intent, in backend order
    #[serde(default, with = "ordered_counts")]
    pub intents: Vec<CountEntry>,
    /// Ticket count per ticket type, in backend order
    #[serde(default, with = "ordered_counts")]
    pub top_issues: Vec<CountEntry>,
}

impl AnalyticsSummary {
    /// Missed calls, derived when the backend omits the field
    pub fn missed_calls(&self) -> u64 {
        self.missed_calls
            .unwrap_or_else(|| self.total_calls.saturating_sub(self.answered_calls))
    }
}

/// One `label -> count` pair of a JSON object, keeping its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

impl CountEntry {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// One row of `GET /api/analytics/daily`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    #[serde(default)]
    pub total_calls: u64,
    #[serde(default)]
    pub avg_duration: f64,
}

/// One row of `GET /api/analytics/intents`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentStat {
    pub intent: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub avg_duration: f64,
}

/// Combined payload of the analytics view (daily series + intent breakdown)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsBundle {
    /// Day range the daily series was requested for
    #[serde(default)]
    pub days: u32,
    pub daily: Vec<DailyStat>,
    pub intents: Vec<IntentStat>,
}

/// (De)serializes a JSON object as an ordered list of [`CountEntry`].
///
/// `serde_json::Map` sorts keys, so the object is walked with a visitor
/// to keep the order the backend produced.
mod ordered_counts {
    use super::*;

    pub fn serialize<S>(entries: &[CountEntry], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for entry in entries {
            map.serialize_entry(&entry.label, &entry.count)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<CountEntry>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CountsVisitor)
    }

    struct CountsVisitor;

    impl<'de> Visitor<'de> for CountsVisitor {
        type Value = Vec<CountEntry>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping labels to counts")
        }

        // `{"intents": null}` is treated like an absent field
        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((label, count)) = access.next_entry::<String, u64>()? {
                entries.push(CountEntry { label, count });
            }
            Ok(entries)
        }
    }
}
