//! Analytics: daily series and intent distribution

use super::format::{format_percentage, format_seconds, percentage};
use callboard_types::AnalyticsBundle;
use chrono::NaiveDate;
use serde::Serialize;

/// Legend colours, assigned to intents in order and cycled
pub const CHART_PALETTE: [&str; 5] = ["#667eea", "#764ba2", "#f093fb", "#4facfe", "#43e97b"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub total_calls: u64,
    pub avg_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentSlice {
    pub intent: String,
    pub count: u64,
    /// Share of the summed intent counts
    pub share: String,
    pub color: &'static str,
    pub avg_duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsView {
    /// Day range of the data shown, not of a pending request
    pub days: u32,
    /// Ascending by date
    pub daily: Vec<DailyPoint>,
    /// API order
    pub intents: Vec<IntentSlice>,
    pub total_intent_count: u64,
}

impl AnalyticsView {
    pub fn from_bundle(bundle: &AnalyticsBundle) -> Self {
        let mut daily: Vec<DailyPoint> = bundle
            .daily
            .iter()
            .map(|d| DailyPoint {
                date: d.date,
                total_calls: d.total_calls,
                avg_duration: d.avg_duration,
            })
            .collect();
        // Stable sort keeps API order among equal dates
        daily.sort_by_key(|p| p.date);

        let total_intent_count: u64 = bundle.intents.iter().map(|i| i.count).sum();
        let intents = bundle
            .intents
            .iter()
            .enumerate()
            .map(|(idx, stat)| IntentSlice {
                intent: stat.intent.clone(),
                count: stat.count,
                share: format_percentage(percentage(stat.count, total_intent_count)),
                color: CHART_PALETTE[idx % CHART_PALETTE.len()],
                avg_duration: format_seconds(stat.avg_duration),
            })
            .collect();

        Self {
            days: bundle.days,
            daily,
            intents,
            total_intent_count,
        }
    }

    pub fn total_calls(&self) -> u64 {
        self.daily.iter().map(|p| p.total_calls).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(days: u32, daily: &str, intents: &str) -> AnalyticsBundle {
        AnalyticsBundle {
            days,
            daily: serde_json::from_str(daily).unwrap(),
            intents: serde_json::from_str(intents).unwrap(),
        }
    }

    #[test]
    fn test_daily_sorted_ascending() {
        let view = AnalyticsView::from_bundle(&bundle(
            7,
            r#"[
                {"date": "2024-01-03", "total_calls": 5, "avg_duration": 40},
                {"date": "2024-01-01", "total_calls": 2, "avg_duration": 30},
                {"date": "2024-01-02", "total_calls": 1, "avg_duration": 20}
            ]"#,
            "[]",
        ));
        let dates: Vec<String> = view.daily.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(view.total_calls(), 8);
        assert_eq!(view.days, 7);
    }

    #[test]
    fn test_intents_keep_api_order_and_cycle_palette() {
        let view = AnalyticsView::from_bundle(&bundle(
            30,
            "[]",
            r#"[
                {"intent": "general", "count": 1, "avg_duration": 10},
                {"intent": "billing", "count": 5, "avg_duration": 62.25},
                {"intent": "a", "count": 1, "avg_duration": 0},
                {"intent": "b", "count": 1, "avg_duration": 0},
                {"intent": "c", "count": 1, "avg_duration": 0},
                {"intent": "d", "count": 1, "avg_duration": 0}
            ]"#,
        ));
        assert_eq!(view.intents[0].intent, "general");
        assert_eq!(view.intents[1].intent, "billing");
        assert_eq!(view.intents[1].share, "50.0%");
        assert_eq!(view.intents[1].avg_duration, "62.25s");
        assert_eq!(view.intents[0].color, "#667eea");
        assert_eq!(view.intents[5].color, "#667eea");
        assert_eq!(view.total_intent_count, 10);
    }

    #[test]
    fn test_empty_bundle() {
        let view = AnalyticsView::from_bundle(&AnalyticsBundle {
            days: 14,
            ..Default::default()
        });
        assert_eq!(view.days, 14);
        assert!(view.daily.is_empty());
        assert!(view.intents.is_empty());
        assert_eq!(view.total_intent_count, 0);
    }
}
