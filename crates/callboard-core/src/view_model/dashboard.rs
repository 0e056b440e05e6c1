//! Dashboard overview: stat cards plus intent and issue tables

use super::format::{format_percentage, format_seconds, percentage};
use callboard_types::AnalyticsSummary;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    /// Caption under the value ("75.0% answer rate", "3 open", ...)
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntentShareRow {
    pub intent: String,
    pub count: u64,
    /// Share of all calls, e.g. "12.5%"
    pub share: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueRow {
    pub issue: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<StatCard>,
    pub answer_rate: f64,
    pub resolution_rate: f64,
    /// API order
    pub intents: Vec<IntentShareRow>,
    /// API order
    pub top_issues: Vec<IssueRow>,
    pub has_intents: bool,
    pub has_issues: bool,
}

impl DashboardView {
    pub fn from_summary(summary: &AnalyticsSummary) -> Self {
        let answer_rate = percentage(summary.answered_calls, summary.total_calls);
        let resolution_rate = percentage(summary.resolved_tickets, summary.total_tickets);

        let cards = vec![
            StatCard {
                title: "Total Calls",
                value: summary.total_calls.to_string(),
                caption: "All time".to_string(),
            },
            StatCard {
                title: "Answered Calls",
                value: summary.answered_calls.to_string(),
                caption: format!("{} answer rate", format_percentage(answer_rate)),
            },
            StatCard {
                title: "Avg Duration",
                value: format_seconds(summary.avg_duration),
                caption: "Per call".to_string(),
            },
            StatCard {
                title: "Recent Calls",
                value: summary.recent_calls_24h.to_string(),
                caption: "Last 24 hours".to_string(),
            },
            StatCard {
                title: "Total Tickets",
                value: summary.total_tickets.to_string(),
                caption: format!("{} open", summary.open_tickets),
            },
            StatCard {
                title: "Resolved Tickets",
                value: summary.resolved_tickets.to_string(),
                caption: format!("{} resolution rate", format_percentage(resolution_rate)),
            },
        ];

        let intents: Vec<IntentShareRow> = summary
            .intents
            .iter()
            .map(|entry| IntentShareRow {
                intent: entry.label.clone(),
                count: entry.count,
                share: format_percentage(percentage(entry.count, summary.total_calls)),
            })
            .collect();

        let top_issues: Vec<IssueRow> = summary
            .top_issues
            .iter()
            .map(|entry| IssueRow {
                issue: entry.label.clone(),
                count: entry.count,
            })
            .collect();

        Self {
            cards,
            answer_rate,
            resolution_rate,
            has_intents: !intents.is_empty(),
            has_issues: !top_issues.is_empty(),
            intents,
            top_issues,
        }
    }

    pub fn card(&self, title: &str) -> Option<&StatCard> {
        self.cards.iter().find(|c| c.title == title)
    }
}
