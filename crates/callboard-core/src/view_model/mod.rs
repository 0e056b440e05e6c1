//! View-Model Reducer
//!
//! Pure functions from accepted payloads (plus view-local parameters) to
//! display-ready structures. Nothing here holds state: a view model is rebuilt
//! wholesale every time it is read.

pub mod analytics;
pub mod calls;
pub mod dashboard;
pub mod format;
pub mod records;
pub mod settings;

pub use analytics::{AnalyticsView, DailyPoint, IntentSlice, CHART_PALETTE};
pub use calls::{CallDetailView, CallRow, CallsView};
pub use dashboard::{DashboardView, IntentShareRow, IssueRow, StatCard};
pub use format::{
    format_duration, format_percentage, format_seconds, format_timestamp, percentage, StatusBadge,
};
pub use records::{customer_rows, ticket_rows, CustomerRow, TicketRow};
pub use settings::{SettingField, SettingsGroup, SettingsView};

use serde::Serialize;

/// Display model of whichever view is active
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewModel {
    Dashboard(DashboardView),
    Calls(CallsView),
    Analytics(AnalyticsView),
    Settings(SettingsView),
}
