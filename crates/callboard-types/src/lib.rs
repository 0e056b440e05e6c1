//! callboard-types - Backend payload types for callboard
//!
//! This crate contains the decoded shape of every call-center API response.
//! No tokio, no HTTP client - just serde-deserializable types.
//!
//! Used by:
//! - callboard-core (API client, reducers)
//! - callboard (CLI, through callboard-core)

pub mod models;

pub use models::{
    AnalyticsBundle, AnalyticsSummary, CallRecord, CountEntry, Customer, DailyStat, IntentStat,
    Ticket,
};
