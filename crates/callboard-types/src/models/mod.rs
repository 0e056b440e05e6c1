//! Payload models, one module per backend resource

pub mod analytics;
pub mod call;
pub mod customer;
pub mod ticket;

pub use analytics::{AnalyticsBundle, AnalyticsSummary, CountEntry, DailyStat, IntentStat};
pub use call::CallRecord;
pub use customer::Customer;
pub use ticket::Ticket;
