//! callboard-core - Core library for callboard
//!
//! Provides the API client, fetch coordination, polling, view models and the
//! tab session for the call-center dashboard.

pub mod api;
pub mod config;
pub mod error;
pub mod event;
pub mod fetch;
pub mod poll;
pub mod session;
pub mod settings;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod view_model;

pub use api::{ApiClient, ApiRequest, Endpoint, HttpTransport, Page, Transport};
pub use config::DashboardConfig;
pub use error::{ApiError, ApiErrorKind, CoreError};
pub use event::{EventBus, ViewEvent};
pub use fetch::{FetchCoordinator, FetchState, FetchStatus, PendingFetch, RequestId};
pub use poll::PollingScheduler;
pub use session::{TabSession, ViewId, ViewParams, ViewSnapshot};
pub use settings::DashboardSettings;
pub use view_model::ViewModel;
