//! Typed API client
//!
//! Turns an [`ApiRequest`] into a decoded payload. Status checking and JSON
//! decoding live here so every failure leaves as an [`ApiError`]. No retry and
//! no caching: recovery is the fetch coordinator's job.

use super::endpoint::{ApiRequest, Page};
use super::transport::{HttpTransport, Transport};
use crate::error::ApiError;
use callboard_types::{
    AnalyticsBundle, AnalyticsSummary, CallRecord, Customer, DailyStat, IntentStat, Ticket,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Longest slice of an error body echoed into messages
const MAX_ERROR_BODY: usize = 200;

/// Cheap to clone: all clones share one transport
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client talking HTTP to `base_url`
    pub fn http(base_url: &str) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(base_url)
            .map_err(|e| ApiError::transport("http client", e.message))?;
        Ok(Self::new(Arc::new(transport)))
    }

    /// Issue `request` and decode the body into `R`
    pub async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let endpoint = request.endpoint().name();
        let path = request.path();
        debug!(endpoint, path = %path, "Issuing API request");

        let response = self
            .transport
            .get(path, request.query())
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e.message, "API transport failure");
                ApiError::transport(endpoint, e.message)
            })?;

        if !response.is_success() {
            let message = error_detail(&response.body);
            warn!(endpoint, status = response.status, "API returned error status");
            return Err(ApiError::http_status(endpoint, response.status, message));
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            warn!(endpoint, error = %e, "API response did not match schema");
            ApiError::decode(endpoint, e.to_string())
        })
    }

    pub async fn analytics(&self) -> Result<AnalyticsSummary, ApiError> {
        self.call(ApiRequest::Analytics).await
    }

    pub async fn daily_analytics(&self, days: u32) -> Result<Vec<DailyStat>, ApiError> {
        self.call(ApiRequest::DailyAnalytics { days }).await
    }

    pub async fn intent_analytics(&self) -> Result<Vec<IntentStat>, ApiError> {
        self.call(ApiRequest::IntentAnalytics).await
    }

    /// Daily series and intent breakdown, fetched concurrently
    ///
    /// All-or-nothing: the first failing sub-request fails the whole bundle.
    pub async fn analytics_bundle(&self, days: u32) -> Result<AnalyticsBundle, ApiError> {
        let (daily, intents) =
            tokio::try_join!(self.daily_analytics(days), self.intent_analytics())?;
        Ok(AnalyticsBundle {
            days,
            daily,
            intents,
        })
    }

    pub async fn calls(&self, page: Page) -> Result<Vec<CallRecord>, ApiError> {
        self.call(ApiRequest::Calls(page)).await
    }

    pub async fn call_detail(&self, call_id: i64) -> Result<CallRecord, ApiError> {
        self.call(ApiRequest::CallDetail { call_id }).await
    }

    pub async fn customers(&self, page: Page) -> Result<Vec<Customer>, ApiError> {
        self.call(ApiRequest::Customers(page)).await
    }

    pub async fn tickets(&self, page: Page) -> Result<Vec<Ticket>, ApiError> {
        self.call(ApiRequest::Tickets(page)).await
    }
}

/// Human-readable message for a non-2xx body
///
/// FastAPI errors look like `{"detail": "Call not found"}`; anything else is
/// echoed verbatim, truncated.
fn error_detail(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct Detail {
        detail: serde_json::Value,
    }

    if let Ok(parsed) = serde_json::from_slice::<Detail>(body) {
        return match parsed.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return "empty response body".to_string();
    }
    text.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::testing::StaticTransport;

    #[tokio::test]
    async fn test_decodes_summary() {
        let transport = StaticTransport::new()
            .with_ok("/api/analytics", r#"{"total_calls": 4, "answered_calls": 3}"#);
        let client = ApiClient::new(Arc::new(transport));

        let summary = client.analytics().await.unwrap();
        assert_eq!(summary.total_calls, 4);
        assert_eq!(summary.answered_calls, 3);
    }

    #[tokio::test]
    async fn test_passes_query_through() {
        let transport = StaticTransport::new().with_ok("/api/calls", "[]");
        let client = ApiClient::new(Arc::new(transport.clone()));

        client.calls(Page::new(5, 25)).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "/api/calls");
        assert_eq!(
            requests[0].1,
            vec![("skip", "5".to_string()), ("limit", "25".to_string())]
        );
    }

    #[tokio::test]
    async fn test_non_2xx_is_http_status_error() {
        let transport = StaticTransport::new().with_response(
            "/api/calls/99",
            404,
            r#"{"detail": "Call not found"}"#,
        );
        let client = ApiClient::new(Arc::new(transport));

        let err = client.call_detail(99).await.unwrap_err();
        assert_eq!(err.endpoint, "call detail");
        assert_eq!(
            err.kind,
            ApiErrorKind::HttpStatus {
                status: 404,
                message: "Call not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let transport = StaticTransport::new().with_ok("/api/analytics/intents", "{not json");
        let client = ApiClient::new(Arc::new(transport));

        let err = client.intent_analytics().await.unwrap_err();
        assert_eq!(err.endpoint, "intent analytics");
        assert!(matches!(err.kind, ApiErrorKind::Decode { .. }));
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_decode_error() {
        // Object where a sequence is expected
        let transport = StaticTransport::new().with_ok("/api/analytics/daily", r#"{"days": 7}"#);
        let client = ApiClient::new(Arc::new(transport));

        let err = client.daily_analytics(7).await.unwrap_err();
        assert!(matches!(err.kind, ApiErrorKind::Decode { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_transport_error() {
        // Unregistered path -> transport failure
        let client = ApiClient::new(Arc::new(StaticTransport::new()));

        let err = client.tickets(Page::default()).await.unwrap_err();
        assert_eq!(err.endpoint, "tickets list");
        assert!(matches!(err.kind, ApiErrorKind::Transport { .. }));
    }

    #[tokio::test]
    async fn test_bundle_fails_when_any_part_fails() {
        let transport = StaticTransport::new()
            .with_ok(
                "/api/analytics/daily",
                r#"[{"date": "2024-01-01", "total_calls": 1, "avg_duration": 3.0}]"#,
            )
            .with_response("/api/analytics/intents", 500, r#"{"detail": "boom"}"#);
        let client = ApiClient::new(Arc::new(transport));

        let err = client.analytics_bundle(7).await.unwrap_err();
        assert_eq!(err.endpoint, "intent analytics");
    }

    #[test]
    fn test_error_detail_variants() {
        assert_eq!(error_detail(br#"{"detail": "nope"}"#), "nope");
        assert_eq!(
            error_detail(br#"{"detail": [{"loc": ["query"]}]}"#),
            r#"[{"loc":["query"]}]"#
        );
        assert_eq!(error_detail(b"Bad Gateway"), "Bad Gateway");
        assert_eq!(error_detail(b"  "), "empty response body");
        assert_eq!(error_detail(&[b'x'; 500]).len(), MAX_ERROR_BODY);
    }
}
