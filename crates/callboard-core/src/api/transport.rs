//! Transport seam between the API client and the network
//!
//! `HttpTransport` talks to the real backend with reqwest. Anything else that
//! can answer `GET path?query` (test doubles, recorded fixtures) implements
//! [`Transport`] instead.

use futures::future::BoxFuture;
use futures::FutureExt;
use std::time::Duration;

/// Raw backend answer before status checking and decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 response with a JSON body
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::new(200, body.into().into_bytes())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network-level failure (no HTTP status was received)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub message: String,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Issues GET requests against the backend
pub trait Transport: Send + Sync + 'static {
    fn get(
        &self,
        path: String,
        query: Vec<(&'static str, String)>,
    ) -> BoxFuture<'static, Result<RawResponse, TransportFailure>>;
}

/// reqwest-backed transport rooted at a base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` (trailing slashes are ignored)
    ///
    /// No request timeout is configured: a hung request keeps its view in
    /// the loading state until it resolves or the view is torn down.
    pub fn new(base_url: &str) -> Result<Self, TransportFailure> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("callboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportFailure::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn get(
        &self,
        path: String,
        query: Vec<(&'static str, String)>,
    ) -> BoxFuture<'static, Result<RawResponse, TransportFailure>> {
        let request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query);

        async move {
            let response = request
                .send()
                .await
                .map_err(|e| TransportFailure::new(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportFailure::new(e.to_string()))?;

            Ok(RawResponse {
                status,
                body: body.to_vec(),
            })
        }
        .boxed()
    }
}
