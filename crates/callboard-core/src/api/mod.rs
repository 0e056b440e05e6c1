//! API Client for the call-center backend
//!
//! - `endpoint`: static route descriptors and request parameters
//! - `transport`: the network seam (reqwest implementation)
//! - `client`: typed calls with status checking and JSON decoding

pub mod client;
pub mod endpoint;
pub mod transport;

pub use client::ApiClient;
pub use endpoint::{ApiRequest, Endpoint, EndpointDescriptor, Page, DEFAULT_DAYS, DEFAULT_LIMIT};
pub use transport::{HttpTransport, RawResponse, Transport, TransportFailure};
