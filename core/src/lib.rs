//! Synchronous client core for the Harvest v2 REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller supplies a
//! `Transport` that executes the round trip; everything else is
//! deterministic and testable.
//!
//! # Design
//! - `HarvestClient` holds only configuration and the transport.
//! - Resource clients (`api::*`) borrow it as a `&dyn RequestLayer` and map
//!   each method onto exactly one request.
//! - Resources are opaque `serde_json::Value` records; only the fields
//!   needed to shape a request are inspected.
//!
//! ```
//! use harvest_core::{ClientConfig, HarvestClient, HttpRequest, HttpResponse, BoxError};
//! use harvest_core::api::EstimateFilter;
//!
//! let transport = |_: &HttpRequest| -> Result<HttpResponse, BoxError> {
//!     Ok(HttpResponse {
//!         status: 200,
//!         headers: vec![("content-type".into(), "application/json".into())],
//!         body: r#"{"estimates":[]}"#.into(),
//!     })
//! };
//! let client = HarvestClient::new(ClientConfig::default(), transport);
//! let filter = EstimateFilter { state: Some("sent".into()), ..Default::default() };
//! assert!(client.estimates().all(&filter)?.is_empty());
//! # Ok::<(), harvest_core::HarvestError>(())
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod dates;
pub mod error;
pub mod http;
pub mod layer;
mod query;
pub mod validate;

pub use client::{HarvestClient, Transport};
pub use config::ClientConfig;
pub use dates::DateParam;
pub use error::{BoxError, HarvestError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use layer::{ApiResponse, Payload, RequestLayer};
