//! Request builder, response parser, and the `RequestLayer` implementation.
//!
//! # Design
//! `HarvestClient` keeps the split between building an `HttpRequest` and
//! parsing an `HttpResponse`; both halves are public and free of I/O. The
//! `Transport` in between is the only piece that touches the network, and it
//! is supplied by the caller.

use serde_json::Value;
use tracing::debug;

use crate::api::{
    Estimates, ExternalReference, InvoiceItemCategories, Tasks, UserAssignments, Users,
};
use crate::config::ClientConfig;
use crate::error::{BoxError, HarvestError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::layer::{ApiResponse, Payload, RequestLayer};

/// Executes one HTTP round trip. Non-2xx statuses must come back as
/// responses, not errors; `Err` is reserved for failures to get a response.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, BoxError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> std::result::Result<HttpResponse, BoxError>,
{
    fn execute(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
        self(request)
    }
}

/// Entry point: one per account/transport pair. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct HarvestClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> HarvestClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn estimates(&self) -> Estimates<'_> {
        Estimates::new(self)
    }

    pub fn tasks(&self) -> Tasks<'_> {
        Tasks::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn invoice_item_categories(&self) -> InvoiceItemCategories<'_> {
        InvoiceItemCategories::new(self)
    }

    pub fn user_assignments(&self) -> UserAssignments<'_> {
        UserAssignments::new(self)
    }

    pub fn time_entry_external_reference(&self) -> ExternalReference<'_> {
        ExternalReference::new(self)
    }

    /// Builds the request for `path` (relative to the base URL). Query pairs
    /// are percent-encoded and appended in order.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Payload>,
    ) -> Result<HttpRequest> {
        let mut url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }

        let mut headers = vec![("user-agent".to_string(), self.config.user_agent.clone())];
        headers.extend(self.config.default_headers.iter().cloned());

        let body = match body {
            Some(payload) => {
                headers.push(("content-type".to_string(), "application/json".to_string()));
                Some(serde_json::to_string(payload).map_err(|e| HarvestError::Serialization(e.to_string()))?)
            }
            None => None,
        };

        debug!(method = method.as_str(), url = %url, "built request");
        Ok(HttpRequest {
            method,
            path: url,
            headers,
            body,
        })
    }

    /// Any 2xx is success. A JSON content type that decodes yields
    /// `ApiResponse::Json`; everything else is handed back raw.
    pub fn parse_response(&self, response: HttpResponse) -> Result<ApiResponse> {
        debug!(status = response.status, "received response");
        check_status(&response)?;

        let is_json = response
            .content_type()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"));
        if is_json {
            if let Ok(value) = serde_json::from_str::<Value>(&response.body) {
                return Ok(ApiResponse::Json(value));
            }
        }
        Ok(ApiResponse::Raw(response.body))
    }

    fn send(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Payload>,
    ) -> Result<ApiResponse> {
        let request = self.build_request(method, path, query, body)?;
        let response = self.transport.execute(&request).map_err(HarvestError::Transport)?;
        self.parse_response(response)
    }
}

impl<T: Transport> RequestLayer for HarvestClient<T> {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        self.send(HttpMethod::Get, path, query, None)
    }

    fn post(&self, path: &str, body: &Payload) -> Result<ApiResponse> {
        self.send(HttpMethod::Post, path, &[], Some(body))
    }

    fn patch(&self, path: &str, body: &Payload) -> Result<ApiResponse> {
        self.send(HttpMethod::Patch, path, &[], Some(body))
    }

    fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(HttpMethod::Delete, path, &[], None)
    }
}

/// Map non-success status codes to the appropriate `HarvestError` variant.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(HarvestError::NotFound);
    }
    Err(HarvestError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
