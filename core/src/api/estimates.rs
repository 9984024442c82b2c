//! Estimates: `/estimates`.
//!
//! Besides plain CRUD, an estimate moves through `draft → sent →
//! accepted/declined` by posting an event message to
//! `/estimates/{id}/messages`. The state change itself happens server-side.

use serde_json::{json, Value};

use crate::api::EstimateMessages;
use crate::dates::DateParam;
use crate::error::{HarvestError, Result};
use crate::layer::{extract_list, item_path, ApiResponse, Payload, RequestLayer};
use crate::query::{QueryBuilder, QueryPairs};
use crate::validate;

const PATH: &str = "/estimates";

/// Accepted values for the `state` filter.
pub const ESTIMATE_STATES: [&str; 4] = ["draft", "sent", "accepted", "declined"];

/// Filters for [`Estimates::all`].
#[derive(Debug, Clone, Default)]
pub struct EstimateFilter {
    /// Only estimates belonging to this client.
    pub client_id: Option<u64>,
    /// Only estimates updated since this moment.
    pub updated_since: Option<DateParam>,
    /// Only estimates with an `issue_date` on or after this date.
    pub from: Option<DateParam>,
    /// Only estimates with an `issue_date` on or before this date.
    pub to: Option<DateParam>,
    /// One of [`ESTIMATE_STATES`]; anything else is rejected before sending.
    pub state: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl EstimateFilter {
    fn to_query(&self) -> Result<QueryPairs> {
        if let Some(state) = &self.state {
            if !ESTIMATE_STATES.contains(&state.as_str()) {
                return Err(HarvestError::InvalidArgument(format!(
                    "The \"state\" parameter must be one out of: {}.",
                    ESTIMATE_STATES.join(", ")
                )));
            }
        }

        Ok(QueryBuilder::new()
            .value("client_id", self.client_id)
            .timestamp("updated_since", self.updated_since.as_ref())
            .date("from", self.from.as_ref())
            .date("to", self.to.as_ref())
            .value("state", self.state.as_deref())
            .value("page", self.page)
            .value("per_page", self.per_page)
            .build())
    }
}

/// Client for the estimates endpoint.
#[derive(Clone, Copy)]
pub struct Estimates<'a> {
    api: &'a dyn RequestLayer,
}

impl<'a> Estimates<'a> {
    pub fn new(api: &'a dyn RequestLayer) -> Self {
        Self { api }
    }

    /// Lists estimates matching `filter`, most recently issued first.
    ///
    /// Fails with `InvalidArgument` for an unknown `state` and with `Runtime`
    /// when the response carries no `estimates` list.
    pub fn all(&self, filter: &EstimateFilter) -> Result<Vec<Value>> {
        let query = filter.to_query()?;
        extract_list(self.api.get(PATH, &query)?, "estimates")
    }

    pub fn show(&self, estimate_id: u64) -> Result<ApiResponse> {
        self.api.get(&item_path(PATH, estimate_id), &[])
    }

    /// Creates an estimate. `client_id` must be a non-zero integer.
    pub fn create(&self, payload: &Payload) -> Result<ApiResponse> {
        validate::require_integer(payload, "client_id")?;
        self.api.post(PATH, payload)
    }

    /// Sends only the given fields; anything omitted is left unchanged.
    pub fn update(&self, estimate_id: u64, payload: &Payload) -> Result<ApiResponse> {
        self.api.patch(&item_path(PATH, estimate_id), payload)
    }

    pub fn remove(&self, estimate_id: u64) -> Result<ApiResponse> {
        self.api.delete(&item_path(PATH, estimate_id))
    }

    /// Marks a draft estimate as sent.
    pub fn send(&self, estimate_id: u64) -> Result<ApiResponse> {
        self.event(estimate_id, "send")
    }

    /// Marks an open estimate as accepted.
    pub fn accept(&self, estimate_id: u64) -> Result<ApiResponse> {
        self.event(estimate_id, "accept")
    }

    /// Marks an open estimate as declined.
    pub fn decline(&self, estimate_id: u64) -> Result<ApiResponse> {
        self.event(estimate_id, "decline")
    }

    /// Re-opens a closed estimate.
    pub fn reopen(&self, estimate_id: u64) -> Result<ApiResponse> {
        self.event(estimate_id, "re-open")
    }

    pub fn messages(&self) -> EstimateMessages<'a> {
        EstimateMessages::new(self.api)
    }

    fn event(&self, estimate_id: u64, event_type: &str) -> Result<ApiResponse> {
        let mut body = Payload::new();
        body.insert("event_type".to_string(), json!(event_type));
        self.api.post(&format!("{}/messages", item_path(PATH, estimate_id)), &body)
    }
}
