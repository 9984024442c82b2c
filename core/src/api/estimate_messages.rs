//! Estimate messages: `/estimates/{estimate_id}/messages`.

use serde_json::Value;

use crate::dates::DateParam;
use crate::error::Result;
use crate::layer::{extract_list, item_path, ApiResponse, Payload, RequestLayer};
use crate::query::QueryBuilder;
use crate::validate;

#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub updated_since: Option<DateParam>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone, Copy)]
pub struct EstimateMessages<'a> {
    api: &'a dyn RequestLayer,
}

impl<'a> EstimateMessages<'a> {
    pub fn new(api: &'a dyn RequestLayer) -> Self {
        Self { api }
    }

    pub fn all(&self, estimate_id: u64, filter: &MessageFilter) -> Result<Vec<Value>> {
        let query = QueryBuilder::new()
            .timestamp("updated_since", filter.updated_since.as_ref())
            .value("page", filter.page)
            .value("per_page", filter.per_page)
            .build();
        extract_list(self.api.get(&messages_path(estimate_id), &query)?, "estimate_messages")
    }

    /// Sends the estimate to `recipients`, which must be a non-empty array of
    /// `{name, email}` objects.
    pub fn create(&self, estimate_id: u64, payload: &Payload) -> Result<ApiResponse> {
        validate::require_array(payload, "recipients")?;
        self.api.post(&messages_path(estimate_id), payload)
    }

    pub fn remove(&self, estimate_id: u64, message_id: u64) -> Result<ApiResponse> {
        self.api.delete(&item_path(&messages_path(estimate_id), message_id))
    }
}

fn messages_path(estimate_id: u64) -> String {
    format!("{}/messages", item_path("/estimates", estimate_id))
}
