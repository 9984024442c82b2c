//! Tasks: `/tasks`.

use serde_json::Value;

use crate::dates::DateParam;
use crate::error::Result;
use crate::layer::{extract_list, item_path, ApiResponse, Payload, RequestLayer};
use crate::query::QueryBuilder;
use crate::validate;

const PATH: &str = "/tasks";

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// `true` for active tasks only, `false` for inactive only.
    pub is_active: Option<bool>,
    pub updated_since: Option<DateParam>,
    pub from: Option<DateParam>,
    pub to: Option<DateParam>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone, Copy)]
pub struct Tasks<'a> {
    api: &'a dyn RequestLayer,
}

impl<'a> Tasks<'a> {
    pub fn new(api: &'a dyn RequestLayer) -> Self {
        Self { api }
    }

    pub fn all(&self, filter: &TaskFilter) -> Result<Vec<Value>> {
        let query = QueryBuilder::new()
            .flag("is_active", filter.is_active)
            .timestamp("updated_since", filter.updated_since.as_ref())
            .date("from", filter.from.as_ref())
            .date("to", filter.to.as_ref())
            .value("page", filter.page)
            .value("per_page", filter.per_page)
            .build();
        extract_list(self.api.get(PATH, &query)?, "tasks")
    }

    pub fn show(&self, task_id: u64) -> Result<ApiResponse> {
        self.api.get(&item_path(PATH, task_id), &[])
    }

    pub fn create(&self, payload: &Payload) -> Result<ApiResponse> {
        validate::require_string(payload, "name")?;
        self.api.post(PATH, payload)
    }

    pub fn update(&self, task_id: u64, payload: &Payload) -> Result<ApiResponse> {
        self.api.patch(&item_path(PATH, task_id), payload)
    }

    /// Only possible for tasks without time entries; the server decides.
    pub fn remove(&self, task_id: u64) -> Result<ApiResponse> {
        self.api.delete(&item_path(PATH, task_id))
    }
}
