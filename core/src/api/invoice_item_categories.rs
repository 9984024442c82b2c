//! Invoice item categories: `/invoice_item_categories`.

use serde_json::Value;

use crate::dates::DateParam;
use crate::error::Result;
use crate::layer::{extract_list, item_path, ApiResponse, Payload, RequestLayer};
use crate::query::QueryBuilder;
use crate::validate;

const PATH: &str = "/invoice_item_categories";

#[derive(Debug, Clone, Default)]
pub struct InvoiceItemCategoryFilter {
    pub updated_since: Option<DateParam>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone, Copy)]
pub struct InvoiceItemCategories<'a> {
    api: &'a dyn RequestLayer,
}

impl<'a> InvoiceItemCategories<'a> {
    pub fn new(api: &'a dyn RequestLayer) -> Self {
        Self { api }
    }

    pub fn all(&self, filter: &InvoiceItemCategoryFilter) -> Result<Vec<Value>> {
        let query = QueryBuilder::new()
            .timestamp("updated_since", filter.updated_since.as_ref())
            .value("page", filter.page)
            .value("per_page", filter.per_page)
            .build();
        extract_list(self.api.get(PATH, &query)?, "invoice_item_categories")
    }

    pub fn show(&self, category_id: u64) -> Result<ApiResponse> {
        self.api.get(&item_path(PATH, category_id), &[])
    }

    pub fn create(&self, payload: &Payload) -> Result<ApiResponse> {
        validate::require_string(payload, "name")?;
        self.api.post(PATH, payload)
    }

    pub fn update(&self, category_id: u64, payload: &Payload) -> Result<ApiResponse> {
        self.api.patch(&item_path(PATH, category_id), payload)
    }

    /// The server refuses while `use_as_service` or `use_as_expense` is set.
    pub fn remove(&self, category_id: u64) -> Result<ApiResponse> {
        self.api.delete(&item_path(PATH, category_id))
    }
}
