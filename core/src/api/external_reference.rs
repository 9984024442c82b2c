//! A time entry's external reference: `/time_entries/{id}/external_reference`.

use crate::error::Result;
use crate::layer::{item_path, ApiResponse, RequestLayer};

#[derive(Clone, Copy)]
pub struct ExternalReference<'a> {
    api: &'a dyn RequestLayer,
}

impl<'a> ExternalReference<'a> {
    pub fn new(api: &'a dyn RequestLayer) -> Self {
        Self { api }
    }

    /// Detaches the external reference; the time entry itself is kept.
    pub fn remove(&self, time_entry_id: u64) -> Result<ApiResponse> {
        let path = format!("{}/external_reference", item_path("/time_entries", time_entry_id));
        self.api.delete(&path)
    }
}
