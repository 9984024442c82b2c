//! User assignments across all projects: `/user_assignments`.

use serde_json::Value;

use crate::dates::DateParam;
use crate::error::Result;
use crate::layer::{extract_list, RequestLayer};
use crate::query::QueryBuilder;

#[derive(Debug, Clone, Default)]
pub struct UserAssignmentFilter {
    pub is_active: Option<bool>,
    pub updated_since: Option<DateParam>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone, Copy)]
pub struct UserAssignments<'a> {
    api: &'a dyn RequestLayer,
}

impl<'a> UserAssignments<'a> {
    pub fn new(api: &'a dyn RequestLayer) -> Self {
        Self { api }
    }

    pub fn all(&self, filter: &UserAssignmentFilter) -> Result<Vec<Value>> {
        let query = QueryBuilder::new()
            .flag("is_active", filter.is_active)
            .timestamp("updated_since", filter.updated_since.as_ref())
            .value("page", filter.page)
            .value("per_page", filter.per_page)
            .build();
        extract_list(self.api.get("/user_assignments", &query)?, "user_assignments")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::testing::Recorder;
    use serde_json::json;

    #[test]
    fn all_lists_user_assignments() {
        let api = Recorder::answering_json(json!({"user_assignments": [{"id": 130403296}, {"id": 130403297}]}));
        let filter = UserAssignmentFilter {
            is_active: Some(true),
            page: Some(2),
            ..Default::default()
        };
        let assignments = UserAssignments::new(&api).all(&filter).unwrap();
        assert_eq!(assignments.len(), 2);

        let call = api.only_call();
        assert_eq!(call.path, "/user_assignments");
        assert_eq!(
            call.query,
            vec![
                ("is_active".to_string(), "true".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }
}
