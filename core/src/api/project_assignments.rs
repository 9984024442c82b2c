//! A user's project assignments: `/users/{user_id}/project_assignments`.

use serde_json::Value;

use crate::dates::DateParam;
use crate::error::Result;
use crate::layer::{extract_list, item_path, RequestLayer};
use crate::query::{QueryBuilder, QueryPairs};

#[derive(Debug, Clone, Default)]
pub struct ProjectAssignmentFilter {
    pub updated_since: Option<DateParam>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProjectAssignmentFilter {
    fn to_query(&self) -> QueryPairs {
        QueryBuilder::new()
            .timestamp("updated_since", self.updated_since.as_ref())
            .value("page", self.page)
            .value("per_page", self.per_page)
            .build()
    }
}

#[derive(Clone, Copy)]
pub struct ProjectAssignments<'a> {
    api: &'a dyn RequestLayer,
}

impl<'a> ProjectAssignments<'a> {
    pub fn new(api: &'a dyn RequestLayer) -> Self {
        Self { api }
    }

    pub fn all(&self, user_id: u64, filter: &ProjectAssignmentFilter) -> Result<Vec<Value>> {
        let path = format!("{}/project_assignments", item_path("/users", user_id));
        self.list(&path, filter)
    }

    /// Assignments of the user the credentials belong to.
    pub fn me(&self, filter: &ProjectAssignmentFilter) -> Result<Vec<Value>> {
        self.list("/users/me/project_assignments", filter)
    }

    fn list(&self, path: &str, filter: &ProjectAssignmentFilter) -> Result<Vec<Value>> {
        extract_list(self.api.get(path, &filter.to_query())?, "project_assignments")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarvestError;
    use crate::layer::testing::Recorder;
    use crate::layer::ApiResponse;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn all_is_scoped_to_user() {
        let api = Recorder::answering_json(json!({"project_assignments": [{"id": 125068554}]}));
        let filter = ProjectAssignmentFilter {
            updated_since: Some(NaiveDate::from_ymd_opt(2017, 8, 1).unwrap().into()),
            ..Default::default()
        };
        let assignments = ProjectAssignments::new(&api).all(1782959, &filter).unwrap();
        assert_eq!(assignments.len(), 1);

        let call = api.only_call();
        assert_eq!(call.path, "/users/1782959/project_assignments");
        assert_eq!(
            call.query,
            vec![("updated_since".to_string(), "2017-08-01T00:00:00+00:00".to_string())]
        );
    }

    #[test]
    fn me_uses_current_user_path() {
        let api = Recorder::answering_json(json!({"project_assignments": []}));
        ProjectAssignments::new(&api).me(&ProjectAssignmentFilter::default()).unwrap();
        assert_eq!(api.only_call().path, "/users/me/project_assignments");
    }

    #[test]
    fn raw_response_is_unexpected() {
        let api = Recorder::answering(ApiResponse::Raw("Too Many Requests".to_string()));
        let err = ProjectAssignments::new(&api).all(1, &ProjectAssignmentFilter::default()).unwrap_err();
        assert!(matches!(err, HarvestError::Runtime(_)));
    }
}
