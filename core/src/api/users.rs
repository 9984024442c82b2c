//! Users: `/users`.

use serde_json::Value;

use crate::api::ProjectAssignments;
use crate::dates::DateParam;
use crate::error::Result;
use crate::layer::{extract_list, item_path, ApiResponse, Payload, RequestLayer};
use crate::query::QueryBuilder;
use crate::validate;

const PATH: &str = "/users";
const REQUIRED: [&str; 3] = ["first_name", "last_name", "email"];

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub is_active: Option<bool>,
    pub updated_since: Option<DateParam>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Clone, Copy)]
pub struct Users<'a> {
    api: &'a dyn RequestLayer,
}

impl<'a> Users<'a> {
    pub fn new(api: &'a dyn RequestLayer) -> Self {
        Self { api }
    }

    pub fn all(&self, filter: &UserFilter) -> Result<Vec<Value>> {
        let query = QueryBuilder::new()
            .flag("is_active", filter.is_active)
            .timestamp("updated_since", filter.updated_since.as_ref())
            .value("page", filter.page)
            .value("per_page", filter.per_page)
            .build();
        extract_list(self.api.get(PATH, &query)?, "users")
    }

    pub fn show(&self, user_id: u64) -> Result<ApiResponse> {
        self.api.get(&item_path(PATH, user_id), &[])
    }

    /// The user the credentials belong to.
    pub fn me(&self) -> Result<ApiResponse> {
        self.api.get(&format!("{PATH}/me"), &[])
    }

    /// `first_name`, `last_name` and `email` must all be non-blank strings.
    /// Missing fields are reported before malformed ones.
    pub fn create(&self, payload: &Payload) -> Result<ApiResponse> {
        validate::require_present(payload, &REQUIRED)?;
        for field in REQUIRED {
            validate::require_string(payload, field)?;
        }
        self.api.post(PATH, payload)
    }

    pub fn update(&self, user_id: u64, payload: &Payload) -> Result<ApiResponse> {
        self.api.patch(&item_path(PATH, user_id), payload)
    }

    /// Rejected by the server while the user has time entries or expenses.
    pub fn remove(&self, user_id: u64) -> Result<ApiResponse> {
        self.api.delete(&item_path(PATH, user_id))
    }

    pub fn project_assignments(&self) -> ProjectAssignments<'a> {
        ProjectAssignments::new(self.api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarvestError;
    use crate::http::HttpMethod;
    use crate::layer::testing::{payload, Recorder};
    use serde_json::json;

    fn complete() -> Payload {
        payload(json!({"first_name": "George", "last_name": "Frank", "email": "george@example.com"}))
    }

    #[test]
    fn all_sends_is_active_as_literal() {
        let api = Recorder::answering_json(json!({"users": []}));
        let filter = UserFilter {
            is_active: Some(false),
            ..Default::default()
        };
        Users::new(&api).all(&filter).unwrap();
        assert_eq!(api.only_call().query, vec![("is_active".to_string(), "false".to_string())]);
    }

    #[test]
    fn each_missing_field_is_named() {
        for field in REQUIRED {
            let api = Recorder::new();
            let mut body = complete();
            body.remove(field);
            let err = Users::new(&api).create(&body).unwrap_err();
            assert!(matches!(err, HarvestError::MissingArgument(ref f) if f == field), "{field}: {err}");
            assert!(api.no_calls());
        }
    }

    #[test]
    fn each_blank_field_is_invalid_with_its_own_name() {
        for field in REQUIRED {
            let api = Recorder::new();
            let mut body = complete();
            body.insert(field.to_string(), json!("  "));
            let err = Users::new(&api).create(&body).unwrap_err();
            assert_eq!(err.to_string(), format!("The \"{field}\" parameter must be a non-empty string."));
        }
    }

    #[test]
    fn missing_beats_invalid() {
        let api = Recorder::new();
        let body = payload(json!({"first_name": "", "last_name": "Frank"}));
        let err = Users::new(&api).create(&body).unwrap_err();
        assert!(matches!(err, HarvestError::MissingArgument(f) if f == "email"));
    }

    #[test]
    fn create_posts_valid_user() {
        let api = Recorder::new();
        Users::new(&api).create(&complete()).unwrap();
        let call = api.only_call();
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(call.path, "/users");
        assert_eq!(call.body, Some(complete()));
    }

    #[test]
    fn me_and_item_paths() {
        let api = Recorder::new();
        let users = Users::new(&api);
        users.me().unwrap();
        users.show(1782959).unwrap();
        users.update(1782959, &payload(json!({"telephone": "888-555-4444"}))).unwrap();
        users.remove(1782959).unwrap();

        let calls = api.calls.borrow();
        let paths: Vec<_> = calls.iter().map(|c| (c.method, c.path.as_str())).collect();
        assert_eq!(
            paths,
            vec![
                (HttpMethod::Get, "/users/me"),
                (HttpMethod::Get, "/users/1782959"),
                (HttpMethod::Patch, "/users/1782959"),
                (HttpMethod::Delete, "/users/1782959"),
            ]
        );
    }
}
