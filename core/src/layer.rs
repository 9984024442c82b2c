//! The request layer every resource client is written against.
//!
//! # Design
//! Resource clients never see HTTP. They call the four verb helpers on a
//! `&dyn RequestLayer`, which `HarvestClient` implements once on top of a
//! caller-supplied transport. Tests substitute a recording double.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{HarvestError, Result};

/// An opaque key/value record sent on create and update.
pub type Payload = Map<String, Value>;

/// Decoded response body.
///
/// Harvest answers with JSON almost everywhere, but deletes return an empty
/// body and some endpoints can return plain text. Rather than guessing per
/// endpoint, the body is tagged by what it actually was.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Raw(String),
}

impl ApiResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Raw(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Raw(_) => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, ApiResponse::Raw(_))
    }
}

/// Verb helpers shared by all resource clients. `path` is relative to the
/// configured base URL and already percent-encoded.
pub trait RequestLayer {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse>;
    fn post(&self, path: &str, body: &Payload) -> Result<ApiResponse>;
    fn patch(&self, path: &str, body: &Payload) -> Result<ApiResponse>;
    fn delete(&self, path: &str) -> Result<ApiResponse>;
}

/// Pulls the named list out of a listing response.
pub fn extract_list(response: ApiResponse, field: &str) -> Result<Vec<Value>> {
    match response {
        ApiResponse::Json(Value::Object(mut object)) => match object.remove(field) {
            Some(Value::Array(items)) => Ok(items),
            _ => {
                warn!(field, "listing response has no list under the expected key");
                Err(HarvestError::unexpected_result())
            }
        },
        _ => {
            warn!(field, "listing response is not a JSON object");
            Err(HarvestError::unexpected_result())
        }
    }
}

/// `/{collection}/{id}` with the id percent-encoded.
pub(crate) fn item_path(collection: &str, id: u64) -> String {
    format!("{collection}/{}", urlencoding::encode(&id.to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording double shared by the resource client tests.

    use std::cell::RefCell;

    use super::*;
    use crate::http::HttpMethod;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Call {
        pub method: HttpMethod,
        pub path: String,
        pub query: Vec<(String, String)>,
        pub body: Option<Payload>,
    }

    /// Records every call and answers each with a clone of `response`.
    pub struct Recorder {
        pub calls: RefCell<Vec<Call>>,
        pub response: ApiResponse,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self::answering(ApiResponse::Json(Value::Object(Map::new())))
        }

        pub fn answering(response: ApiResponse) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                response,
            }
        }

        pub fn answering_json(value: Value) -> Self {
            Self::answering(ApiResponse::Json(value))
        }

        pub fn only_call(&self) -> Call {
            let calls = self.calls.borrow();
            assert_eq!(calls.len(), 1, "expected exactly one request");
            calls[0].clone()
        }

        pub fn no_calls(&self) -> bool {
            self.calls.borrow().is_empty()
        }

        fn record(&self, method: HttpMethod, path: &str, query: &[(&str, String)], body: Option<&Payload>) -> Result<ApiResponse> {
            self.calls.borrow_mut().push(Call {
                method,
                path: path.to_string(),
                query: query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
                body: body.cloned(),
            });
            Ok(self.response.clone())
        }
    }

    impl RequestLayer for Recorder {
        fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
            self.record(HttpMethod::Get, path, query, None)
        }

        fn post(&self, path: &str, body: &Payload) -> Result<ApiResponse> {
            self.record(HttpMethod::Post, path, &[], Some(body))
        }

        fn patch(&self, path: &str, body: &Payload) -> Result<ApiResponse> {
            self.record(HttpMethod::Patch, path, &[], Some(body))
        }

        fn delete(&self, path: &str) -> Result<ApiResponse> {
            self.record(HttpMethod::Delete, path, &[], None)
        }
    }

    pub fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }
}
