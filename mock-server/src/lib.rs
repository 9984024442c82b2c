//! In-memory imitation of the Harvest v2 endpoints the client core talks to.
//!
//! Records are schemaless JSON objects kept per collection. Only the rules
//! the client relies on are enforced: required fields on create, the
//! estimate state filter, estimate event messages, and 404s for unknown ids.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

type Params = HashMap<String, String>;

/// Query keys the list endpoints filter on by equality.
const FILTER_KEYS: [&str; 3] = ["state", "is_active", "client_id"];

#[derive(Debug, Default)]
pub struct Store {
    collections: HashMap<String, BTreeMap<u64, Value>>,
    last_id: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record`, assigning the next id when it has none. Returns the
    /// stored record.
    pub fn insert(&mut self, collection: &str, mut record: Map<String, Value>) -> Value {
        let id = match record.get("id").and_then(Value::as_u64) {
            Some(id) => {
                self.last_id = self.last_id.max(id);
                id
            }
            None => {
                self.last_id += 1;
                self.last_id
            }
        };
        record.insert("id".to_string(), json!(id));
        let record = Value::Object(record);
        self.collection_mut(collection).insert(id, record.clone());
        record
    }

    pub fn get(&self, collection: &str, id: u64) -> Option<&Value> {
        self.collections.get(collection).and_then(|c| c.get(&id))
    }

    fn get_mut(&mut self, collection: &str, id: u64) -> Option<&mut Value> {
        self.collections.get_mut(collection).and_then(|c| c.get_mut(&id))
    }

    fn remove(&mut self, collection: &str, id: u64) -> Option<Value> {
        self.collections.get_mut(collection).and_then(|c| c.remove(&id))
    }

    fn list(&self, collection: &str) -> Vec<Value> {
        self.collections
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default()
    }

    fn collection_mut(&mut self, collection: &str) -> &mut BTreeMap<u64, Value> {
        self.collections.entry(collection.to_string()).or_default()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::new())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .merge(resource("estimates", &["client_id"]))
        .merge(resource("tasks", &["name"]))
        .merge(resource("users", &["first_name", "last_name", "email"]))
        .merge(resource("invoice_item_categories", &["name"]))
        .route("/users/me", get(show_me))
        .route("/users/me/project_assignments", get(my_project_assignments))
        .route("/users/{id}/project_assignments", get(project_assignments))
        .route("/user_assignments", get(user_assignments))
        .route("/estimates/{id}/messages", get(list_messages).post(create_message))
        .route("/estimates/{id}/messages/{message_id}", delete(delete_message))
        .route("/time_entries/{id}/external_reference", delete(delete_external_reference))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

/// CRUD routes for a plain collection.
fn resource(name: &'static str, required: &'static [&'static str]) -> Router<Db> {
    Router::new()
        .route(
            &format!("/{name}"),
            get(move |State(db): State<Db>, Query(params): Query<Params>| list_records(db, name, params))
                .post(move |State(db): State<Db>, Json(body): Json<Value>| create_record(db, name, required, body)),
        )
        .route(
            &format!("/{name}/{{id}}"),
            get(move |State(db): State<Db>, Path(id): Path<u64>| show_record(db, name, id))
                .patch(move |State(db): State<Db>, Path(id): Path<u64>, Json(body): Json<Value>| {
                    update_record(db, name, id, body)
                })
                .delete(move |State(db): State<Db>, Path(id): Path<u64>| delete_record(db, name, id)),
        )
}

async fn list_records(db: Db, name: &'static str, params: Params) -> Response {
    let store = db.read().await;
    let records = store.list(name).into_iter().filter(|r| matches_filters(r, &params)).collect();
    list_response(name, records)
}

async fn create_record(db: Db, name: &'static str, required: &[&str], body: Value) -> Response {
    let Value::Object(mut record) = body else {
        return unprocessable("body must be a JSON object");
    };
    if let Some(field) = required.iter().find(|f| is_blank(record.get(**f))) {
        return unprocessable(&format!("{field} is required"));
    }
    match name {
        "estimates" => {
            record.entry("state").or_insert_with(|| json!("draft"));
        }
        "tasks" | "users" => {
            record.entry("is_active").or_insert(Value::Bool(true));
        }
        _ => {}
    }
    let created = db.write().await.insert(name, record);
    debug!(collection = name, id = %created["id"], "created record");
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn show_record(db: Db, name: &'static str, id: u64) -> Response {
    match db.read().await.get(name, id) {
        Some(record) => Json(record.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_record(db: Db, name: &'static str, id: u64, body: Value) -> Response {
    let Value::Object(changes) = body else {
        return unprocessable("body must be a JSON object");
    };
    let mut store = db.write().await;
    let Some(Value::Object(record)) = store.get_mut(name, id) else {
        return not_found();
    };
    record.extend(changes);
    Json(Value::Object(record.clone())).into_response()
}

async fn delete_record(db: Db, name: &'static str, id: u64) -> Response {
    match db.write().await.remove(name, id) {
        Some(_) => StatusCode::OK.into_response(),
        None => not_found(),
    }
}

async fn show_me(State(db): State<Db>) -> Response {
    match db.read().await.list("users").into_iter().next() {
        Some(user) => Json(user).into_response(),
        None => not_found(),
    }
}

async fn my_project_assignments(State(db): State<Db>) -> Response {
    let store = db.read().await;
    match store.list("users").first().and_then(|u| u["id"].as_u64()) {
        Some(user_id) => assignments_for(&store, user_id),
        None => not_found(),
    }
}

async fn project_assignments(State(db): State<Db>, Path(user_id): Path<u64>) -> Response {
    let store = db.read().await;
    if store.get("users", user_id).is_none() {
        return not_found();
    }
    assignments_for(&store, user_id)
}

fn assignments_for(store: &Store, user_id: u64) -> Response {
    let records = store
        .list("project_assignments")
        .into_iter()
        .filter(|r| r["user"]["id"].as_u64() == Some(user_id))
        .collect();
    list_response("project_assignments", records)
}

async fn user_assignments(State(db): State<Db>, Query(params): Query<Params>) -> Response {
    list_records(db, "user_assignments", params).await
}

async fn list_messages(State(db): State<Db>, Path(estimate_id): Path<u64>) -> Response {
    let store = db.read().await;
    if store.get("estimates", estimate_id).is_none() {
        return not_found();
    }
    let records = store
        .list("estimate_messages")
        .into_iter()
        .filter(|m| m["estimate_id"].as_u64() == Some(estimate_id))
        .collect();
    list_response("estimate_messages", records)
}

/// Either an event (`send`, `accept`, `decline`, `re-open`) that moves the
/// estimate to a new state, or a message to `recipients`.
async fn create_message(State(db): State<Db>, Path(estimate_id): Path<u64>, Json(body): Json<Value>) -> Response {
    let Value::Object(mut message) = body else {
        return unprocessable("body must be a JSON object");
    };
    let mut store = db.write().await;
    let Some(estimate) = store.get_mut("estimates", estimate_id) else {
        return not_found();
    };

    match message.get("event_type").and_then(Value::as_str) {
        Some(event_type) => {
            let state = match event_type {
                "send" | "re-open" => "sent",
                "accept" => "accepted",
                "decline" => "declined",
                other => return unprocessable(&format!("unknown event_type {other}")),
            };
            estimate["state"] = json!(state);
        }
        None => {
            let has_recipients = message
                .get("recipients")
                .and_then(Value::as_array)
                .is_some_and(|r| !r.is_empty());
            if !has_recipients {
                return unprocessable("recipients is required");
            }
        }
    }

    message.insert("estimate_id".to_string(), json!(estimate_id));
    let created = store.insert("estimate_messages", message);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn delete_message(State(db): State<Db>, Path((estimate_id, message_id)): Path<(u64, u64)>) -> Response {
    let mut store = db.write().await;
    let belongs = store
        .get("estimate_messages", message_id)
        .is_some_and(|m| m["estimate_id"].as_u64() == Some(estimate_id));
    if !belongs {
        return not_found();
    }
    store.remove("estimate_messages", message_id);
    StatusCode::OK.into_response()
}

async fn delete_external_reference(State(db): State<Db>, Path(time_entry_id): Path<u64>) -> Response {
    let mut store = db.write().await;
    match store.get_mut("time_entries", time_entry_id) {
        Some(entry) => {
            entry["external_reference"] = Value::Null;
            StatusCode::OK.into_response()
        }
        None => not_found(),
    }
}

fn matches_filters(record: &Value, params: &Params) -> bool {
    FILTER_KEYS.iter().all(|key| match params.get(*key) {
        Some(expected) => scalar(&record[*key]).as_deref() == Some(expected.as_str()),
        None => true,
    })
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

fn list_response(name: &str, records: Vec<Value>) -> Response {
    let mut body = Map::new();
    body.insert("per_page".to_string(), json!(2000));
    body.insert("total_pages".to_string(), json!(1));
    body.insert("total_entries".to_string(), json!(records.len()));
    body.insert("page".to_string(), json!(1));
    body.insert(name.to_string(), Value::Array(records));
    Json(Value::Object(body)).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"status": 404, "error": "Not Found"}))).into_response()
}

fn unprocessable(message: &str) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"message": message}))).into_response()
}
