#![allow(dead_code)]

use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use petclinic::api::handlers::health_handler;
use petclinic::api::routes::clinic_routes;
use petclinic::domain::clock::FixedClock;
use petclinic::infrastructure::persistence::InMemoryRepository;
use petclinic::state::AppState;

pub const PAGE_SIZE: u32 = 5;

/// "Today" for every handler test.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub fn create_test_state() -> AppState {
    let repository = InMemoryRepository::with_sample_data().unwrap();
    AppState::in_memory(Arc::new(repository), Arc::new(FixedClock(today())), PAGE_SIZE)
}

/// Test server over the seeded in-memory store, without rate limiting.
pub fn make_server() -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(clinic_routes())
        .with_state(create_test_state());
    TestServer::new(app).unwrap()
}

/// `(field, code)` pairs of the field errors in an error response body.
pub fn field_codes(body: &Value) -> Vec<(String, String)> {
    body["error"]["details"]["fields"]
        .as_array()
        .map(|fields| {
            fields
                .iter()
                .map(|f| {
                    (
                        f["field"].as_str().unwrap_or_default().to_string(),
                        f["code"].as_str().unwrap_or_default().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn has_error(body: &Value, field: &str, code: &str) -> bool {
    field_codes(body)
        .iter()
        .any(|(f, c)| f == field && c == code)
}

/// Id of the named pet inside an owner response body.
pub fn pet_id(owner: &Value, name: &str) -> i64 {
    owner["pets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == name)
        .and_then(|p| p["id"].as_i64())
        .unwrap()
}
