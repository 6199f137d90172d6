mod common;

use axum::http::StatusCode;
use common::{has_error, make_server, pet_id};
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_visit_defaults_to_today() {
    let server = make_server();
    let owner = server.get("/owners/1").await.json::<Value>();
    let leo = pet_id(&owner, "Leo");

    let response = server
        .post(&format!("/owners/1/pets/{leo}/visits"))
        .json(&json!({ "description": "checkup" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    let visits = body["pets"][0]["visits"].as_array().unwrap();
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0]["date"], "2024-06-01");
    assert_eq!(visits[0]["description"], "checkup");
    assert!(visits[0]["id"].is_i64());
}

#[tokio::test]
async fn test_create_visit_kept_in_date_order() {
    let server = make_server();
    let owner = server.get("/owners/6").await.json::<Value>();
    let samantha = pet_id(&owner, "Samantha");

    let response = server
        .post(&format!("/owners/6/pets/{samantha}/visits"))
        .json(&json!({ "date": "2013-01-02", "description": "follow-up" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<Value>();
    let dates: Vec<&str> = body["pets"][1]["visits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2013-01-01", "2013-01-02", "2013-01-04"]);
}

#[tokio::test]
async fn test_create_visit_blank_description() {
    let server = make_server();
    let owner = server.get("/owners/1").await.json::<Value>();
    let leo = pet_id(&owner, "Leo");

    let response = server
        .post(&format!("/owners/1/pets/{leo}/visits"))
        .json(&json!({ "date": "2024-05-01", "description": "   " }))
        .await;

    response.assert_status_bad_request();
    assert!(has_error(&response.json::<Value>(), "description", "required"));
}

#[tokio::test]
async fn test_create_visit_description_too_long() {
    let server = make_server();
    let owner = server.get("/owners/1").await.json::<Value>();
    let leo = pet_id(&owner, "Leo");

    let response = server
        .post(&format!("/owners/1/pets/{leo}/visits"))
        .json(&json!({ "description": "x".repeat(256) }))
        .await;

    response.assert_status_bad_request();
    assert!(has_error(&response.json::<Value>(), "description", "length"));
}

#[tokio::test]
async fn test_create_visit_unknown_pet() {
    let server = make_server();

    let response = server
        .post("/owners/1/pets/999/visits")
        .json(&json!({ "description": "checkup" }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_create_visit_unknown_owner() {
    let server = make_server();

    let response = server
        .post("/owners/999/pets/1/visits")
        .json(&json!({ "description": "checkup" }))
        .await;

    response.assert_status_not_found();
}
