use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use todo_api::{routes::API_PREFIX, test_helpers::test_app};

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    (status, body.to_vec())
}

async fn json_response(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let json = serde_json::from_slice(&body).expect("body should be json");
    (status, json)
}

fn json_request(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(api_path(path))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(api_path(path))
        .body(Body::empty())
        .unwrap()
}

async fn create_todo(app: &Router, body: Value) -> Value {
    let (status, todo) = json_response(app, json_request("POST", "/todos", body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {todo}");
    todo
}

#[tokio::test]
async fn create_with_only_title_fills_defaults() {
    let app = test_app(None).await;

    let (status, todo) =
        json_response(&app, json_request("POST", "/todos", json!({ "title": "Buy milk" }))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        todo,
        json!({
            "id": 1,
            "title": "Buy milk",
            "description": null,
            "completed": false,
            "priority": null,
            "due_date": null
        })
    );
}

#[tokio::test]
async fn create_keeps_optional_fields() {
    let app = test_app(None).await;

    let todo = create_todo(
        &app,
        json!({
            "title": "File taxes",
            "description": "Federal and state",
            "priority": "high",
            "due_date": "2026-04-15"
        }),
    )
    .await;

    assert_eq!(todo["description"], "Federal and state");
    assert_eq!(todo["priority"], "high");
    assert_eq!(todo["due_date"], "2026-04-15");
    assert_eq!(todo["completed"], false);
}

#[tokio::test]
async fn list_contains_every_created_item_once() {
    let app = test_app(None).await;
    let first = create_todo(&app, json!({ "title": "One" })).await;
    let second = create_todo(&app, json!({ "title": "Two" })).await;
    assert_ne!(first["id"], second["id"]);

    let (status, todos) = json_response(&app, empty_request("GET", "/todos")).await;

    assert_eq!(status, StatusCode::OK);
    let todos = todos.as_array().expect("list should be an array");
    assert_eq!(todos.len(), 2);
    for created in [&first, &second] {
        let matches = todos.iter().filter(|todo| *todo == created).count();
        assert_eq!(matches, 1, "expected exactly one copy of {created}");
    }
}

#[tokio::test]
async fn list_is_empty_on_fresh_database() {
    let app = test_app(None).await;

    let (status, todos) = json_response(&app, empty_request("GET", "/todos")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(todos, json!([]));
}

#[tokio::test]
async fn get_returns_single_item() {
    let app = test_app(None).await;
    let created = create_todo(&app, json!({ "title": "Read" })).await;

    let (status, todo) = json_response(&app, empty_request("GET", "/todos/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(todo, created);
}

#[tokio::test]
async fn update_with_empty_body_returns_item_unchanged() {
    let app = test_app(None).await;
    let created = create_todo(
        &app,
        json!({ "title": "Walk dog", "description": "Around the block", "priority": "low" }),
    )
    .await;

    let (status, updated) = json_response(&app, json_request("PUT", "/todos/1", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
}

#[tokio::test]
async fn update_completed_leaves_other_fields_untouched() {
    let app = test_app(None).await;
    let created = create_todo(
        &app,
        json!({
            "title": "Buy milk",
            "description": "2 litres",
            "priority": "medium",
            "due_date": "2026-01-02"
        }),
    )
    .await;

    let (status, updated) = json_response(
        &app,
        json_request("PUT", "/todos/1", json!({ "completed": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let mut expected = created.clone();
    expected["completed"] = json!(true);
    assert_eq!(updated, expected);

    let (_, fetched) = json_response(&app, empty_request("GET", "/todos/1")).await;
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn update_with_null_clears_nullable_field() {
    let app = test_app(None).await;
    create_todo(&app, json!({ "title": "Plan trip", "description": "Somewhere warm" })).await;

    let (status, updated) = json_response(
        &app,
        json_request(
            "PUT",
            "/todos/1",
            json!({ "description": null, "title": "Plan holiday" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["description"], Value::Null);
    assert_eq!(updated["title"], "Plan holiday");
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let app = test_app(None).await;

    let (status, body) = json_response(
        &app,
        json_request("PUT", "/todos/99", json!({ "completed": true })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "To-Do item not found" }));
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found() {
    let app = test_app(None).await;

    let (status, body) = json_response(&app, empty_request("DELETE", "/todos/42")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "To-Do item not found");
}

#[tokio::test]
async fn delete_removes_item_permanently() {
    let app = test_app(None).await;
    create_todo(&app, json!({ "title": "Temporary" })).await;

    let (status, body) = send(&app, empty_request("DELETE", "/todos/1")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = json_response(&app, empty_request("GET", "/todos/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "To-Do item not found");

    let (_, todos) = json_response(&app, empty_request("GET", "/todos")).await;
    assert_eq!(todos, json!([]));
}

#[tokio::test]
async fn create_without_title_is_a_json_bad_request() {
    let app = test_app(None).await;

    let (status, body) = json_response(
        &app,
        json_request("POST", "/todos", json!({ "description": "no title" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["detail"].as_str().unwrap_or("").is_empty());
}

#[tokio::test]
async fn create_with_blank_title_is_rejected() {
    let app = test_app(None).await;

    let (status, body) =
        json_response(&app, json_request("POST", "/todos", json!({ "title": "  " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Title required");
}

#[tokio::test]
async fn create_with_malformed_due_date_is_rejected() {
    let app = test_app(None).await;

    let (status, body) = json_response(
        &app,
        json_request(
            "POST",
            "/todos",
            json!({ "title": "Dentist", "due_date": "next tuesday" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn create_with_oversized_priority_is_rejected() {
    let app = test_app(None).await;

    let (status, body) = json_response(
        &app,
        json_request(
            "POST",
            "/todos",
            json!({ "title": "Urgent", "priority": "!".repeat(51) }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Priority must be at most 50 characters");
}

#[tokio::test]
async fn non_numeric_id_is_a_json_bad_request() {
    let app = test_app(None).await;

    let (status, body) = json_response(&app, empty_request("GET", "/todos/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn unknown_route_is_normalized_to_json_error() {
    let app = test_app(None).await;

    let (status, body) = json_response(&app, empty_request("GET", "/unknown-route")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body["detail"].as_str().unwrap_or("").is_empty());
}

#[tokio::test]
async fn index_page_is_served_as_html() {
    let app = test_app(None).await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn title_is_stored_exactly_as_sent() {
    let app = test_app(None).await;

    let todo = create_todo(&app, json!({ "title": "  Buy milk  " })).await;
    assert_eq!(todo["title"], "  Buy milk  ");

    let (status, updated) = json_response(
        &app,
        json_request("PUT", "/todos/1", json!({ "title": " Buy oat milk " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], " Buy oat milk ");

    let (_, fetched) = json_response(&app, empty_request("GET", "/todos/1")).await;
    assert_eq!(fetched["title"], " Buy oat milk ");
}

#[tokio::test]
async fn update_with_wrong_typed_field_is_a_json_bad_request() {
    let app = test_app(None).await;
    let created = create_todo(&app, json!({ "title": "Water plants" })).await;

    let (status, body) = json_response(
        &app,
        json_request("PUT", "/todos/1", json!({ "completed": "yes" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["detail"].as_str().unwrap_or("").is_empty());

    let (_, fetched) = json_response(&app, empty_request("GET", "/todos/1")).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_with_oversized_priority_is_rejected() {
    let app = test_app(None).await;
    let created = create_todo(&app, json!({ "title": "Call bank", "priority": "low" })).await;

    let (status, body) = json_response(
        &app,
        json_request("PUT", "/todos/1", json!({ "priority": "p".repeat(51) })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Priority must be at most 50 characters");

    let (_, fetched) = json_response(&app, empty_request("GET", "/todos/1")).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_body_is_validated_before_the_item_is_looked_up() {
    let app = test_app(None).await;

    let (status, body) = json_response(
        &app,
        json_request("PUT", "/todos/99", json!({ "title": " " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Title required");
}
