//! End-to-end tests against the fully assembled service

use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use labelbox::{
    config::{AuthConfig, Config, TokenGrant},
    ids::GroupId,
    labels::{self, InMemoryLabelRepository},
    middleware::{StaticTokenValidator, TokenAuth},
    service_builder::ServiceBuilder,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const ALICE: &str = "alice-token";
const BOB: &str = "bob-token";

fn app() -> Router {
    app_with(Config::default())
}

fn app_with(mut config: Config) -> Router {
    let grant = |token: &str, subject: &str| TokenGrant {
        token: token.to_string(),
        subject: subject.to_string(),
        group: GroupId::new(),
        roles: vec![],
    };

    config.auth = AuthConfig {
        tokens: vec![grant(ALICE, "user:alice"), grant(BOB, "user:bob")],
    };

    let validator = StaticTokenValidator::from_config(&config.auth).unwrap();
    ServiceBuilder::new()
        .with_config(config)
        .with_routes(labels::versioned_routes(Arc::new(InMemoryLabelRepository::new())))
        .with_auth(TokenAuth::new(validator))
        .build()
        .router()
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_label(app: &Router, token: &str, name: &str) -> Value {
    let response = call(
        app,
        Method::POST,
        "/api/v1/labels",
        Some(token),
        Some(json!({ "name": name, "description": "shelf", "color": "#00ff00" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn create_then_get_round_trip() {
    let app = app();
    let created = create_label(&app, ALICE, "Garage").await;
    let id = created["id"].as_str().unwrap();

    let uri = format!("/api/v1/labels/{}", id);
    let response = call(&app, Method::GET, &uri, Some(ALICE), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = json_body(response).await;
    assert_eq!(fetched, created);
    assert_eq!(fetched["description"], "shelf");
    assert!(fetched.get("createdAt").is_some());
}

#[tokio::test]
async fn list_is_scoped_and_wrapped_in_items() {
    let app = app();
    create_label(&app, ALICE, "Kitchen").await;
    create_label(&app, ALICE, "Attic").await;
    create_label(&app, BOB, "Basement").await;

    let response = call(&app, Method::GET, "/api/v1/labels", Some(ALICE), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|label| label["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Attic", "Kitchen"]);
}

#[tokio::test]
async fn other_group_gets_not_found_without_mutation() {
    let app = app();
    let created = create_label(&app, ALICE, "Garage").await;
    let uri = format!("/api/v1/labels/{}", created["id"].as_str().unwrap());

    let response = call(&app, Method::GET, &uri, Some(BOB), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["entity_type"], "Label");

    let rename = json!({ "name": "Mine now" });
    let response = call(&app, Method::PUT, &uri, Some(BOB), Some(rename)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = call(&app, Method::DELETE, &uri, Some(BOB), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = call(&app, Method::GET, &uri, Some(ALICE), None).await;
    assert_eq!(json_body(response).await["name"], "Garage");
}

#[tokio::test]
async fn put_uses_path_id_over_body_id() {
    let app = app();
    let created = create_label(&app, ALICE, "Garage").await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/v1/labels/{}", id);

    let response = call(
        &app,
        Method::PUT,
        &uri,
        Some(ALICE),
        Some(json!({ "id": "other-id", "name": "Workshop", "color": "blue" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = json_body(response).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Workshop");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let response = call(&app, Method::GET, &uri, Some(ALICE), None).await;
    assert_eq!(json_body(response).await["name"], "Workshop");
}

#[tokio::test]
async fn delete_twice_is_no_content_then_not_found() {
    let app = app();
    let created = create_label(&app, ALICE, "Garage").await;
    let uri = format!("/api/v1/labels/{}", created["id"].as_str().unwrap());

    let first = call(&app, Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(first.into_body().collect().await.unwrap().to_bytes().is_empty());

    let second = call(&app, Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_method_is_405_with_allow_header() {
    let app = app();
    let created = create_label(&app, ALICE, "Garage").await;
    let uri = format!("/api/v1/labels/{}", created["id"].as_str().unwrap());

    let body = json!({ "name": "x" });
    let response = call(&app, Method::PATCH, &uri, Some(ALICE), Some(body)).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()["allow"], "GET, PUT, DELETE");

    let response = call(&app, Method::DELETE, "/api/v1/labels", Some(ALICE), None).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()["allow"], "GET, POST");
    assert_eq!(json_body(response).await["code"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = app();
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let response = call(
            &app,
            method,
            "/api/v1/labels/not-a-uuid",
            Some(ALICE),
            Some(json!({ "name": "x" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["operation"], "decode");
    }
}

#[tokio::test]
async fn malformed_create_body_is_bad_request() {
    let app = app();
    let body = json!({ "color": "red" });
    let response = call(&app, Method::POST, "/api/v1/labels", Some(ALICE), Some(body)).await;
    assert!(response.status().is_client_error());
    assert_eq!(json_body(response).await["operation"], "decode");

    let response = call(&app, Method::GET, "/api/v1/labels", Some(ALICE), None).await;
    assert_eq!(json_body(response).await["items"], json!([]));
}

#[tokio::test]
async fn missing_or_unknown_token_is_unauthorized() {
    let app = app();

    let response = call(&app, Method::GET, "/api/v1/labels", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = call(&app, Method::GET, "/api/v1/labels", Some("forged"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_readiness_need_no_token() {
    let app = app();

    let response = call(&app, Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response.headers()["x-request-id"].to_str().unwrap();
    assert!(request_id.starts_with("req_"));

    let response = call(&app, Method::GET, "/ready", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["ready"], true);
}

#[tokio::test]
async fn every_failure_shares_one_error_body_shape() {
    let app = app();
    let created = create_label(&app, ALICE, "Garage").await;
    let uri = format!("/api/v1/labels/{}", created["id"].as_str().unwrap());

    let mut oversized = Config::default();
    oversized.middleware.body_limit_mb = 1;
    let huge = json!({ "name": "x".repeat(2 * 1024 * 1024) });

    let failures = [
        call(&app, Method::GET, "/api/v1/labels", None, None).await,
        call(&app, Method::GET, &uri, Some(BOB), None).await,
        call(&app, Method::DELETE, "/api/v1/labels", Some(ALICE), None).await,
        call(&app, Method::PATCH, &uri, Some(ALICE), None).await,
        call(&app, Method::GET, "/api/v1/labels/not-a-uuid", Some(ALICE), None).await,
        call(&app, Method::GET, "/api/v2/labels", Some(ALICE), None).await,
        call(&app_with(oversized), Method::POST, "/api/v1/labels", Some(ALICE), Some(huge)).await,
    ];

    let expected = [
        StatusCode::UNAUTHORIZED,
        StatusCode::NOT_FOUND,
        StatusCode::METHOD_NOT_ALLOWED,
        StatusCode::METHOD_NOT_ALLOWED,
        StatusCode::BAD_REQUEST,
        StatusCode::NOT_FOUND,
        StatusCode::PAYLOAD_TOO_LARGE,
    ];

    for (response, status) in failures.into_iter().zip(expected) {
        assert_eq!(response.status(), status);
        let body = json_body(response).await;
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        for key in ["error", "code", "status", "operation"] {
            assert!(keys.contains(&key), "{} body lacks {}: {}", status, key, body);
        }
        assert_eq!(body["status"], status.as_u16());
    }
}

#[tokio::test]
async fn create_accepts_bodies_up_to_the_configured_limit() {
    let app = app();
    let description = "d".repeat(3 * 1024 * 1024);

    let response = call(
        &app,
        Method::POST,
        "/api/v1/labels",
        Some(ALICE),
        Some(json!({ "name": "Archive", "description": description })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = json_body(response).await;
    assert_eq!(created["description"].as_str().unwrap().len(), 3 * 1024 * 1024);
}
