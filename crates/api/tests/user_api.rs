//! Integration tests for the `/api/v1/users` endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn setup_creates_user_without_auth() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/users/setup",
            None,
            Some(json!({ "name": "Ada", "email": "ada@example.com", "role": "Admin" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Ada");
    assert_eq!(json["data"]["role"], "Admin");
    assert_eq!(json["data"]["id"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn setup_rejects_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Method::POST,
            "/api/v1/users/setup",
            None,
            Some(json!({ "name": "Ada", "email": "not-an-email", "role": "Admin" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid email format");
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = TestApp::new().await;
    let admin = app.seed_user("Admin").await;
    let body = json!({ "name": "Grace", "email": "grace@example.com", "role": "Editor" });

    let first = app.post_json("/api/v1/users", &admin, body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.post_json("/api/v1/users", &admin, body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["error"], "Email already exists");
}

#[tokio::test]
async fn editor_cannot_manage_users() {
    let app = TestApp::new().await;
    let editor = app.seed_user("Editor").await;

    let response = app.get("/api/v1/users", &editor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Insufficient permissions. Required: VIEW_USERS"
    );

    let response = app
        .post_json(
            "/api/v1/users",
            &editor,
            json!({ "name": "Eve", "email": "eve@example.com", "role": "Admin" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_reads_users_by_id_and_email() {
    let app = TestApp::new().await;
    let admin = app.seed_user("Admin").await;
    let viewer = app.seed_user("Viewer").await;

    let list = body_json(app.get("/api/v1/users", &admin).await).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 2);

    let response = app.get(&format!("/api/v1/users/{viewer}"), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "Viewer");
    let email = json["data"]["email"].as_str().unwrap().to_string();

    let response = app
        .get(&format!("/api/v1/users/email/{email}"), &admin)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], viewer.as_str());

    let response = app.get("/api/v1/users/email/nobody@example.com", &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_updates_and_deletes_user() {
    let app = TestApp::new().await;
    let admin = app.seed_user("Admin").await;
    let viewer = app.seed_user("Viewer").await;
    let uri = format!("/api/v1/users/{viewer}");

    let response = app.put_json(&uri, &admin, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.put_json(&uri, &admin, json!({ "role": "Editor" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role"], "Editor");

    // The promoted user can now create topics.
    app.create_topic(&viewer, "Promoted", None).await;

    let response = app.delete(&uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.get(&uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A deleted user can no longer authenticate.
    let response = app.get("/api/v1/topics", &viewer).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_missing_user_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.seed_user("Admin").await;

    let response = app
        .put_json("/api/v1/users/ghost", &admin, json!({ "name": "Ghost" }))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "User with id ghost not found"
    );
}
