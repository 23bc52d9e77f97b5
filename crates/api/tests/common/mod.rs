#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use kb_api::config::{LogFormat, ServerConfig};
use kb_api::router::build_app_router;
use kb_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults pointing at `data_dir`.
pub fn test_config(data_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        data_dir: data_dir.to_path_buf(),
        log_format: LogFormat::Text,
    }
}

/// A running application over a throwaway data directory.
///
/// The router is cheap to clone; each request gets its own clone so a test
/// can issue any number of calls against the same state.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = kb_db::open_store(dir.path()).await.unwrap();
        let state = AppState::new(Arc::new(store), test_config(dir.path()));
        Self {
            router: build_app_router(state.clone()),
            state,
            _dir: dir,
        }
    }

    /// Create a user through the public setup endpoint and return its id.
    pub async fn seed_user(&self, role: &str) -> String {
        let email = format!("{}-{}@example.com", role.to_lowercase(), self.user_count().await);
        let response = self
            .send(
                Method::POST,
                "/api/v1/users/setup",
                None,
                Some(serde_json::json!({
                    "name": format!("{role} User"),
                    "email": email,
                    "role": role,
                })),
            )
            .await;
        assert_eq!(response.status(), 201, "seeding {role} user failed");
        body_json(response).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    async fn user_count(&self) -> usize {
        kb_db::repositories::UserRepo::list(&self.state.store)
            .await
            .unwrap()
            .len()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header("x-user-id", id);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, user_id: &str) -> Response<Body> {
        self.send(Method::GET, uri, Some(user_id), None).await
    }

    pub async fn post_json(&self, uri: &str, user_id: &str, body: Value) -> Response<Body> {
        self.send(Method::POST, uri, Some(user_id), Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, user_id: &str, body: Value) -> Response<Body> {
        self.send(Method::PUT, uri, Some(user_id), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user_id: &str) -> Response<Body> {
        self.send(Method::DELETE, uri, Some(user_id), None).await
    }

    /// Create a topic as `user_id` and return its JSON representation.
    pub async fn create_topic(&self, user_id: &str, name: &str, parent: Option<&str>) -> Value {
        let response = self
            .post_json(
                "/api/v1/topics",
                user_id,
                serde_json::json!({
                    "name": name,
                    "content": format!("{name} content"),
                    "parent_topic_id": parent,
                }),
            )
            .await;
        assert_eq!(response.status(), 201, "creating topic {name} failed");
        body_json(response).await["data"].clone()
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
