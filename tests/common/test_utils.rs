use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use langdetect_api::{
    model::{LanguageModel, ProfileModel},
    server::{self, AppState},
};
use serde_json::Value;
use std::sync::Arc;

/// Router backed by the built-in profile model
pub fn create_test_app() -> Router {
    create_test_app_with(Arc::new(ProfileModel::builtin("0.1.0", "English")))
}

/// Router backed by the given model
pub fn create_test_app_with(model: Arc<dyn LanguageModel>) -> Router {
    server::router(AppState::new(model))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_body(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json(response: Response<Body>) -> Value {
    serde_json::from_str(&read_body(response).await).unwrap()
}
