use super::{
    extract::{ApiError, FormBody, JsonBody},
    html,
    types::{InfoResponse, NotFoundResponse, PredictionOut, TextIn},
};
use crate::model::LanguageModel;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::Html,
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn LanguageModel>,
}

impl AppState {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    async fn predict(&self, text: &str) -> Result<PredictionOut, ApiError> {
        info!("Received prediction request for {} characters", text.chars().count());

        let language = self
            .model
            .predict(text)
            .await
            .map_err(ApiError::Prediction)?;

        info!("Predicted language: {}", language);
        Ok(PredictionOut { language })
    }
}

pub async fn demo() -> Html<&'static str> {
    Html(html::demo_page())
}

pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        health_check: "OK".to_string(),
        model_version: state.model.version().to_string(),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<TextIn>,
) -> Result<Json<PredictionOut>, ApiError> {
    state.predict(&payload.text).await.map(Json)
}

pub async fn submit(
    State(state): State<AppState>,
    FormBody(payload): FormBody<TextIn>,
) -> Result<Json<PredictionOut>, ApiError> {
    state.predict(&payload.text).await.map(Json)
}

pub async fn not_found() -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            detail: "Not Found",
        }),
    )
}
