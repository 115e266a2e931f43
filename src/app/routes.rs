use crate::core::StudyService;
use crate::domain::model::{StudyMode, StudyResponse, TextInput};
use crate::utils::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// 路由共用狀態；內部都是 Arc，clone 成本低
#[derive(Clone)]
pub struct AppState {
    pub service: StudyService,
}

impl AppState {
    pub fn new(service: StudyService) -> Self {
        Self { service }
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({ "status": "running" }))
}

/// 不呼叫上游，只回報設定的模型
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "ok": true, "model": state.service.model() }))
}

pub async fn explain(
    State(state): State<AppState>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Response {
    handle(StudyMode::Explain, &state, payload).await
}

pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Response {
    handle(StudyMode::Summarize, &state, payload).await
}

pub async fn quiz(
    State(state): State<AppState>,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Response {
    handle(StudyMode::Quiz, &state, payload).await
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(StudyResponse::Error("Not found".to_string())),
    )
        .into_response()
}

async fn handle(
    mode: StudyMode,
    state: &AppState,
    payload: Result<Json<TextInput>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            return AppError::validation(format!("Invalid JSON body: {}", rejection.body_text()))
                .into_response()
        }
    };

    match state.service.run(mode, &input).await {
        Ok(result) => StudyResponse::Result(result).into_response(),
        Err(e) => e.into_response(),
    }
}
