use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use super::{DescribeRequest, DescribeResponse, HealthResponse, SpeechRequest};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::speech::SpeechResponse;

pub async fn describe(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DescribeRequest>, JsonRejection>,
) -> Result<Json<DescribeResponse>, AppError> {
    let Json(request) = payload?;
    let image = request.image.unwrap_or_default();
    let response = state.describe.describe(&image).await?;
    Ok(Json(DescribeResponse { response }))
}

pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Json<SpeechResponse>, AppError> {
    let Json(request) = payload?;
    let text = request.text.unwrap_or_default();
    let speech = state.speech.synthesize(&text).await?;
    Ok(Json(speech))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: state.version.clone(),
        mode: state.mode.as_str().to_string(),
    })
}
