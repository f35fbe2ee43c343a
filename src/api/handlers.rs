//! Axum request handlers for the HTTP API.
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::models::{
    CompletedMadLibResponse, HealthResponse, ImageGenerationRequest, ImageGenerationResponse,
    TemplateResponse, TopicRequest, UserInputsRequest,
};
use crate::Result;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "MadLibs API is Running!" }))
}

pub async fn generate_template(
    State(app): State<AppState>,
    Json(request): Json<TopicRequest>,
) -> Result<Json<TemplateResponse>> {
    let template = app.generate_template(&request.topic).await?;
    Ok(Json(TemplateResponse::from(&template)))
}

pub async fn submit_madlib(
    State(app): State<AppState>,
    Json(request): Json<UserInputsRequest>,
) -> Result<Json<CompletedMadLibResponse>> {
    let madlib = app
        .submit_madlib(&request.template_id, &request.user_inputs)
        .await?;
    Ok(Json(CompletedMadLibResponse::from(&madlib)))
}

pub async fn generate_image(
    State(app): State<AppState>,
    Json(request): Json<ImageGenerationRequest>,
) -> Result<Json<ImageGenerationResponse>> {
    let image = app.generate_image(&request.madlib_id).await?;
    Ok(Json(ImageGenerationResponse::from(&image)))
}

pub async fn get_image(
    State(app): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse> {
    let (bytes, content_type) = app.read_image(&filename).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

pub async fn health(State(app): State<AppState>) -> Json<HealthResponse> {
    Json(app.health().await)
}
