//! Axum route handlers for the planning API.

use axum::{
    body::Body,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::header,
    response::Response,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::errors::AppError;
use crate::planning::generator::{generate_plan_document, generate_plan_list, PlanList};
use crate::planning::models::PlanningRequest;
use crate::state::AppState;

/// Public filename of every downloaded plan, independent of the staging name.
pub const ATTACHMENT_FILENAME: &str = "study_plan.pdf";

#[derive(Debug, Deserialize)]
pub struct PlanListQuery {
    #[serde(default)]
    pub structured: bool,
}

/// POST /generate-plan-pdf
///
/// Streams the rendered plan as a PDF attachment.
pub async fn handle_generate_plan_pdf(
    State(state): State<AppState>,
    payload: Result<Json<PlanningRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let request_id = Uuid::new_v4();

    let document = generate_plan_document(
        state.generator.as_ref(),
        request,
        state.page_config.clone(),
        state.config.output_dir.clone(),
        request_id,
        Local::now().date_naive(),
    )
    .await?;

    let stream = ReaderStream::new(tokio::fs::File::from_std(document.file));

    Response::builder()
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{ATTACHMENT_FILENAME}\""),
        )
        .header(header::CONTENT_LENGTH, document.size_bytes)
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Internal(e.into()))
}

/// POST /generate-plan
///
/// Returns `{ "plan": [...] }`, plus `"days"` when `?structured=true`.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    query: Result<Query<PlanListQuery>, QueryRejection>,
    payload: Result<Json<PlanningRequest>, JsonRejection>,
) -> Result<Json<PlanList>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let Json(request) = payload?;

    let list = generate_plan_list(
        state.generator.as_ref(),
        &request,
        query.structured,
        Uuid::new_v4(),
        Local::now().date_naive(),
    )
    .await?;

    Ok(Json(list))
}
