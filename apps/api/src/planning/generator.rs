//! Plan generation pipeline.
//!
//! Flow: build prompt → provider call → (render PDF | normalize lines).
//! Every step returns `AppError`, so handlers contain all failures in one place.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::planning::day_parser::{parse_day_entries, DayEntry};
use crate::planning::models::PlanningRequest;
use crate::planning::normalizer::normalize_plan_lines;
use crate::planning::prompts::{build_prompt, PromptVariant};
use crate::render::{render_document, PageConfig, RenderedDocument};

/// Body of a successful `POST /generate-plan`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanList {
    pub plan: Vec<String>,
    /// Only present when the caller asked for structured output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<DayEntry>>,
}

/// Builds the variant prompt and asks the provider for plan text.
pub async fn generate_plan_text(
    generator: &dyn TextGenerator,
    request: &PlanningRequest,
    variant: PromptVariant,
    start_date: NaiveDate,
) -> Result<String, AppError> {
    let prompt = build_prompt(request, variant, start_date);
    let text = generator.generate(&prompt).await?;
    info!("Provider returned {} chars of plan text", text.len());
    Ok(text)
}

/// Document pipeline. Layout, serialization and the transient file write run on
/// the blocking pool.
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn generate_plan_document(
    generator: &dyn TextGenerator,
    request: PlanningRequest,
    page_config: PageConfig,
    output_dir: PathBuf,
    request_id: Uuid,
    start_date: NaiveDate,
) -> Result<RenderedDocument, AppError> {
    request.validate()?;

    let plan_text =
        generate_plan_text(generator, &request, PromptVariant::Document, start_date).await?;

    let document = tokio::task::spawn_blocking(move || {
        render_document(&request, &plan_text, &page_config, &output_dir, request_id)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    info!(
        "Rendered study plan: {} pages, {} body blocks",
        document.page_count, document.body_blocks
    );

    Ok(document)
}

/// List pipeline. `structured` additionally groups lines into day records.
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn generate_plan_list(
    generator: &dyn TextGenerator,
    request: &PlanningRequest,
    structured: bool,
    request_id: Uuid,
    start_date: NaiveDate,
) -> Result<PlanList, AppError> {
    request.validate()?;

    let plan_text = generate_plan_text(generator, request, PromptVariant::List, start_date).await?;
    let plan = normalize_plan_lines(&plan_text);
    let days = structured.then(|| parse_day_entries(&plan));

    info!("Normalized plan into {} lines", plan.len());

    Ok(PlanList { plan, days })
}
