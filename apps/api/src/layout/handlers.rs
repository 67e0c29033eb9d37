//! Axum route handlers for the Layout API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::layout::assembler::PageContent;
use crate::layout::engine::{paginate_resume, OverflowPolicy, PaginationOptions, TruncatedColumn};
use crate::layout::page_config::{default_page_config, PageConfig, PaperSize};
use crate::layout::paginator::TracingObserver;
use crate::layout::units::{build_content_units, ContentUnit};
use crate::layout::validator::{validate_resume, ValidationLimits, ValidationReport};
use crate::models::resume::ResumeData;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateRequest {
    pub resume: ResumeData,
    pub paper_size: Option<PaperSize>,
    pub overflow: Option<OverflowPolicy>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginateResponse {
    pub pages: Vec<PageContent>,
    pub truncated: Vec<TruncatedColumn>,
    pub font_scale: f32,
}

/// Shared by `/validate` and `/units`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    pub resume: ResumeData,
    pub paper_size: Option<PaperSize>,
}

/// Server defaults unless the request names another paper size.
fn page_config_for(state: &AppState, paper: Option<PaperSize>) -> PageConfig {
    match paper {
        Some(paper) if paper != state.page_config.paper => {
            let mut config = default_page_config(paper);
            config.max_pages_per_column = state.page_config.max_pages_per_column;
            config
        }
        _ => state.page_config.clone(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/layout/paginate
///
/// Splits the resume into two-column pages for the preview.
/// Pagination is CPU-bound, so it runs on the blocking pool.
pub async fn handle_paginate(
    State(state): State<AppState>,
    Json(request): Json<PaginateRequest>,
) -> Result<Json<PaginateResponse>, AppError> {
    let config = page_config_for(&state, request.paper_size);
    let options = PaginationOptions {
        overflow: request.overflow.unwrap_or(state.options.overflow),
        ..state.options
    };
    let resume = request.resume;

    let result = tokio::task::spawn_blocking(move || {
        paginate_resume(&resume, &config, &options, &TracingObserver)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pagination: {e}")))??;

    info!(
        pages = result.pages.len(),
        truncated = !result.truncated.is_empty(),
        font_scale = result.font_scale,
        "Resume paginated"
    );

    Ok(Json(PaginateResponse {
        pages: result.pages,
        truncated: result.truncated,
        font_scale: result.font_scale,
    }))
}

/// POST /api/v1/layout/validate
///
/// One-page fit estimate plus length warnings. Never rejects the resume.
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ValidationReport>, AppError> {
    let config = page_config_for(&state, request.paper_size);
    let report = validate_resume(&request.resume, &config, &ValidationLimits::default());
    Ok(Json(report))
}

/// POST /api/v1/layout/units
///
/// Flat content-unit list with estimated heights, for debugging the preview.
pub async fn handle_units(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<Vec<ContentUnit>>, AppError> {
    let config = page_config_for(&state, request.paper_size);
    config.validate()?;
    Ok(Json(build_content_units(&request.resume, &config)))
}
