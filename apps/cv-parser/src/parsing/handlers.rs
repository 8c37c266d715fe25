//! Axum route handlers for the parsing API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::extract_text_from_bytes;
use crate::models::resume::{ResumeCollection, ResumeRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub raw_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseBatchRequest {
    pub texts: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/parse
///
/// Multipart upload with a `file` field. The file name's extension selects
/// the text extractor.
pub async fn handle_parse_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeRecord>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file field has no file name".to_string()))?;
        upload = Some((file_name, field.bytes().await?));
        break;
    }

    let (file_name, data) = upload.ok_or_else(|| {
        AppError::Validation("multipart field 'file' is required".to_string())
    })?;

    info!("Parsing uploaded file '{}' ({} bytes)", file_name, data.len());

    let parser = state.parser.clone();
    let record = tokio::task::spawn_blocking(move || {
        extract_text_from_bytes(&file_name, &data).map(|text| parser.parse(&text))
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(record))
}

/// POST /api/v1/resumes/parse-text
///
/// Runs the pipeline over already-extracted text. Empty text is valid and
/// yields the empty record.
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(request): Json<ParseTextRequest>,
) -> Result<Json<ResumeRecord>, AppError> {
    let parser = state.parser.clone();
    let record = tokio::task::spawn_blocking(move || parser.parse(&request.raw_text))
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(record))
}

/// POST /api/v1/resumes/parse-batch
///
/// Parses several texts off the async workers; output order matches input order.
pub async fn handle_parse_batch(
    State(state): State<AppState>,
    Json(request): Json<ParseBatchRequest>,
) -> Result<Json<ResumeCollection>, AppError> {
    info!("Parsing batch of {} texts", request.texts.len());

    let parser = state.parser.clone();
    let resumes = tokio::task::spawn_blocking(move || {
        request
            .texts
            .iter()
            .map(|text| parser.parse(text))
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(ResumeCollection { resumes }))
}
