use std::time::Instant;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::analysis::extract::{extract, Document, DocumentFormat};
use crate::errors::AppError;
use crate::models::score::{AnalysisMetadata, ScoreResult};
use crate::state::AppState;

/// Extracted text shorter than this (after trimming) is not worth scoring.
const MIN_EXTRACTED_CHARS: usize = 50;
const UPLOAD_FIELD: &str = "file";

#[derive(Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub metadata: AnalysisMetadata,
}

fn human_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{}KB", bytes / 1024)
    }
}

/// GET /api/v1/resume/analyze
pub async fn handle_analyze_info(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "Resume Analysis API",
        "supported_formats": ["PDF", "TXT"],
        "max_file_size": human_size(state.config.max_upload_bytes),
    }))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<Document, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(Document::new(filename, bytes));
    }
    Err(AppError::Validation("No file provided".to_string()))
}

fn check_upload(upload: &Document, max_bytes: usize, min_bytes: usize) -> Result<(), AppError> {
    if upload.format().is_none() {
        return Err(AppError::Validation(format!(
            "Unsupported file format. Allowed extensions: {}",
            DocumentFormat::SUPPORTED_EXTENSIONS.join(", ")
        )));
    }
    let size = upload.bytes.len();
    if size > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds {} limit",
            human_size(max_bytes)
        )));
    }
    if size < min_bytes {
        return Err(AppError::Validation(format!(
            "File too small. Minimum size is {}",
            human_size(min_bytes)
        )));
    }
    Ok(())
}

/// POST /api/v1/resume/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let started = Instant::now();

    let upload = read_upload(&mut multipart).await?;
    if let Err(e) = check_upload(
        &upload,
        state.config.max_upload_bytes,
        state.config.min_upload_bytes,
    ) {
        warn!("Rejected upload '{}': {e}", upload.filename);
        return Err(e);
    }

    let analyzer = state.analyzer.clone().ok_or_else(|| {
        AppError::ServiceUnavailable("Analyzer service unavailable".to_string())
    })?;

    let filename = upload.filename.clone();
    info!("Analyzing '{filename}' ({} bytes)", upload.bytes.len());

    // PDF parsing and scoring are CPU-bound.
    let text = tokio::task::spawn_blocking(move || extract(&upload))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    if text.trim().chars().count() < MIN_EXTRACTED_CHARS {
        warn!("Extracted text from '{filename}' is too short to analyze");
        return Err(AppError::Validation(
            "Document content insufficient".to_string(),
        ));
    }
    let document_length = text.chars().count();

    let result = tokio::task::spawn_blocking(move || analyzer.analyze(&text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}")))?;

    let elapsed = started.elapsed().as_secs_f64();
    let metadata = AnalysisMetadata {
        processing_time: (elapsed * 100.0).round() / 100.0,
        document_length,
        filename,
        timestamp: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
    };
    info!(
        "Analysis of '{}' complete: overall {} in {:.2}s",
        metadata.filename, result.overall_score, metadata.processing_time
    );

    Ok(Json(AnalyzeResponse { result, metadata }))
}
