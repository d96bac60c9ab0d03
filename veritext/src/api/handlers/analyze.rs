//! `POST /api/analyze` — the upload intake and orchestration endpoint.
//!
//! Files are processed strictly sequentially, in upload order: OCR first,
//! then AI detection on the extracted text. Each file yields exactly one
//! [`ImageReport`]; per-file failures are recorded in the report and never
//! fail the request. Cleanup of stored files runs after the outcome is
//! decided, on success and error paths alike.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info};

use crate::api::AppState;
use crate::detection::DetectionClient;
use crate::error::{AppError, Result};
use crate::models::{AnalysisResponse, ImageReport, UploadedImage};
use crate::storage;

pub async fn analyze(State(state): State<AppState>, multipart: Multipart) -> Response {
    let mut stored: Vec<UploadedImage> = Vec::new();
    let outcome = run_analysis(&state, multipart, &mut stored).await;

    if state.config.upload.delete_after_processing {
        storage::remove_uploads(&stored).await;
    }

    match outcome {
        Ok(results) => (
            StatusCode::OK,
            Json(AnalysisResponse {
                success: true,
                results,
            }),
        )
            .into_response(),
        Err(err) => {
            if !matches!(err, AppError::Validation(_)) {
                error!(error = %err, "Analyze request failed");
            }
            err.into_body(state.config.server.dev_mode)
        }
    }
}

async fn run_analysis(
    state: &AppState,
    multipart: Multipart,
    stored: &mut Vec<UploadedImage>,
) -> Result<Vec<ImageReport>> {
    receive_uploads(state, multipart, stored).await?;

    if stored.is_empty() {
        return Err(AppError::Validation("No images uploaded".to_string()));
    }

    info!(count = stored.len(), "Processing uploaded images");

    let mut results = Vec::with_capacity(stored.len());
    for file in stored.iter() {
        results.push(process_image(state, file).await);
    }
    Ok(results)
}

/// Drain the multipart stream, persisting every `images` part that passes
/// validation. Count, size, and MIME rejections abort the request with a
/// validation failure (HTTP 400); files already stored are left in `stored`
/// so cleanup still covers them.
async fn receive_uploads(
    state: &AppState,
    mut multipart: Multipart,
    stored: &mut Vec<UploadedImage>,
) -> Result<()> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?;
        let Some(field) = field else { break };

        if field.name() != Some("images") {
            continue;
        }

        if stored.len() >= state.config.upload.max_files {
            return Err(AppError::Validation(format!(
                "Too many files: at most {} images per request",
                state.config.upload.max_files
            )));
        }

        let original_name = field.file_name().unwrap_or("image").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = field.bytes().await.map_err(|e| {
            AppError::Validation(format!("Failed to read file '{original_name}': {e}"))
        })?;

        let image = storage::store_upload(&state.config.upload, &original_name, &mime_type, &bytes)
            .await?;
        stored.push(image);
    }
    Ok(())
}

/// Per-file processing step. Never fails the request: every outcome,
/// including OCR and detection errors, collapses into an [`ImageReport`].
async fn process_image(state: &AppState, file: &UploadedImage) -> ImageReport {
    match state.ocr.extract_text(&file.stored_path).await {
        Ok(text) => report_from_text(&file.original_name, &text, &state.detector).await,
        Err(err) => {
            error!(image = %file.original_name, error = %err, "OCR failed");
            ImageReport::failed(&file.original_name, format!("Failed to process: {err}"))
        }
    }
}

/// Build the report for one file once OCR has produced `text`. Empty or
/// whitespace-only text skips the detection call entirely.
pub async fn report_from_text(
    image_name: &str,
    text: &str,
    detector: &DetectionClient,
) -> ImageReport {
    if text.trim().is_empty() {
        return ImageReport::no_text(image_name);
    }

    match detector.detect(text).await {
        Ok(detection) => ImageReport::success(image_name, text, detection),
        Err(err) => {
            error!(image = %image_name, error = %err, "AI detection failed");
            ImageReport::failed(image_name, format!("Failed to process: {err}"))
        }
    }
}
