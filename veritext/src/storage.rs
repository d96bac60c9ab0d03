//! Temp-upload storage. Files are written under the configured upload
//! directory with generated unique names and either deleted after the
//! request (when configured) or left on disk.

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::error::{AppError, Result};
use crate::models::UploadedImage;

pub async fn ensure_upload_dir(config: &UploadConfig) -> Result<()> {
    tokio::fs::create_dir_all(&config.dir).await?;
    Ok(())
}

/// `<uuid>-<timestamp><ext>`; unique per upload, so concurrent requests
/// never collide in the shared directory.
pub fn unique_filename(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{}-{}{}", Uuid::new_v4(), Utc::now().timestamp_millis(), ext)
}

/// Validate one multipart file part and persist it.
///
/// Rejections (non-image MIME type, oversized payload) are validation
/// failures and abort the request before any processing starts.
pub async fn store_upload(
    config: &UploadConfig,
    original_name: &str,
    mime_type: &str,
    bytes: &[u8],
) -> Result<UploadedImage> {
    if !mime_type.starts_with("image/") {
        return Err(AppError::Validation(format!(
            "Only image files are allowed (got '{mime_type}' for '{original_name}')"
        )));
    }
    if bytes.len() > config.max_file_size {
        return Err(AppError::Validation(format!(
            "File '{original_name}' is too large: {} bytes (max {} bytes)",
            bytes.len(),
            config.max_file_size
        )));
    }

    let stored_path = config.dir.join(unique_filename(original_name));
    tokio::fs::write(&stored_path, bytes).await?;

    Ok(UploadedImage {
        original_name: original_name.to_string(),
        stored_path,
        mime_type: mime_type.to_string(),
        size_bytes: bytes.len() as u64,
    })
}

/// Best-effort removal of stored files. Failures are logged, never surfaced
/// to the client.
pub async fn remove_uploads(files: &[UploadedImage]) {
    for file in files {
        if let Err(e) = tokio::fs::remove_file(&file.stored_path).await {
            tracing::error!(
                path = %file.stored_path.display(),
                error = %e,
                "Failed to delete uploaded file"
            );
        }
    }
}
