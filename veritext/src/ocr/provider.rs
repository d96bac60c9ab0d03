use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use leptess::LepTess;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{AppError, Result};

/// Side-channel progress callback, invoked with a stage label.
pub type ProgressObserver = Arc<dyn Fn(&str) + Send + Sync>;

enum OcrBackend {
    Tesseract { engine: Arc<Mutex<LepTess>> },
    Unavailable { reason: String },
}

pub struct OcrProvider {
    backend: OcrBackend,
    config: OcrConfig,
    observer: Option<ProgressObserver>,
}

fn create_tesseract(language: &str) -> std::result::Result<LepTess, String> {
    LepTess::new(None, language).map_err(|e| e.to_string())
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let backend = match create_tesseract(&config.language) {
            Ok(engine) => {
                info!(language = %config.language, "Tesseract OCR initialized");
                OcrBackend::Tesseract {
                    engine: Arc::new(Mutex::new(engine)),
                }
            }
            Err(e) => {
                let reason = format!("Tesseract not available: {e}");
                warn!("{}", reason);
                OcrBackend::Unavailable { reason }
            }
        };

        Ok(Self {
            backend,
            config: config.clone(),
            observer: None,
        })
    }

    /// Attach a progress observer. It only fires when debug mode is enabled.
    pub fn with_observer(mut self, observer: ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, OcrBackend::Unavailable { .. })
    }

    fn progress(&self, stage: &str) {
        if !self.config.debug {
            return;
        }
        if let Some(observer) = &self.observer {
            observer(stage);
        }
    }

    /// Extract plain text from the image at `path`.
    ///
    /// Returns the recognized text, which may be empty when the image holds
    /// no readable text (not an error at this layer). Single attempt, no
    /// retries.
    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        let timeout_duration = Duration::from_secs(self.config.timeout_secs);

        let result = tokio::time::timeout(timeout_duration, self.extract_internal(path)).await;

        match result {
            Ok(inner_result) => inner_result,
            Err(_) => Err(AppError::Ocr(format!(
                "OCR timed out after {} seconds",
                self.config.timeout_secs
            ))),
        }
    }

    async fn extract_internal(&self, path: &Path) -> Result<String> {
        self.progress("reading image");
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Ocr(format!("Failed to read image {}: {e}", path.display())))?;

        match &self.backend {
            OcrBackend::Tesseract { engine } => {
                self.progress("recognizing text");
                let engine = Arc::clone(engine);

                let text = tokio::task::spawn_blocking(move || {
                    let mut lt = engine.blocking_lock();
                    lt.set_image_from_mem(&bytes)
                        .map_err(|e| AppError::Ocr(format!("Failed to set image: {e}")))?;
                    lt.get_utf8_text()
                        .map_err(|e| AppError::Ocr(format!("Failed to extract text: {e}")))
                })
                .await
                .map_err(|e| AppError::Ocr(format!("OCR task panicked: {e}")))??;

                self.progress("completed");
                Ok(text.trim().to_string())
            }
            OcrBackend::Unavailable { reason } => Err(AppError::OcrUnavailable(reason.clone())),
        }
    }
}

impl Clone for OcrProvider {
    fn clone(&self) -> Self {
        let backend = match &self.backend {
            OcrBackend::Tesseract { engine } => OcrBackend::Tesseract {
                engine: Arc::clone(engine),
            },
            OcrBackend::Unavailable { reason } => OcrBackend::Unavailable {
                reason: reason.clone(),
            },
        };
        Self {
            backend,
            config: self.config.clone(),
            observer: self.observer.clone(),
        }
    }
}
