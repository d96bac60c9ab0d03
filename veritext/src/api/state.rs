use std::sync::Arc;

use crate::config::Config;
use crate::detection::DetectionClient;
use crate::ocr::OcrProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ocr: OcrProvider,
    pub detector: DetectionClient,
}

impl AppState {
    pub fn new(config: Config, ocr: OcrProvider, detector: DetectionClient) -> Self {
        Self {
            config: Arc::new(config),
            ocr,
            detector,
        }
    }
}
