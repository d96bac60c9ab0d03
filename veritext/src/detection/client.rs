use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::DetectionConfig;
use crate::error::{AppError, Result};
use crate::models::DetectionResult;

const DETECT_PATH: &str = "/api/detect/detectText";

#[derive(Clone, Debug)]
pub struct DetectionClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    input_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct DetectEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<DetectionResult>,
    #[serde(default)]
    message: Option<String>,
}

impl DetectionClient {
    pub fn new(config: &DetectionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Detection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Classify `text` as human- or AI-written.
    ///
    /// Returns the upstream `data` payload verbatim on success.
    pub async fn detect(&self, text: &str) -> Result<DetectionResult> {
        if text.trim().is_empty() {
            warn!("Empty text provided for AI detection");
            return Ok(DetectionResult::zeroed());
        }

        info!(chars = text.len(), "Submitting text for AI detection");

        let response = self
            .client
            .post(format!("{}{DETECT_PATH}", self.base_url))
            .header("ApiKey", &self.api_key)
            .json(&DetectRequest { input_text: text })
            .send()
            .await
            .map_err(|e| AppError::Detection(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Detection(format!(
                "detection API returned status {status}"
            )));
        }

        let envelope: DetectEnvelope = response
            .json()
            .await
            .map_err(|e| AppError::Detection(format!("invalid response body: {e}")))?;

        if !envelope.success {
            return Err(AppError::Detection(format!(
                "detection API error: {}",
                envelope.message.unwrap_or_else(|| "unknown error".to_string())
            )));
        }

        let data = envelope
            .data
            .ok_or_else(|| AppError::Detection("detection API returned no data".to_string()))?;

        info!(fake_percentage = %data.fake_percentage, "AI detection completed");
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> DetectionConfig {
        DetectionConfig {
            api_key: "test-key".to_string(),
            base_url: "https://api.zerogpt.com".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_client_construction() {
        assert!(DetectionClient::new(&make_config()).is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let mut config = make_config();
        config.base_url = "https://api.zerogpt.com/".to_string();
        let client = DetectionClient::new(&config).unwrap();
        assert_eq!(client.base_url, "https://api.zerogpt.com");
    }

    #[tokio::test]
    async fn test_whitespace_text_short_circuits() {
        // base_url points at the real host; the call must never reach it.
        let client = DetectionClient::new(&make_config()).unwrap();
        let result = client.detect("   \n\t ").await.unwrap();
        assert_eq!(result, DetectionResult::zeroed());
    }
}
