//! Request-scoped data types. Nothing here outlives a single HTTP
//! request/response cycle.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A multipart file part that passed validation and was written to the
/// upload directory.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_name: String,
    pub stored_path: PathBuf,
    pub mime_type: String,
    pub size_bytes: u64,
}

/// The `data` payload returned by the detection API, kept verbatim.
///
/// Upstream sends `fakePercentage` as either a string or a number depending
/// on the endpoint version, so the well-known fields stay untyped and any
/// extra fields are preserved through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(rename = "fakePercentage", default)]
    pub fake_percentage: Value,
    #[serde(rename = "aiWords", default)]
    pub ai_words: Value,
    #[serde(rename = "textWords", default)]
    pub text_words: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DetectionResult {
    /// Zero-valued result used when there is no text to classify.
    pub fn zeroed() -> Self {
        Self {
            fake_percentage: json!("0"),
            ai_words: json!("0"),
            text_words: json!("0"),
            extra: Map::new(),
        }
    }

    /// `fakePercentage` as a float. Missing or unparseable values count as 0.
    pub fn fake_percentage_value(&self) -> f64 {
        match &self.fake_percentage {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Per-image outcome. Exactly one report is produced per uploaded file, in
/// upload order; a failed file never fails the whole request.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ImageReport {
    #[serde(rename_all = "camelCase")]
    Success {
        image_name: String,
        extracted_text: String,
        human_percentage: f64,
        ai_percentage: f64,
        detection_details: DetectionResult,
    },
    /// OCR succeeded but found no text; percentages serialize as null and
    /// the detection API is never consulted.
    #[serde(rename_all = "camelCase")]
    NoText {
        image_name: String,
        extracted_text: String,
        human_percentage: Option<f64>,
        ai_percentage: Option<f64>,
        error: String,
    },
    #[serde(rename_all = "camelCase")]
    Failed { image_name: String, error: String },
}

impl ImageReport {
    pub fn success(image_name: &str, extracted_text: &str, detection: DetectionResult) -> Self {
        let ai_percentage = detection.fake_percentage_value();
        Self::Success {
            image_name: image_name.to_string(),
            extracted_text: extracted_text.to_string(),
            human_percentage: 100.0 - ai_percentage,
            ai_percentage,
            detection_details: detection,
        }
    }

    pub fn no_text(image_name: &str) -> Self {
        Self::NoText {
            image_name: image_name.to_string(),
            extracted_text: String::new(),
            human_percentage: None,
            ai_percentage: None,
            error: "No text extracted from image".to_string(),
        }
    }

    pub fn failed(image_name: &str, error: impl Into<String>) -> Self {
        Self::Failed {
            image_name: image_name.to_string(),
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub results: Vec<ImageReport>,
}
