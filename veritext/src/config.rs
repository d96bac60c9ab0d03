use serde::Deserialize;
use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse `ALLOWED_ORIGINS` env var.
/// Comma-separated origin list; `*` (or unset) means any origin.
fn parse_allowed_origins() -> Option<Vec<String>> {
    match env::var("ALLOWED_ORIGINS") {
        Ok(val) if !val.trim().is_empty() && val.trim() != "*" => Some(
            val.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        _ => None,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub ocr: OcrConfig,
    pub detection: DetectionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Expose underlying error messages in 500 responses.
    pub dev_mode: bool,
    pub log_level: String,
    /// `None` means any origin.
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_file_size: usize,
    pub max_files: usize,
    pub delete_after_processing: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// ISO 639-2 language code(s) handed to Tesseract, e.g. "eng" or "eng+deu".
    pub language: String,
    pub timeout_secs: u64,
    /// Gates the progress observer side channel.
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PORT", 3000),
                dev_mode: env::var("APP_ENV")
                    .map(|v| v == "development")
                    .unwrap_or(false),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                allowed_origins: parse_allowed_origins(),
            },
            upload: UploadConfig {
                dir: PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string())),
                max_file_size: parse_env_or("MAX_FILE_SIZE", 10 * 1024 * 1024),
                max_files: parse_env_or("MAX_FILES", 10),
                delete_after_processing: parse_env_or("DELETE_UPLOADS_AFTER_PROCESSING", false),
            },
            ocr: OcrConfig {
                language: env::var("OCR_LANGUAGE").unwrap_or_else(|_| "eng".to_string()),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 60),
                debug: parse_env_or("DEBUG_MODE", false),
            },
            detection: DetectionConfig {
                api_key: env::var("ZEROGPT_API_KEY").unwrap_or_default(),
                base_url: env::var("ZEROGPT_BASE_URL")
                    .unwrap_or_else(|_| "https://api.zerogpt.com".to_string()),
                timeout_secs: parse_env_or("DETECTION_TIMEOUT", 30),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
