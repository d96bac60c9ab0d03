use std::path::Path;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;

use veritext::api::{create_router, AppState};
use veritext::config::{Config, DetectionConfig, OcrConfig, ServerConfig, UploadConfig};
use veritext::detection::DetectionClient;
use veritext::ocr::OcrProvider;

pub const BOUNDARY: &str = "veritext-test-boundary-7MA4YWxkTrZu0gW";

pub fn test_config(upload_dir: &Path, detection_base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            dev_mode: false,
            log_level: "info".to_string(),
            allowed_origins: None,
        },
        upload: UploadConfig {
            dir: upload_dir.to_path_buf(),
            max_file_size: 1024 * 1024,
            max_files: 10,
            delete_after_processing: false,
        },
        ocr: OcrConfig {
            language: "eng".to_string(),
            timeout_secs: 30,
            debug: false,
        },
        detection: DetectionConfig {
            api_key: "test-key".to_string(),
            base_url: detection_base_url.to_string(),
            timeout_secs: 5,
        },
    }
}

pub fn test_router(config: Config) -> Router {
    let ocr = OcrProvider::new(&config.ocr).expect("ocr provider");
    let detector = DetectionClient::new(&config.detection).expect("detection client");
    create_router(AppState::new(config, ocr, detector))
}

/// Build a raw multipart body where every part is a file under the
/// `images` field: (filename, content type, bytes).
pub fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (filename, content_type, bytes) in parts {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"images\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn analyze_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}

pub async fn response_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}
