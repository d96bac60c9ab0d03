use axum::Json;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: String,
    pub timestamp: String,
}

/// `GET /health`
pub async fn health_check() -> Json<HealthData> {
    Json(HealthData {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
