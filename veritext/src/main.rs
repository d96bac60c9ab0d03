use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use veritext::api::{create_router, AppState};
use veritext::config::Config;
use veritext::detection::DetectionClient;
use veritext::ocr::OcrProvider;
use veritext::storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("veritext={},tower_http=info", config.server.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.detection.api_key.is_empty() {
        tracing::warn!(
            "ZEROGPT_API_KEY is not set — detection calls will be rejected by the upstream API"
        );
    }

    tracing::info!(dir = %config.upload.dir.display(), "Preparing upload directory");
    storage::ensure_upload_dir(&config.upload).await?;

    tracing::info!(language = %config.ocr.language, "Initializing OCR provider");
    let mut ocr = OcrProvider::new(&config.ocr)?;
    if config.ocr.debug {
        ocr = ocr.with_observer(std::sync::Arc::new(|stage: &str| {
            tracing::debug!(stage, "OCR progress");
        }));
    }
    if !ocr.is_available() {
        tracing::warn!("OCR unavailable - every uploaded image will report a processing error");
    }

    let detector = DetectionClient::new(&config.detection)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, ocr, detector);
    let app = create_router(state);

    tracing::info!("veritext starting on http://{}", addr);
    tracing::info!("  Analyze:      POST http://{}/api/analyze", addr);
    tracing::info!("  Health check: GET  http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
