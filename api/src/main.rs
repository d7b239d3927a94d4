use anyhow::{Context, Result};
use std::sync::Arc;
use syllabus_parser::config::ExtractorConfig;
use syllabus_parser::{Config, SyllabusService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("Failed to load configuration")?;
    log::info!(
        "Using model {} with {} text extraction",
        config.gemini.model,
        match config.extractor {
            ExtractorConfig::Local => "local",
            ExtractorConfig::Conversion(_) => "conversion API",
        }
    );

    let syllabus_service = Arc::new(SyllabusService::from_config(&config));
    let app = syllabus_api::app(syllabus_service, config.server.max_body_bytes);

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.server.host, config.server.port))?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
