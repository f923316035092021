//! staffops - workforce operations backend
//!
//! Serves the HR record stores (personnel, leave, travel, tickets,
//! candidates, plant visitors) and an aggregated ops dashboard that folds
//! in a live attendance feed from biometric access-control devices.

mod auth;
mod config;
mod dashboard;
mod db;
mod error;
mod web;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before any other initialization)
    let _ = dotenvy::dotenv();

    // Initialize logging based on LOG_FORMAT env var
    // Use LOG_FORMAT=gcp for structured GCP Cloud Logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "gcp" {
        tracing_subscriber::registry()
            .with(tracing_subscriber::filter::LevelFilter::INFO)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .init();
    }

    info!("Starting staffops...");

    // Load configuration
    let config = config::Config::load()?;
    info!("Configuration loaded");

    // Initialize database
    let db = db::Database::new(&config.database).await?;
    db.run_migrations().await?;
    info!("Database initialized");

    // Attendance device client
    let devices = dashboard::attendance::DeviceClient::new(config.attendance.clone())?;
    if devices.device_count() > 0 {
        info!("Attendance feed enabled ({} devices)", devices.device_count());
    } else {
        info!("Attendance feed disabled (no devices configured)");
    }

    // Start web server (blocking)
    web::start_server(&config, db, devices).await?;

    Ok(())
}
