//! Vintage Storefront - order intake backed by Google Sheets and email

use std::sync::Arc;

use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vintage_storefront::adapters::{GoogleSheetsRecorder, SmtpNotifier};
use vintage_storefront::services::OrderPipeline;
use vintage_storefront::{router, AppState, StorefrontConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env().context("loading configuration")?;
    let db = PgPoolOptions::new().max_connections(10).connect(config.database_url.expose_secret()).await?;
    sqlx::migrate!("./migrations").run(&db).await?;

    let recorder = GoogleSheetsRecorder::new(&config.sheets)?;
    let notifier = SmtpNotifier::new(config.email.as_ref())?;
    let pipeline = OrderPipeline::new(Arc::new(recorder), Arc::new(notifier));

    let app = router(AppState { db, pipeline, sheet_id: config.sheets.sheet_id.clone() });

    let addr = config.socket_addr();
    tracing::info!("🚀 Vintage Storefront listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
