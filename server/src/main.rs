//! HTTP server for the Lumen studio marketplace.

use lumen_postgres::{
    PgBookingRepository, PgEditRequestRepository, PgPhotographerRepository, PgReportingStore,
    PgReviewRepository, PgSettingsRepository, PgTestimonialRepository, PgUserRepository,
};
use lumen_web::{AppState, UploadConfig, build_router};
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen_server=info,lumen_web=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        host = %config.host,
        port = config.port,
        uploads_dir = %config.uploads_dir,
        "Configuration loaded"
    );

    info!("Connecting to database...");
    let pool = lumen_postgres::connect(&config.database_url, config.max_connections).await?;
    lumen_postgres::run_migrations(&pool).await?;
    info!("Database ready");

    let state = AppState::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgPhotographerRepository::new(pool.clone())),
        Arc::new(PgBookingRepository::new(pool.clone())),
        Arc::new(PgReviewRepository::new(pool.clone())),
        Arc::new(PgTestimonialRepository::new(pool.clone())),
        Arc::new(PgEditRequestRepository::new(pool.clone())),
        Arc::new(PgSettingsRepository::new(pool.clone())),
        Arc::new(PgReportingStore::new(pool)),
        UploadConfig::new(&config.uploads_dir),
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    info!(address = %addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
