// src/main.rs
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;

use std::net::SocketAddr;
use std::time::Duration;

use axum_server::Handle;
use dotenvy::dotenv;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use config::Config;

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load environment variables from .env file
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env();

    // Connect and bootstrap the schema before accepting any traffic.
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to the database");
    db::init_db(&pool)
        .await
        .expect("Failed to initialize the database schema");

    let app = routes::create_routes(pool, &config.client_url);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server running on port {}", config.port);

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .expect("Server error");

    info!("Server shut down");
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
