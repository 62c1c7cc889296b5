//! Muse user service entry point.

use std::sync::Arc;

use axum::Router;
use muse_api::{AppState, router as api_router};
use muse_common::Config;
use muse_core::{AlarmGatewayService, LoveService, PictureGatewayService, UserService};
use muse_db::repositories::{LoveRepository, UserRepository};
use muse_gateway::{HttpAlarmGateway, HttpPictureGateway};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muse=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting muse user service...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = muse_db::init(&config.database).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    muse_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let love_repo = LoveRepository::new(Arc::clone(&db));

    // Outbound clients for the picture and alarm services
    let pictures: PictureGatewayService = Arc::new(HttpPictureGateway::new(&config.gateway)?);
    let alarms: AlarmGatewayService = Arc::new(HttpAlarmGateway::new(&config.gateway)?);

    // Initialize services
    let user_service = UserService::new(user_repo.clone());
    let love_service = LoveService::new(love_repo, user_repo, pictures, alarms);

    // Create app state
    let state = AppState {
        user_service,
        love_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
