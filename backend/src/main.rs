//! Crop Disease Tracker - Backend Server
//!
//! Serves the disease map, severity trend and report submission endpoints
//! backed by PostgreSQL, falling back to a fixed sample data set when the
//! store is unreachable at startup.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod services;

pub use config::Config;

use services::DataSource;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub datasource: Arc<DataSource>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cdt_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Crop Disease Tracker Server");
    tracing::info!("Environment: {}", config.environment);

    // Attempt the store connection; a failure here selects offline mode with
    // sample data and disabled reporting instead of aborting.
    tracing::info!("Connecting to database...");
    let connect_result = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await;

    let datasource = match connect_result {
        Ok(pool) => {
            tracing::info!("Database connection established");

            // Run migrations in development
            if config.environment == "development" {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Migrations completed");
            }

            DataSource::connected(pool, Duration::from_secs(config.cache.ttl_seconds))
        }
        Err(e) => {
            tracing::warn!(
                "Database connection failed ({e}); serving sample data, reporting disabled"
            );
            DataSource::offline()
        }
    };

    // Create application state
    let state = AppState {
        datasource: Arc::new(datasource),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(liveness))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Crop Disease Tracker API v1.0"
}

/// Bare liveness endpoint
async fn liveness() -> &'static str {
    "OK"
}
