//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod sweep;

use auth::{AuthConfig, auth_router, auth_state, protect};
use axum::{
    Json, Router,
    http::{Method, header},
    routing::get,
};
use ledger::{PgLedgerRepository, admin_router, user_router};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,ledger=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(server_config.max_connections)
        .connect(&server_config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let repo = PgLedgerRepository::new(pool);

    // Daily counter sweep: catch-up now, then every UTC midnight
    if server_config.daily_reset_enabled {
        sweep::spawn_daily_reset(Arc::new(repo.clone()));
    } else {
        tracing::info!("Daily reset sweep disabled");
    }

    // Token configuration
    let auth_config = match server_config.token_secret {
        Some(secret) => AuthConfig::new(secret),
        None => {
            tracing::warn!("AUTH_TOKEN_SECRET not set, using a random secret for this process");
            AuthConfig::with_random_secret()
        }
    }
    .with_admins(server_config.admin_telegram_ids.iter().copied());

    tracing::info!(
        admins = server_config.admin_telegram_ids.len(),
        "Auth configured"
    );

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(server_config.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let state = auth_state(repo.clone(), auth_config);
    let api = auth_router(state.clone())
        .merge(protect(
            state,
            user_router(repo.clone()),
            admin_router(repo),
        ))
        .route("/health", get(health));

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
