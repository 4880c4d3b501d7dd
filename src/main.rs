//! Team Roster Backend
//!
//! A REST backend answering filtered, paginated queries over an in-memory team roster.

mod api;
mod clock;
mod config;
mod errors;
mod models;
mod query;
mod roster;

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clock::{Clock, SystemClock};
use config::{Config, LogFormat};
use roster::{generate_roster, Roster};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<Roster>,
    pub clock: Arc<dyn Clock>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Starting Team Roster Backend");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!(
        "Roster shape: {} members, {} projects, timezones {:?}",
        config.generator.member_count,
        config.generator.project_count,
        config.generator.timezones
    );

    // Generate seed data
    let today = chrono::Utc::now().date_naive();
    let roster = Arc::new(generate_roster(&config.generator, config.seed, today)?);
    tracing::info!(
        "Roster generated with {} members{}",
        roster.member_count(),
        config
            .seed
            .map(|seed| format!(" (seed {})", seed))
            .unwrap_or_default()
    );

    // Create application state
    let state = AppState {
        roster,
        clock: Arc::new(SystemClock),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Panics become opaque 500s; the roster stays usable for later requests.
    let roster = Arc::clone(&state.roster);
    let catch_panic =
        CatchPanicLayer::custom(move |payload: Box<dyn std::any::Any + Send + 'static>| {
            errors::panic_response(payload, roster.revision())
        });

    // API routes
    let api_routes = Router::new()
        // Members
        .route("/members", get(api::list_members))
        .route("/members/{id}", get(api::get_member))
        .route("/members/{id}/current_project", put(api::reassign_project))
        // Projects
        .route("/projects", get(api::list_projects))
        .route("/projects/{id}", get(api::get_project));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(catch_panic)
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
