//! # Weekslot API
//!
//! The API crate provides the web server for the weekly slot scheduler. It
//! exposes recurring slot creation, week materialization and per-date
//! exceptions over JSON.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract parameters and call the slot service
//! - **Middleware**: Error-to-response mapping
//! - **Config**: Environment configuration
//!
//! The API uses Axum as the web framework. Storage sits behind the
//! `SlotStore` port, backed by PostgreSQL in production.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use weekslot_core::service::SlotService;
use weekslot_db::{DbPool, PgSlotStore};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use weekslot_api::ApiState;
/// use weekslot_core::{memory::InMemorySlotStore, service::SlotService, time::WeekdayNumbering};
///
/// let service = SlotService::new(Arc::new(InMemorySlotStore::new()), WeekdayNumbering::Sunday);
/// let app = weekslot_api::app(Arc::new(ApiState { service }));
/// # let _ = app;
/// ```
pub struct ApiState {
    /// Slot service wired to the configured store
    pub service: SlotService,
}

/// Builds the application router with every route attached to `state`
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Recurring slot and exception endpoints
        .merge(routes::slots::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// Sets up logging, wires the PostgreSQL store into the slot service, applies
/// CORS and timeout layers and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = Arc::new(PgSlotStore::new(db_pool));
    let service = SlotService::new(store, config.week_start);
    let state = Arc::new(ApiState { service });

    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        app.layer(cors_layer(origins)?)
    } else {
        app
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Server listening on http://{} (week starts on {})",
        addr, config.week_start
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins)
        .allow_credentials(true))
}
