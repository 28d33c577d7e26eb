//! Application state and router assembly.

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};

use persistence::repositories::{
    EventRepository, ExpenseRepository, GiftRepository, GuestRepository,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: PgPool,
    pub events: EventRepository,
    pub guests: GuestRepository,
    pub expenses: ExpenseRepository,
    pub gifts: GiftRepository,
}

impl AppState {
    pub fn new(pool: PgPool, config: Arc<Config>) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            guests: GuestRepository::new(pool.clone()),
            expenses: ExpenseRepository::new(pool.clone()),
            gifts: GiftRepository::new(pool.clone()),
            pool,
            config,
        }
    }
}

/// Assemble the full application router.
pub fn create_app(pool: PgPool, config: Arc<Config>) -> Router {
    let state = AppState::new(pool, config.clone());

    let api = Router::new()
        .route(
            "/events/:event_id/import/:kind",
            post(routes::imports::import_spreadsheet),
        )
        .route(
            "/events/:event_id/export/:kind",
            get(routes::exports::export_spreadsheet),
        )
        .route("/import/:kind/template", get(routes::imports::import_template))
        .route("/events/:event_id/guests", delete(routes::guests::delete_guests));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(routes::health::health))
        .route("/health/ready", get(routes::health::ready))
        .route("/health/live", get(routes::health::live))
        .route("/metrics", get(metrics_handler))
        .layer(axum::middleware::from_fn(metrics_middleware))
        .layer(axum::middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(config.limits.max_upload_bytes))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = &config.security.cors_origins;
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(methods)
            .allow_headers(Any)
    }
}
