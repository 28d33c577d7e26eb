use std::sync::Arc;

use anyhow::Context;
use event_planner_api::app::create_app;
use event_planner_api::config::Config;
use event_planner_api::middleware::{init_metrics, logging::init_logging};
use persistence::db::{create_pool, DatabaseConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load().context("failed to load configuration")?;
    init_logging(&config.logging);
    init_metrics();

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "starting event planner api"
    );

    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        connect_timeout_secs: config.database.connect_timeout_secs,
        idle_timeout_secs: config.database.idle_timeout_secs,
    };
    let pool = create_pool(&db_config)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    tracing::info!("migrations applied");

    let metrics_pool = pool.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(30));
        loop {
            interval.tick().await;
            persistence::metrics::record_pool_metrics(&metrics_pool);
        }
    });

    let addr = config.socket_addr();
    let app = create_app(pool, Arc::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
