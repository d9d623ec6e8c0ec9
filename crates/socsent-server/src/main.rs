mod api;
mod middleware;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use socsent_core::ReportSettings;
use socsent_db::PgDocumentStore;
use socsent_inference::InferenceClient;

use crate::{
    api::{build_app, AppState},
    middleware::{RateLimitState, TokenValidator},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = socsent_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, inference_url = %config.inference_url, "starting socsent server");

    let pool_config = socsent_db::PoolConfig::from_app_config(&config);
    let pool = socsent_db::connect_pool(&config.database_url, pool_config)
        .await
        .context("failed to connect to database")?;
    socsent_db::run_migrations(&pool).await?;

    let inference = InferenceClient::new(&config.inference_url, config.inference_timeout_secs)?;
    let validator = TokenValidator::from_base64_secret(&config.jwt_secret)?;

    let state = AppState {
        store: PgDocumentStore::new(pool),
        inference,
        settings: Arc::new(ReportSettings::from_app_config(&config)),
    };
    let app = build_app(
        state,
        validator,
        RateLimitState::per_minute(config.rate_limit_per_minute),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
