mod api;
mod middleware;

use std::sync::Arc;

use influtrust_core::{load_category_dictionary, load_targets, CategoryDictionary, Environment};
use influtrust_metrics::SnapshotHistory;
use influtrust_platforms::PlatformClients;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = influtrust_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let targets = load_targets(&config.targets_path)?.influencers;
    let dictionary = match &config.categories_path {
        Some(path) => load_category_dictionary(path)?,
        None => CategoryDictionary::default(),
    };
    let clients = PlatformClients::from_config(&config)?;
    if clients.configured().is_empty() {
        tracing::warn!("no platform credentials configured; dashboard will be empty");
    }
    tracing::info!(
        env = %config.env,
        targets = targets.len(),
        platforms = ?clients.configured(),
        "starting influtrust server"
    );

    let auth = AuthState::from_env(matches!(config.env, Environment::Development))?;
    let state = AppState {
        clients: Arc::new(clients),
        targets: Arc::new(targets),
        dictionary: Arc::new(dictionary),
        trends: Arc::new(SnapshotHistory::default()),
        max_concurrent_targets: config.max_concurrent_targets,
    };
    let app = build_app(state, auth, default_rate_limit_state());

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
