mod api;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use dealhunt_scraper::{Aggregator, VendorClient};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dealhunt_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let vendors = dealhunt_core::builtin_vendors();
    dealhunt_core::validate_vendors(&vendors)?;
    tracing::info!(vendors = vendors.len(), env = %config.env, "starting dealhunt-server");

    let client = VendorClient::new(config.request_timeout_secs, &config.user_agent)?;
    let aggregator = Aggregator::new(
        client,
        vendors,
        Duration::from_secs(config.cache_ttl_secs),
    );

    let app = build_app(AppState {
        aggregator: Arc::new(aggregator),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
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
