mod api;
mod middleware;
mod view;

use std::time::Duration;

use takana_catalog::{CatalogCache, CatalogClient};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    view::Views,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = takana_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = CatalogClient::new(
        &config.catalog_base_url,
        config.catalog_timeout_secs,
        &config.catalog_user_agent,
    )?;
    let cache = CatalogCache::new(Duration::from_secs(config.catalog_cache_ttl_secs));
    let views = Views::new()?;
    let app = build_app(AppState::new(client, cache, views));

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        catalog_base_url = %config.catalog_base_url,
        "storefront listening"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM. A handler that cannot be installed is
/// logged and never fires; the other one still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        () = ctrl_c => "ctrl-c",
        () = terminate => "sigterm",
    };

    tracing::info!(signal = received, "stopping storefront after in-flight renders finish");
}
