mod config;
mod error;
mod middleware;
mod models;
mod routes;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::{
    cleanup::{start_cleanup_task, CleanupConfig},
    metrics,
    provider::{HttpProvider, MediaProvider},
    rate_limit::RateLimiter,
};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub provider: Arc<dyn MediaProvider>,
    pub limiter: Arc<RateLimiter>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<dyn MediaProvider>) -> Self {
        let limiter = Arc::new(RateLimiter::new(
            config.rate_limit,
            config.rate_limit_window(),
            config.rate_limit_max,
            config.rate_limit_max_clients,
        ));

        Self {
            config,
            provider,
            limiter,
            start_time: Instant::now(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streamflix_gateway=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;

    tracing::info!("Starting StreamFlix Gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.node_env);

    metrics::init();

    let provider = HttpProvider::new(&config.base_url, &config.user_agent)?;
    tracing::info!("Provider client initialized: {}", config.base_url);

    let sweep_secs = config.rate_limit_sweep_secs;
    let state = Arc::new(AppState::new(config, Arc::new(provider)));

    if state.limiter.is_enabled() {
        tracing::info!(
            "Rate limiting enabled: {} requests per {}s",
            state.config.rate_limit_max,
            state.config.rate_limit_window_secs
        );
        // Start cleanup task (runs in background)
        tokio::spawn(start_cleanup_task(
            state.limiter.clone(),
            CleanupConfig {
                interval_secs: sweep_secs,
            },
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
