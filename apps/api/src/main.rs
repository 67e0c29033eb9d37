mod config;
mod errors;
mod layout;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::{default_page_config, PaginationOptions};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; malformed values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-pager v{}", env!("CARGO_PKG_VERSION"));

    // Page geometry for the configured paper size
    let mut page_config = default_page_config(config.paper_size);
    page_config.max_pages_per_column = config.max_pages_per_column;
    page_config
        .validate()
        .context("Invalid layout configuration")?;
    info!(
        "Layout page config: {:?} {}x{}px, max {} pages per column",
        page_config.paper,
        page_config.page_width_px,
        page_config.page_height_px,
        page_config.max_pages_per_column
    );

    let options = PaginationOptions {
        overflow: config.overflow_policy,
        ..PaginationOptions::default()
    };
    info!("Overflow policy: {:?}", options.overflow);

    // Build app state
    let state = AppState {
        config: config.clone(),
        page_config,
        options,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
