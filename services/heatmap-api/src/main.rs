//! Heatmap tile server.
//!
//! Serves 256×256 PNG density tiles at `/tiles/{z}/{x}/{y}.png` for a point
//! set loaded from a configurable source, optionally refreshed on a timer.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use heatmap_api::config::ServiceConfig;
use heatmap_api::create_router;
use heatmap_api::refresh::Refresher;
use heatmap_api::sources::build_source;
use heatmap_api::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "heatmap-api")]
#[command(about = "Point-density heatmap tile server")]
struct Args {
    /// Listen address
    #[arg(long, env = "HEATMAP_LISTEN", default_value = "0.0.0.0:8888")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// YAML configuration file
    #[arg(long, env = "HEATMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Tile output directory (overrides the config file)
    #[arg(long, env = "HEATMAP_TILES_DIR")]
    tiles_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting heatmap tile server");

    let mut config = ServiceConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.tiles_dir {
        config.tiles.root = dir;
    }
    info!(
        tiles_root = %config.tiles.root.display(),
        source = ?config.points.source,
        refresh_interval_secs = config.points.refresh_interval_secs,
        "Configuration resolved"
    );

    let refresh_interval = Duration::from_secs(config.points.refresh_interval_secs);
    let source = build_source(&config)?;
    let state = Arc::new(AppState::new(config, prometheus_handle)?);
    let refresher = Refresher::new(source, state.points.clone(), refresh_interval);

    // Initial load. Serving starts either way; an empty snapshot renders placeholders.
    match refresher.refresh_once().await {
        Ok(generation) => info!(generation = generation, "Initial point load complete"),
        Err(e) => warn!(error = %e, "Initial point load failed, serving empty point set"),
    }

    // Shutdown signal
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let refresh_shutdown = shutdown_tx.subscribe();
    let refresh_task = tokio::spawn(async move {
        refresher.run_forever(refresh_shutdown).await;
    });

    let app = create_router(state);

    // Parse listen address
    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let mut server_shutdown = shutdown_tx.subscribe();
    let shutdown_tx_clone = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        shutdown_tx_clone.send(()).ok();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            server_shutdown.recv().await.ok();
        })
        .await?;

    if let Err(e) = refresh_task.await {
        error!(error = %e, "Refresh task failed");
    }

    info!("Heatmap tile server stopped");
    Ok(())
}
