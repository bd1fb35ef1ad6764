//! MarketLens — OHLCV query API over a directory of per-symbol CSV files.
//!
//! An external process populates `{data_dir}/{SYMBOL}.csv`; this binary serves
//! the read-only query API on top of whatever is currently there.

use anyhow::Context;
use clap::Parser;
use marketlens_core::query::QueryService;
use marketlens_server::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marketlens", about = "MarketLens — stock data query API")]
struct Cli {
    /// Directory holding one CSV per symbol.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Bind address.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Optional frontend directory, served at /ui.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Enable the per-symbol series cache (invalidated when a source file
    /// changes on disk).
    #[arg(long, default_value_t = false)]
    cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let service = if cli.cache {
        QueryService::with_cache(&cli.data_dir)
    } else {
        QueryService::new(&cli.data_dir)
    };
    let state = AppState {
        service: Arc::new(service),
    };
    let app = marketlens_server::app(state, cli.static_dir);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(
        data_dir = %cli.data_dir.display(),
        cache = cli.cache,
        "serving MarketLens API on http://{addr}"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
