//! logtree server
//!
//! - Loads `logtree.yaml` (or the path given as first argument)
//! - Validates metric addresses at startup when configured
//! - Flushes every container to the sink on an interval
//! - Serves `/metrics` and `/metrics/list`
//! - Flushes once more on shutdown (Ctrl-C)

use tracing_subscriber::{fmt, EnvFilter};

use logtree_core::error::{LogTreeError, Result};
use logtree_server::{app_state::AppState, config, flush, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.code().as_str(), "logtree-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "logtree.yaml".into());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = AppState::builder(cfg).build()?;
    let flusher = flush::spawn_flush_loop(state.clone());
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "logtree-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| LogTreeError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| LogTreeError::Internal(format!("server failed: {e}")))?;

    flusher.abort();
    state.flush_all()?;
    tracing::info!("logtree-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
}
