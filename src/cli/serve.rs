//! API server command

use std::net::SocketAddr;
use std::sync::Arc;

use log::{info, warn};

use crate::cli::{CommandContext, GlobalOptions};
use crate::error::{ConfigError, Result};
use crate::server;

/// Start the refresh scheduler and serve the API until Ctrl+C.
pub async fn run(opts: &GlobalOptions, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    if let Some(host) = host {
        ctx.config.server.host = host;
    }
    if let Some(port) = port {
        ctx.config.server.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", ctx.config.server.host, ctx.config.server.port)
        .parse()
        .map_err(|e| ConfigError::Invalid(format!("invalid listen address: {}", e)))?;

    let scheduler = Arc::new(ctx.scheduler());
    let refresh = scheduler.start();

    let result = server::serve(addr, ctx.app_state(), shutdown_signal()).await;

    refresh.abort();
    info!("Refresh scheduler stopped");

    let cached = ctx.cache.len();
    ctx.cache.clear();
    info!("Dropped {} cached keys", cached);

    result
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Could not listen for Ctrl+C, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
