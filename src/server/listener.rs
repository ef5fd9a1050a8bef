use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::resource::Resolver;

// Pause after a failed accept so a persistent error (e.g. EMFILE) does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let resolver = Resolver::new(&cfg.root)
        .await
        .with_context(|| format!("cannot serve from {}", cfg.root.display()))?;
    info!("Serving files from {}", resolver.root().display());

    let listener = bind(&cfg.listen_addr, cfg.backlog).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, Arc::new(resolver), cfg.max_request_line).await
}

/// Binds `addr` with `SO_REUSEADDR` and the given listen backlog.
pub async fn bind(addr: &str, backlog: u32) -> anyhow::Result<TcpListener> {
    let addr = tokio::net::lookup_host(addr)
        .await
        .with_context(|| format!("invalid listen address {addr}"))?
        .next()
        .with_context(|| format!("listen address {addr} resolved to nothing"))?;

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket
        .bind(addr)
        .with_context(|| format!("failed to bind {addr}"))?;

    Ok(socket.listen(backlog)?)
}

/// Accepts connections forever, serving each on its own task.
pub async fn serve(
    listener: TcpListener,
    resolver: Arc<Resolver>,
    max_request_line: usize,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let resolver = resolver.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, resolver, max_request_line);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
