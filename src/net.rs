// Port checks and the HTTP readiness probe.

use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use reqwest::Client;
use tokio::net::TcpListener;
use tokio::time::Instant;
use tracing::debug;

/// Error unless `port` can currently be bound on localhost.
pub async fn ensure_port_free(port: u16) -> Result<()> {
    match TcpListener::bind(("127.0.0.1", port)).await {
        Ok(_listener) => Ok(()),
        Err(_) => bail!("port {} is not free", port),
    }
}

/// Grab a currently-free port by binding port 0 and reading back the
/// assignment. Best-effort: another process can take the port between
/// release and use.
pub async fn alloc_ephemeral_port() -> Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    Ok(listener.local_addr()?.port())
}

/// Poll `endpoint` until it answers an HTTP request.
///
/// The emulator answers a bare GET with 400, which still proves the
/// listener is up, so the response status is ignored. Connection errors
/// mean "not yet" and retry until the deadline.
pub async fn wait_until_reachable(
    endpoint: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<()> {
    let client = Client::new();
    let deadline = Instant::now() + timeout;

    loop {
        match client.get(endpoint).send().await {
            Ok(resp) => {
                debug!(
                    "endpoint {} reachable (HTTP {})",
                    endpoint,
                    resp.status().as_u16()
                );
                return Ok(());
            }
            Err(e) => {
                if Instant::now() >= deadline {
                    return Err(anyhow!(
                        "{} never became reachable within {:?}: {}",
                        endpoint,
                        timeout,
                        e
                    ));
                }
                debug!("can't reach {} yet: {}", endpoint, e);
                tokio::time::sleep(poll_interval).await;
            }
        }
    }
}
