// The handle test code acquires, uses, and releases.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use crate::config::{
    LocalDbConfig, KILL_WAIT_SECS, REACHABLE_POLL_INTERVAL_MS, REACHABLE_TIMEOUT_SECS,
};
use crate::dist::http::HttpDistSource;
use crate::install;
use crate::net;
use crate::process::launcher;
use crate::process::supervisor::EmulatorProcess;
use crate::runtime::java;

/// A local DynamoDB emulator instance.
///
/// Constructed stopped; `start` spawns the emulator and confirms the port
/// is answering, `stop` terminates it. Dropping a running handle kills the
/// child as a backstop, but explicit `stop` (or [`with_running`]) gives it
/// a graceful exit.
#[derive(Debug)]
pub struct LocalDynamoDb {
    config: LocalDbConfig,
    endpoint: String,
    java_bin: Option<PathBuf>,
    process: Option<EmulatorProcess>,
}

impl LocalDynamoDb {
    /// Validate `config` and build a stopped handle.
    pub fn new(mut config: LocalDbConfig) -> Result<Self> {
        if config.in_memory && config.db_path.is_some() {
            bail!("in_memory and db_path are mutually exclusive");
        }
        if let Some(db_path) = &config.db_path {
            std::fs::create_dir_all(db_path)
                .with_context(|| format!("failed to create db_path [{}]", db_path.display()))?;
            // The emulator resolves -dbPath against its own working dir, so
            // hand it an absolute path.
            let absolute = std::fs::canonicalize(db_path)
                .with_context(|| format!("failed to resolve db_path [{}]", db_path.display()))?;
            config.db_path = Some(absolute);
        }

        let endpoint = format!("http://localhost:{}", config.port);
        Ok(Self {
            config,
            endpoint,
            java_bin: None,
            process: None,
        })
    }

    /// Throwaway in-memory instance on an ephemeral port.
    ///
    /// Finding a free port is best-effort; another process can win the race
    /// between allocation and launch.
    pub async fn ephemeral() -> Result<Self> {
        let port = net::alloc_ephemeral_port().await?;
        Self::new(LocalDbConfig {
            port,
            in_memory: true,
            ..LocalDbConfig::default()
        })
    }

    /// HTTP endpoint to point a DynamoDB client at.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    pub fn is_running(&self) -> bool {
        self.process.is_some()
    }

    /// The `java` binary the emulator was launched with, once started.
    pub fn java_bin(&self) -> Option<&Path> {
        self.java_bin.as_deref()
    }

    /// Bring the emulator up: check the port, resolve java, install the
    /// distribution, spawn, and wait for the endpoint to answer.
    pub async fn start(&mut self) -> Result<()> {
        if self.process.is_some() {
            bail!("emulator already running on port {}", self.config.port);
        }

        net::ensure_port_free(self.config.port).await?;
        let java = java::resolve_java().await?;
        let dist = HttpDistSource::new(self.config.source_url.clone());
        install::ensure_installed(&dist, &self.config.unpack_dir).await?;

        let mut process = launcher::spawn_emulator(&java.bin, &self.config)?;
        self.java_bin = Some(java.bin);

        // A bad argument or missing jar makes the JVM exit immediately;
        // surface that instead of a probe timeout.
        if let Some(status) = process.try_exit_status()? {
            bail!("emulator exited during startup with {}", status);
        }

        let timeout = Duration::from_secs(REACHABLE_TIMEOUT_SECS);
        let poll = Duration::from_millis(REACHABLE_POLL_INTERVAL_MS);
        if let Err(probe_err) = net::wait_until_reachable(&self.endpoint, timeout, poll).await {
            let exit = process.try_exit_status().ok().flatten();
            let _ = process.shutdown(Duration::from_secs(KILL_WAIT_SECS)).await;
            return Err(match exit {
                Some(status) => {
                    probe_err.context(format!("emulator exited during startup with {}", status))
                }
                None => probe_err,
            });
        }

        info!("emulator ready at {}", self.endpoint);
        self.process = Some(process);
        Ok(())
    }

    /// Stop the emulator. Stopping a stopped or never-started handle is a
    /// no-op.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(process) = self.process.take() {
            debug!("stopping emulator at {}", self.endpoint);
            process.shutdown(Duration::from_secs(KILL_WAIT_SECS)).await?;
        }
        Ok(())
    }
}

impl Drop for LocalDynamoDb {
    fn drop(&mut self) {
        if self.process.is_some() {
            // The child was spawned with kill-on-drop; dropping the slot
            // reaps it without a graceful window.
            warn!(
                "LocalDynamoDb at {} dropped while running; killing the emulator",
                self.endpoint
            );
        }
    }
}

/// Start an emulator, run `f` against its endpoint, and stop it on the way
/// out whether `f` succeeded or failed.
pub async fn with_running<T, Fut, F>(config: LocalDbConfig, f: F) -> Result<T>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut db = LocalDynamoDb::new(config)?;
    db.start().await?;

    let result = f(db.endpoint().to_string()).await;
    let stop_result = db.stop().await;

    let value = result?;
    stop_result?;
    Ok(value)
}
