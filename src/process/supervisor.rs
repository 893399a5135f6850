// Child supervision — liveness checks and escalated shutdown.

use std::process::ExitStatus;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct EmulatorProcess {
    child: Child,
    pid: Option<u32>,
}

impl EmulatorProcess {
    /// Spawn `cmd` with kill-on-drop so an abandoned handle cannot leak
    /// the child.
    pub fn spawn(mut cmd: Command) -> Result<Self> {
        cmd.kill_on_drop(true);
        let child = cmd.spawn().context("failed to spawn emulator process")?;
        let pid = child.id();
        debug!("spawned emulator pid={:?}", pid);
        Ok(Self { child, pid })
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Exit status if the child has already exited, without blocking.
    pub fn try_exit_status(&mut self) -> Result<Option<ExitStatus>> {
        self.child
            .try_wait()
            .map_err(|e| anyhow!("wait on emulator failed: {}", e))
    }

    /// Stop the child: SIGTERM first, wait up to `grace`, then SIGKILL.
    pub async fn shutdown(mut self, grace: Duration) -> Result<()> {
        self.send_term();

        match tokio::time::timeout(grace, self.child.wait()).await {
            Ok(status) => {
                let status = status?;
                debug!("emulator exited with {}", status);
            }
            Err(_) => {
                warn!(
                    "emulator did not exit within {:?} after SIGTERM; killing pid={:?}",
                    grace, self.pid
                );
                self.child.kill().await?;
            }
        }
        Ok(())
    }

    #[cfg(unix)]
    fn send_term(&self) {
        if let Some(pid) = self.pid {
            // SAFETY: plain kill(2) on a pid we spawned and still own.
            unsafe {
                libc::kill(pid as i32, libc::SIGTERM);
            }
        }
    }

    #[cfg(not(unix))]
    fn send_term(&self) {
        // No SIGTERM equivalent; shutdown falls through to kill() after the
        // grace period.
    }
}
