// Download-once install — fetch the distribution archive and unpack it locally.

pub mod archive;

use std::path::Path;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::dist::traits::DistSource;

/// Make sure the emulator is unpacked at `unpack_dir`.
///
/// An existing directory is treated as a completed install and reused.
/// On a fresh install, any fetch or unpack failure removes the
/// partially-populated directory so the next attempt starts clean.
pub async fn ensure_installed(source: &dyn DistSource, unpack_dir: &Path) -> Result<()> {
    if unpack_dir.exists() {
        if !unpack_dir.is_dir() {
            bail!(
                "unpack dir [{}] exists but is not a directory; delete it or pick another path",
                unpack_dir.display()
            );
        }
        debug!("unpack dir [{}] already exists", unpack_dir.display());
        return Ok(());
    }

    tokio::fs::create_dir_all(unpack_dir).await?;
    info!(
        "installing emulator from {} into [{}]",
        source.describe(),
        unpack_dir.display()
    );

    let result = async {
        let data = source.fetch().await?;
        archive::unpack_tar_gz(data, unpack_dir).await
    }
    .await;

    if let Err(e) = result {
        let _ = tokio::fs::remove_dir_all(unpack_dir).await;
        return Err(e);
    }

    Ok(())
}
