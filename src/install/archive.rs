// Archive unpacking — gzip-compressed tar with entry containment checks.

use std::io::Cursor;
use std::path::{Component, Path};

use anyhow::{anyhow, bail, Result};
use bytes::Bytes;
use flate2::read::GzDecoder;
use tar::Archive;
use tracing::debug;

/// Gzip files start with the two-byte magic 0x1f 0x8b.
pub fn looks_like_gzip(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0x1f && data[1] == 0x8b
}

/// Reject absolute entries and any path whose `..` components could climb
/// out of the unpack dir.
pub fn entry_is_contained(entry_path: &Path) -> bool {
    let mut depth: i32 = 0;
    for component in entry_path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return false,
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
        }
    }
    true
}

/// Unpack a tar.gz archive into `dest`.
///
/// Extraction is synchronous, so it runs on the blocking pool.
pub async fn unpack_tar_gz(data: Bytes, dest: &Path) -> Result<()> {
    if !looks_like_gzip(&data) {
        bail!("distribution archive is not gzip data");
    }

    let dest_owned = dest.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
        let decoder = GzDecoder::new(Cursor::new(data));
        let mut tar = Archive::new(decoder);

        for entry in tar.entries()? {
            let mut entry = entry?;
            let path = entry.path()?.into_owned();
            if !entry_is_contained(&path) {
                bail!("archive entry escapes the unpack dir: [{}]", path.display());
            }
            entry.unpack_in(&dest_owned)?;
        }
        Ok(())
    })
    .await
    .map_err(|e| anyhow!("archive unpack task panicked: {}", e))??;

    debug!("archive extracted to [{}]", dest.display());
    Ok(())
}
