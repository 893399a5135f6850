use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait DistSource: Send + Sync {
    /// Fetch the full distribution archive.
    async fn fetch(&self) -> Result<Bytes>;

    /// Human-readable location of the archive, for log lines.
    fn describe(&self) -> String;
}
