use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use super::traits::DistSource;

pub struct HttpDistSource {
    client: Client,
    url: String,
}

impl HttpDistSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl DistSource for HttpDistSource {
    async fn fetch(&self) -> Result<Bytes> {
        debug!("fetching distribution from {}", self.url);
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!("distribution fetch failed status={}", status.as_u16());
            return Err(anyhow!(
                "distribution fetch failed: HTTP {} from {}",
                status.as_u16(),
                self.url
            ));
        }

        let bytes = resp.bytes().await?;
        debug!("fetched {} bytes from {}", bytes.len(), self.url);
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
