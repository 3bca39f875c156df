// src/net/fetcher.rs
//
// Full-body download, used to materialize checksum sidecar files.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::config::ResolverConfig;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlFetcher: Send + Sync {
    /// Download the complete body at `url`.
    async fn fetch(&self, url: &Url) -> AppResult<Vec<u8>>;
}

pub struct HttpUrlFetcher {
    client: Client,
}

impl HttpUrlFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.build_client())
    }
}

#[async_trait]
impl UrlFetcher for HttpUrlFetcher {
    async fn fetch(&self, url: &Url) -> AppResult<Vec<u8>> {
        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Other(format!(
                "Download of {} failed with status {}",
                url,
                response.status()
            )));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
