// src/net/pinger.rs
//
// Reachability probing.
//
// A ping answers "is this resource there?" without downloading the body.
// The probe must never fail loudly: any transport error, timeout, bad
// status or unsupported scheme maps to `false` so that racing fan-outs stay
// robust against partially broken repositories.

use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client, Url};
use std::sync::Arc;

use crate::config::ResolverConfig;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlPinger: Send + Sync {
    /// True iff the resource is reachable. Never panics, never errors.
    async fn ping(&self, url: &Url) -> bool;
}

/// Pings via a minimal HEAD request; a 2xx status means reachable.
/// Only `http` and `https` URLs are ever reachable.
pub struct HttpUrlPinger {
    client: Client,
}

impl HttpUrlPinger {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.build_client())
    }

    pub fn shared(client: Client) -> Arc<dyn UrlPinger> {
        Arc::new(Self::new(client))
    }
}

#[async_trait]
impl UrlPinger for HttpUrlPinger {
    async fn ping(&self, url: &Url) -> bool {
        match url.scheme() {
            "http" | "https" => {}
            other => {
                debug!("Unsupported scheme '{}' for {}, treating as unreachable", other, url);
                return false;
            }
        }

        let request = self
            .client
            .head(url.clone())
            .header(header::ACCEPT, "*/*");

        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!("Ping failed for {}: {}", url, err);
                false
            }
        }
    }
}
