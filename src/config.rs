// src/config.rs
//
// Transport configuration supplied by the embedding application.

use reqwest::Client;
use std::time::Duration;

/// Bounds applied to every network probe and download. There is no explicit
/// cancellation layer above these; a losing race branch simply runs until
/// its transport bound expires.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: None,
        }
    }
}

impl ResolverConfig {
    /// Build the shared HTTP client used by pingers and fetchers.
    pub fn build_client(&self) -> Client {
        let mut builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout);

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        builder.build().expect("Failed to create HTTP client")
    }
}
