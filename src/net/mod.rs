// src/net/mod.rs
//
// Transport layer - reachability probes and body downloads.

pub mod fetcher;
pub mod pinger;

#[cfg(test)]
pub(crate) mod test_support;

pub use fetcher::{HttpUrlFetcher, UrlFetcher};
pub use pinger::{HttpUrlPinger, UrlPinger};

#[cfg(test)]
pub use fetcher::MockUrlFetcher;
#[cfg(test)]
pub use pinger::MockUrlPinger;
