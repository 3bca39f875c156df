// src/services/preresolve.rs
//
// Pre-resolved override input.
//
// An externally maintained lockfile records where dependencies were
// resolved last time. The reader turns its map shape into unchecked
// ResolutionResults keyed by canonical dependency identity; the resolver
// re-validates each entry before trusting it.

use log::debug;
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

use crate::domain::{Repository, ResolutionResult};
use crate::error::{AppError, AppResult};

/// One lockfile record. `aggregator: true` entries carry no URLs.
#[derive(Debug, Deserialize)]
pub struct PreResolvedEntry {
    pub repository: String,
    #[serde(default)]
    pub artifact_url: Option<String>,
    #[serde(default)]
    pub checksum_url: Option<String>,
    #[serde(default)]
    pub aggregator: bool,
}

pub struct PreResolutionDataReader;

impl PreResolutionDataReader {
    pub fn read<R: Read>(reader: R) -> AppResult<HashMap<String, ResolutionResult>> {
        let raw: HashMap<String, PreResolvedEntry> = serde_json::from_reader(reader)?;

        let mut results = HashMap::with_capacity(raw.len());
        for (identity, entry) in raw {
            let repository = Repository::new(parse_url(&entry.repository)?);

            let result = if entry.aggregator {
                ResolutionResult::aggregator(repository)
            } else {
                let artifact_url = entry.artifact_url.as_deref().ok_or_else(|| {
                    AppError::Other(format!(
                        "Pre-resolved entry for {} has neither artifact URL nor aggregator flag",
                        identity
                    ))
                })?;
                let checksum_url = entry
                    .checksum_url
                    .as_deref()
                    .map(parse_url)
                    .transpose()?;
                // Lockfile entries start unchecked; the resolver promotes
                // them after pinging.
                ResolutionResult::resolved(repository, parse_url(artifact_url)?, checksum_url, false)
            };

            debug!("Loaded pre-resolved entry for {}", identity);
            results.insert(identity, result);
        }
        Ok(results)
    }
}

fn parse_url(raw: &str) -> AppResult<Url> {
    Url::parse(raw).map_err(|err| AppError::MalformedUrl(format!("{}: {}", raw, err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_resolved_and_aggregator_entries() {
        let lockfile = r#"{
            "com.example:widget:1.0": {
                "repository": "https://repo.example.org/releases/",
                "artifact_url": "https://repo.example.org/releases/com/example/widget/1.0/widget-1.0.jar",
                "checksum_url": "https://repo.example.org/releases/com/example/widget/1.0/widget-1.0.jar.sha256"
            },
            "com.example:meta:2.0": {
                "repository": "https://proxy.example.org/",
                "aggregator": true
            }
        }"#;

        let results = PreResolutionDataReader::read(lockfile.as_bytes()).unwrap();
        assert_eq!(results.len(), 2);

        let resolved = &results["com.example:widget:1.0"];
        assert!(!resolved.is_aggregator());
        assert!(!resolved.is_checked());
        assert!(resolved.artifact_url().is_some());
        assert!(resolved.checksum_url().is_some());

        let aggregator = &results["com.example:meta:2.0"];
        assert!(aggregator.is_aggregator());
    }

    #[test]
    fn test_malformed_url_is_an_error() {
        let lockfile = r#"{
            "com.example:widget:1.0": {
                "repository": "not a url",
                "artifact_url": "https://repo.example.org/widget-1.0.jar"
            }
        }"#;

        assert!(PreResolutionDataReader::read(lockfile.as_bytes()).is_err());
    }

    #[test]
    fn test_entry_without_urls_or_flag_is_rejected() {
        let lockfile = r#"{
            "com.example:widget:1.0": { "repository": "https://repo.example.org/" }
        }"#;

        assert!(PreResolutionDataReader::read(lockfile.as_bytes()).is_err());
    }
}
