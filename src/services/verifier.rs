// src/services/verifier.rs
//
// Checksum Verifier
//
// Validates a downloaded file against the digest published next to the
// artifact, with a three-tier trust policy:
//   1. Missing sidecar -> materialize it from the resolved checksum URL
//      (or an empty marker when no checksum exists for the dependency).
//   2. Empty sidecar or failed preparation -> the fallback verifier decides.
//   3. Otherwise compare digests; a mismatch is a normal negative verdict,
//      not an error.

use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::Dependency;
use crate::error::AppResult;
use crate::net::UrlFetcher;
use crate::output::{OutputWriter, OutputWriterFactory};

use super::checksum::ChecksumCalculator;
use super::resolver::DependencyResolver;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DependencyVerifier: Send + Sync {
    /// Verdict on whether the local file matches the dependency.
    async fn verify(&self, file: &Path, dependency: &Dependency) -> AppResult<bool>;

    /// Sidecar checksum file location for the dependency, with parent
    /// directories created. `None` when the verifier keeps no sidecars.
    fn checksum_file(&self, dependency: &Dependency) -> Option<PathBuf>;
}

/// Fallback of last resort: accepts any file that exists on disk.
pub struct PassthroughVerifier;

#[async_trait]
impl DependencyVerifier for PassthroughVerifier {
    async fn verify(&self, file: &Path, _dependency: &Dependency) -> AppResult<bool> {
        Ok(file.exists())
    }

    fn checksum_file(&self, _dependency: &Dependency) -> Option<PathBuf> {
        None
    }
}

pub struct ChecksumDependencyVerifier {
    resolver: Arc<dyn DependencyResolver>,
    output_factory: OutputWriterFactory,
    fallback: Arc<dyn DependencyVerifier>,
    calculator: Arc<dyn ChecksumCalculator>,
    fetcher: Arc<dyn UrlFetcher>,
}

impl ChecksumDependencyVerifier {
    pub fn new(
        resolver: Arc<dyn DependencyResolver>,
        output_factory: OutputWriterFactory,
        fallback: Arc<dyn DependencyVerifier>,
        calculator: Arc<dyn ChecksumCalculator>,
        fetcher: Arc<dyn UrlFetcher>,
    ) -> Self {
        Self {
            resolver,
            output_factory,
            fallback,
            calculator,
            fetcher,
        }
    }

    /// Materialize the sidecar file. True when a usable sidecar (possibly
    /// the empty "no checksum available" marker) is on disk afterwards.
    async fn prepare_checksum_file(
        &self,
        checksum_file: &Path,
        dependency: &Dependency,
    ) -> bool {
        let Some(result) = self.resolver.resolve(dependency).await else {
            return false;
        };

        let Some(checksum_url) = result.checksum_url() else {
            // Aggregator or checksum-less artifact: persist the empty marker
            // so later verifications go straight to the fallback.
            return fs::File::create(checksum_file).is_ok();
        };

        debug!("Resolved checksum URL for {} as {}", dependency, checksum_url);
        match self.fetcher.fetch(checksum_url).await {
            Ok(body) => {
                let writer = self.output_factory.create(dependency);
                let length = body.len() as u64;
                match writer.write_from(&mut Cursor::new(body), length) {
                    Ok(_) => {
                        info!("Downloaded checksum for {}", dependency);
                        true
                    }
                    Err(err) => {
                        warn!("Failed to persist checksum for {}: {}", dependency, err);
                        false
                    }
                }
            }
            Err(err) => {
                warn!("Checksum download failed for {}: {}", dependency, err);
                false
            }
        }
    }
}

#[async_trait]
impl DependencyVerifier for ChecksumDependencyVerifier {
    async fn verify(&self, file: &Path, dependency: &Dependency) -> AppResult<bool> {
        if !file.exists() {
            return Ok(false);
        }
        info!("Verifying checksum for {}", dependency);

        let checksum_file = self.output_factory.strategy().select_for(dependency);
        if let Some(parent) = checksum_file.parent() {
            fs::create_dir_all(parent)?;
        }

        if !checksum_file.exists()
            && !self.prepare_checksum_file(&checksum_file, dependency).await
        {
            info!(
                "Unable to resolve checksum for {}, using fallback verifier",
                dependency
            );
            return self.fallback.verify(file, dependency).await;
        }

        if fs::metadata(&checksum_file)?.len() == 0 {
            info!(
                "No checksum recorded for {}, using fallback verifier",
                dependency
            );
            return self.fallback.verify(file, dependency).await;
        }

        let actual = self.calculator.calculate(file)?;
        let expected = fs::read_to_string(&checksum_file)?.trim().to_string();
        debug!("{} -> actual checksum: {}", dependency, actual);
        debug!("{} -> expected checksum: {}", dependency, expected);

        let matched = actual == expected;
        info!(
            "Checksum {} for {}",
            if matched { "matched" } else { "match failed" },
            dependency
        );
        Ok(matched)
    }

    fn checksum_file(&self, dependency: &Dependency) -> Option<PathBuf> {
        let path = self.output_factory.strategy().select_for(dependency);
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        Some(path)
    }
}
