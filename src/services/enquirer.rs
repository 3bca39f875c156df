// src/services/enquirer.rs
//
// Repository Enquirer
//
// Determines, for one (repository, dependency) pair, a single resolution
// outcome or none.
//
// PROBE ORDERING:
// - Artifact candidates encode a priority (preferred layout first), so they
//   are probed sequentially and the first reachable one is binding.
// - Checksum and descriptor candidates carry no preference, so they are
//   raced in parallel; whichever reachable candidate completes first wins.

use async_trait::async_trait;
use log::debug;
use reqwest::Url;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::domain::{Dependency, Repository, ResolutionResult};
use crate::net::UrlPinger;
use crate::strategy::{
    MavenChecksumPathResolutionStrategy, MavenPathResolutionStrategy,
    MavenPomPathResolutionStrategy, PathResolutionStrategy,
};

#[async_trait]
pub trait RepositoryEnquirer: Send + Sync {
    fn repository(&self) -> &Repository;

    /// Query the repository for the dependency. `None` means the repository
    /// knows nothing about it; the caller decides what that implies.
    async fn enquire(&self, dependency: &Dependency) -> Option<ResolutionResult>;
}

pub struct PingingRepositoryEnquirer {
    repository: Repository,
    artifact_strategy: Arc<dyn PathResolutionStrategy>,
    checksum_strategy: Arc<dyn PathResolutionStrategy>,
    descriptor_strategy: Arc<dyn PathResolutionStrategy>,
    pinger: Arc<dyn UrlPinger>,
}

impl PingingRepositoryEnquirer {
    pub fn new(
        repository: Repository,
        artifact_strategy: Arc<dyn PathResolutionStrategy>,
        checksum_strategy: Arc<dyn PathResolutionStrategy>,
        descriptor_strategy: Arc<dyn PathResolutionStrategy>,
        pinger: Arc<dyn UrlPinger>,
    ) -> Self {
        Self {
            repository,
            artifact_strategy,
            checksum_strategy,
            descriptor_strategy,
            pinger,
        }
    }

    /// Standard wiring for Maven-layout repositories: artifact paths,
    /// checksum paths for `algorithm`, POM descriptor paths.
    pub fn maven(repository: Repository, algorithm: &str, pinger: Arc<dyn UrlPinger>) -> Self {
        let artifact_strategy: Arc<dyn PathResolutionStrategy> =
            Arc::new(MavenPathResolutionStrategy);
        let checksum_strategy = Arc::new(MavenChecksumPathResolutionStrategy::new(
            algorithm,
            Arc::clone(&artifact_strategy),
        ));
        Self::new(
            repository,
            artifact_strategy,
            checksum_strategy,
            Arc::new(MavenPomPathResolutionStrategy),
            pinger,
        )
    }

    fn parse_candidate(path: &str) -> Option<Url> {
        match Url::parse(path) {
            Ok(url) => Some(url),
            Err(err) => {
                debug!("Dropping malformed candidate path '{}': {}", path, err);
                None
            }
        }
    }

    /// Race all candidates in parallel; first reachable one wins. Order of
    /// completion is not guaranteed. Losing probes are aborted on return.
    async fn race_first_reachable(&self, paths: Vec<String>) -> Option<Url> {
        let mut probes: JoinSet<Option<Url>> = JoinSet::new();
        for path in paths {
            let Some(url) = Self::parse_candidate(&path) else {
                continue;
            };
            let pinger = Arc::clone(&self.pinger);
            probes.spawn(async move {
                if pinger.ping(&url).await {
                    Some(url)
                } else {
                    None
                }
            });
        }

        while let Some(outcome) = probes.join_next().await {
            if let Ok(Some(url)) = outcome {
                return Some(url);
            }
        }
        None
    }
}

#[async_trait]
impl RepositoryEnquirer for PingingRepositoryEnquirer {
    fn repository(&self) -> &Repository {
        &self.repository
    }

    async fn enquire(&self, dependency: &Dependency) -> Option<ResolutionResult> {
        debug!("Enquiring {} for {}", self.repository, dependency);

        // Sequential search over artifact candidates - the declared order is
        // a priority and the first reachable candidate is binding.
        for path in self.artifact_strategy.paths_to(&self.repository, dependency) {
            let Some(url) = Self::parse_candidate(&path) else {
                continue;
            };
            if !self.pinger.ping(&url).await {
                continue;
            }

            // Checksum absence is legal; the verifier degrades gracefully.
            let checksum_url = self
                .race_first_reachable(self.checksum_strategy.paths_to(&self.repository, dependency))
                .await;

            // Every URL involved was just pinged, so the result is born checked.
            return Some(ResolutionResult::resolved(
                self.repository.clone(),
                url,
                checksum_url,
                true,
            ));
        }

        // No direct artifact - check whether the repository at least hosts
        // the descriptor, which marks it as an aggregator.
        let descriptor = self
            .race_first_reachable(self.descriptor_strategy.paths_to(&self.repository, dependency))
            .await;

        descriptor.map(|_| ResolutionResult::aggregator(self.repository.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Pinger double that records probe order and answers from a fixed set
    /// of reachable URLs.
    struct RecordingPinger {
        reachable: HashSet<String>,
        probed: Mutex<Vec<String>>,
    }

    impl RecordingPinger {
        fn new(reachable: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                reachable: reachable.iter().map(|s| s.to_string()).collect(),
                probed: Mutex::new(Vec::new()),
            })
        }

        fn probed(&self) -> Vec<String> {
            self.probed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UrlPinger for RecordingPinger {
        async fn ping(&self, url: &Url) -> bool {
            self.probed.lock().unwrap().push(url.to_string());
            self.reachable.contains(url.as_str())
        }
    }

    struct FixedStrategy(Vec<String>);

    impl PathResolutionStrategy for FixedStrategy {
        fn paths_to(&self, _repository: &Repository, _dependency: &Dependency) -> Vec<String> {
            self.0.clone()
        }
    }

    fn repo() -> Repository {
        Repository::new(Url::parse("https://repo.example.org/releases/").unwrap())
    }

    fn dep() -> Dependency {
        Dependency::new("com.example", "widget", "1.0", None, Vec::new())
    }

    fn strategy(paths: &[&str]) -> Arc<dyn PathResolutionStrategy> {
        Arc::new(FixedStrategy(paths.iter().map(|s| s.to_string()).collect()))
    }

    fn enquirer(
        artifact: &[&str],
        checksum: &[&str],
        descriptor: &[&str],
        pinger: Arc<RecordingPinger>,
    ) -> PingingRepositoryEnquirer {
        PingingRepositoryEnquirer::new(
            repo(),
            strategy(artifact),
            strategy(checksum),
            strategy(descriptor),
            pinger,
        )
    }

    const P1: &str = "https://repo.example.org/p1.jar";
    const P2: &str = "https://repo.example.org/p2.jar";
    const P3: &str = "https://repo.example.org/p3.jar";
    const SUM: &str = "https://repo.example.org/p2.jar.sha256";
    const POM: &str = "https://repo.example.org/widget-1.0.pom";

    #[tokio::test]
    async fn test_artifact_candidates_probed_in_order_first_reachable_binds() {
        let pinger = RecordingPinger::new(&[P2, SUM]);
        let enquirer = enquirer(&[P1, P2, P3], &[SUM], &[POM], Arc::clone(&pinger));

        let result = enquirer.enquire(&dep()).await.unwrap();
        assert_eq!(result.artifact_url().unwrap().as_str(), P2);
        assert_eq!(result.checksum_url().unwrap().as_str(), SUM);
        assert!(result.is_checked());
        assert!(!result.is_aggregator());

        // p3 must never be probed: the search short-circuits on p2.
        let probed = pinger.probed();
        assert_eq!(&probed[..2], &[P1.to_string(), P2.to_string()]);
        assert!(!probed.contains(&P3.to_string()));
    }

    #[tokio::test]
    async fn test_missing_checksum_is_legal() {
        let pinger = RecordingPinger::new(&[P1]);
        let enquirer = enquirer(&[P1], &[SUM], &[POM], pinger);

        let result = enquirer.enquire(&dep()).await.unwrap();
        assert_eq!(result.artifact_url().unwrap().as_str(), P1);
        assert!(result.checksum_url().is_none());
        assert!(result.is_checked());
    }

    #[tokio::test]
    async fn test_descriptor_only_yields_aggregator() {
        let pinger = RecordingPinger::new(&[POM]);
        let enquirer = enquirer(&[P1, P2], &[SUM], &[POM], pinger);

        let result = enquirer.enquire(&dep()).await.unwrap();
        assert!(result.is_aggregator());
        assert!(result.artifact_url().is_none());
        assert!(!result.is_checked());
    }

    #[tokio::test]
    async fn test_nothing_reachable_yields_none() {
        let pinger = RecordingPinger::new(&[]);
        let enquirer = enquirer(&[P1, P2], &[SUM], &[POM], pinger);

        assert!(enquirer.enquire(&dep()).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_candidates_are_dropped_not_fatal() {
        let pinger = RecordingPinger::new(&[P2]);
        let enquirer = enquirer(&["not a url", P2], &["::also bad::"], &[POM], Arc::clone(&pinger));

        let result = enquirer.enquire(&dep()).await.unwrap();
        assert_eq!(result.artifact_url().unwrap().as_str(), P2);
        assert!(result.checksum_url().is_none());
        assert_eq!(pinger.probed().first().unwrap(), P2);
    }
}
