// src/services/resolver.rs
//
// Caching Dependency Resolver
//
// Top-level coordinator: consults pre-resolved overrides, re-validates
// unchecked entries, fans out across repository enquirers in parallel and
// caches whatever wins.
//
// CACHE RULES:
// - At most one resolution computation is in flight per dependency key;
//   concurrent callers coalesce onto it and observe the same value.
// - Successful outcomes (resolved or aggregator) are cached for the process
//   lifetime. There is no eviction.
// - Failed resolutions are never cached; every later call retries from
//   scratch.

use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tokio::task::JoinSet;

use crate::domain::{Dependency, Repository, ResolutionResult};
use crate::net::UrlPinger;

use super::enquirer::{PingingRepositoryEnquirer, RepositoryEnquirer};

#[async_trait]
pub trait DependencyResolver: Send + Sync {
    /// Resolve against the full configured repository set.
    async fn resolve(&self, dependency: &Dependency) -> Option<ResolutionResult>;

    /// Resolve against an enforced repository subset. An empty subset means
    /// "no restriction" and behaves like `resolve`.
    async fn resolve_with(
        &self,
        dependency: &Dependency,
        enforced: &[Repository],
    ) -> Option<ResolutionResult>;
}

/// One resolution computation shared by all concurrent callers for a key.
type Flight = Arc<OnceCell<Option<ResolutionResult>>>;

pub struct CachingDependencyResolver {
    enquirers: Vec<Arc<dyn RepositoryEnquirer>>,
    pinger: Arc<dyn UrlPinger>,
    cache: Mutex<HashMap<Dependency, Flight>>,
    pre_resolved: HashMap<String, ResolutionResult>,
}

impl CachingDependencyResolver {
    pub fn new(
        pinger: Arc<dyn UrlPinger>,
        enquirers: Vec<Arc<dyn RepositoryEnquirer>>,
        pre_resolved: HashMap<String, ResolutionResult>,
    ) -> Self {
        Self {
            enquirers,
            pinger,
            cache: Mutex::new(HashMap::new()),
            pre_resolved,
        }
    }

    /// Standard wiring: one Maven-layout enquirer per repository, all
    /// sharing the given pinger and checksum algorithm.
    pub fn maven(
        pinger: Arc<dyn UrlPinger>,
        repositories: Vec<Repository>,
        algorithm: &str,
        pre_resolved: HashMap<String, ResolutionResult>,
    ) -> Self {
        let enquirers = repositories
            .into_iter()
            .map(|repository| {
                Arc::new(PingingRepositoryEnquirer::maven(
                    repository,
                    algorithm,
                    Arc::clone(&pinger),
                )) as Arc<dyn RepositoryEnquirer>
            })
            .collect();
        Self::new(pinger, enquirers, pre_resolved)
    }

    async fn run_resolution(
        &self,
        dependency: &Dependency,
        enforced: &[Repository],
    ) -> Option<ResolutionResult> {
        let flight = {
            let mut cache = self.cache.lock().unwrap();
            Arc::clone(
                cache
                    .entry(dependency.clone())
                    .or_insert_with(|| Arc::new(OnceCell::new())),
            )
        };

        let result = flight
            .get_or_init(|| self.attempt_resolve(dependency, enforced))
            .await
            .clone();

        if result.is_none() {
            // Misses are not cached: drop the key (only if it still maps to
            // this flight) so the next call retries from scratch.
            let mut cache = self.cache.lock().unwrap();
            if let Some(current) = cache.get(dependency) {
                if Arc::ptr_eq(current, &flight) {
                    cache.remove(dependency);
                }
            }
        }

        result
    }

    async fn attempt_resolve(
        &self,
        dependency: &Dependency,
        enforced: &[Repository],
    ) -> Option<ResolutionResult> {
        if let Some(existing) = self.pre_resolved.get(&dependency.to_string()) {
            if existing.is_checked() || existing.is_aggregator() {
                return Some(existing.clone());
            }

            if self.revalidate(existing, enforced).await {
                // Single promotion point for the monotonic checked flag.
                existing.mark_checked();
                debug!("Revalidated pre-resolved entry for {}", dependency);
                return Some(existing.clone());
            }
            // The stale entry stays in the override map; any freshly
            // discovered result below shadows it through the cache.
            debug!("Pre-resolved entry for {} failed revalidation", dependency);
        }

        let queried: Vec<Arc<dyn RepositoryEnquirer>> = if enforced.is_empty() {
            self.enquirers.clone()
        } else {
            self.enquirers
                .iter()
                .filter(|enquirer| enforced.contains(enquirer.repository()))
                .cloned()
                .collect()
        };

        // Unordered race across repositories: first non-empty outcome wins.
        // Which repository wins under equal reachability is nondeterministic.
        let mut enquiries: JoinSet<Option<ResolutionResult>> = JoinSet::new();
        for enquirer in queried {
            let dependency = dependency.clone();
            enquiries.spawn(async move { enquirer.enquire(&dependency).await });
        }

        let mut found = None;
        while let Some(outcome) = enquiries.join_next().await {
            if let Ok(Some(result)) = outcome {
                found = Some(result);
                break;
            }
        }
        // Dropping the set aborts losing enquiries - an optimization only,
        // their results would be discarded anyway.

        match &found {
            Some(result) if result.is_aggregator() => {
                info!("Resolved {} as aggregator via {}", dependency, result.repository());
            }
            Some(result) => {
                let located = result.artifact_url().map(|u| u.as_str()).unwrap_or_default();
                info!("Resolved {} @ {}", dependency, located);
            }
            None => info!("Failed to resolve {}", dependency),
        }

        found
    }

    /// Re-validate an unchecked pre-resolved entry: its repository must be
    /// allowed by the enforced subset and both its artifact URL and (when
    /// recorded) checksum URL must still ping reachable.
    async fn revalidate(&self, existing: &ResolutionResult, enforced: &[Repository]) -> bool {
        let Some(artifact_url) = existing.artifact_url() else {
            return false;
        };

        if !enforced.is_empty() && !enforced.contains(existing.repository()) {
            return false;
        }
        if !self.pinger.ping(artifact_url).await {
            return false;
        }
        match existing.checksum_url() {
            Some(checksum_url) => self.pinger.ping(checksum_url).await,
            None => true,
        }
    }
}

#[async_trait]
impl DependencyResolver for CachingDependencyResolver {
    async fn resolve(&self, dependency: &Dependency) -> Option<ResolutionResult> {
        self.run_resolution(dependency, &[]).await
    }

    async fn resolve_with(
        &self,
        dependency: &Dependency,
        enforced: &[Repository],
    ) -> Option<ResolutionResult> {
        self.run_resolution(dependency, enforced).await
    }
}
