// src/domain/resolution.rs
//
// Resolution outcome model.
//
// A tagged enum replaces the nullable-field record: an aggregator hit cannot
// carry an artifact URL or checksum by construction, and a resolved artifact
// always carries its URL. "Absent" is not a variant - enquirers and the
// resolver return Option<ResolutionResult>, and absence is never cached.
//
// INVARIANTS:
// - `checked` transitions false -> true at most once and never regresses.
//   Clones share the flag, so a promotion performed by the resolver is
//   visible through every cached copy.
// - Equality and hashing use the string forms of the URLs plus the two
//   flags; comparing results never touches the network.

use reqwest::Url;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::dependency::Repository;

/// Outcome of querying one repository for one dependency.
#[derive(Debug, Clone)]
pub enum ResolutionResult {
    /// The repository hosts the artifact directly.
    Resolved(ResolvedArtifact),
    /// The repository plausibly hosts metadata for the dependency but not
    /// the direct artifact.
    Aggregator(AggregatorHit),
}

#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    repository: Repository,
    artifact_url: Url,
    checksum_url: Option<Url>,
    checked: Arc<AtomicBool>,
}

#[derive(Debug, Clone)]
pub struct AggregatorHit {
    repository: Repository,
}

impl ResolvedArtifact {
    pub fn new(
        repository: Repository,
        artifact_url: Url,
        checksum_url: Option<Url>,
        checked: bool,
    ) -> Self {
        Self {
            repository,
            artifact_url,
            checksum_url,
            checked: Arc::new(AtomicBool::new(checked)),
        }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn artifact_url(&self) -> &Url {
        &self.artifact_url
    }

    pub fn checksum_url(&self) -> Option<&Url> {
        self.checksum_url.as_ref()
    }

    pub fn is_checked(&self) -> bool {
        self.checked.load(Ordering::Acquire)
    }

    /// Promote the result to checked. Monotonic: there is no way back to
    /// unchecked, so concurrent promotions are harmless.
    pub fn mark_checked(&self) {
        self.checked.store(true, Ordering::Release);
    }
}

impl ResolutionResult {
    pub fn resolved(
        repository: Repository,
        artifact_url: Url,
        checksum_url: Option<Url>,
        checked: bool,
    ) -> Self {
        Self::Resolved(ResolvedArtifact::new(
            repository,
            artifact_url,
            checksum_url,
            checked,
        ))
    }

    pub fn aggregator(repository: Repository) -> Self {
        Self::Aggregator(AggregatorHit { repository })
    }

    pub fn repository(&self) -> &Repository {
        match self {
            Self::Resolved(artifact) => artifact.repository(),
            Self::Aggregator(hit) => &hit.repository,
        }
    }

    pub fn artifact_url(&self) -> Option<&Url> {
        match self {
            Self::Resolved(artifact) => Some(artifact.artifact_url()),
            Self::Aggregator(_) => None,
        }
    }

    pub fn checksum_url(&self) -> Option<&Url> {
        match self {
            Self::Resolved(artifact) => artifact.checksum_url(),
            Self::Aggregator(_) => None,
        }
    }

    pub fn is_aggregator(&self) -> bool {
        matches!(self, Self::Aggregator(_))
    }

    pub fn is_checked(&self) -> bool {
        match self {
            Self::Resolved(artifact) => artifact.is_checked(),
            Self::Aggregator(_) => false,
        }
    }

    /// Promote a resolved result to checked. No-op for aggregator hits,
    /// which stay unchecked by definition.
    pub fn mark_checked(&self) {
        if let Self::Resolved(artifact) = self {
            artifact.mark_checked();
        }
    }

    pub fn as_resolved(&self) -> Option<&ResolvedArtifact> {
        match self {
            Self::Resolved(artifact) => Some(artifact),
            Self::Aggregator(_) => None,
        }
    }

    fn comparison_key(&self) -> (String, String, bool, bool) {
        (
            self.artifact_url().map(Url::to_string).unwrap_or_default(),
            self.checksum_url().map(Url::to_string).unwrap_or_default(),
            self.is_aggregator(),
            self.is_checked(),
        )
    }
}

impl PartialEq for ResolutionResult {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl Eq for ResolutionResult {}

impl Hash for ResolutionResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> Repository {
        Repository::new(Url::parse("https://repo.example.org/releases/").unwrap())
    }

    fn resolved(checked: bool) -> ResolutionResult {
        ResolutionResult::resolved(
            repo(),
            Url::parse("https://repo.example.org/releases/a/b/1.0/b-1.0.jar").unwrap(),
            Some(Url::parse("https://repo.example.org/releases/a/b/1.0/b-1.0.jar.sha256").unwrap()),
            checked,
        )
    }

    #[test]
    fn test_equality_on_string_forms() {
        assert_eq!(resolved(false), resolved(false));
        assert_eq!(resolved(true), resolved(true));
    }

    #[test]
    fn test_checked_flag_participates_in_equality() {
        assert_ne!(resolved(false), resolved(true));
    }

    #[test]
    fn test_aggregator_has_no_urls_and_is_never_checked() {
        let result = ResolutionResult::aggregator(repo());
        assert!(result.is_aggregator());
        assert!(result.artifact_url().is_none());
        assert!(result.checksum_url().is_none());
        assert!(!result.is_checked());

        // Promotion must not apply to aggregator hits
        result.mark_checked();
        assert!(!result.is_checked());
    }

    #[test]
    fn test_checked_promotion_is_shared_across_clones() {
        let original = resolved(false);
        let cached_copy = original.clone();
        assert!(!cached_copy.is_checked());

        original.mark_checked();
        assert!(cached_copy.is_checked());
    }
}
