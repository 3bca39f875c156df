// src/strategy/mod.rs
//
// Candidate path construction - pure, deterministic, no I/O.

pub mod maven;

pub use maven::{
    MavenChecksumPathResolutionStrategy, MavenPathResolutionStrategy,
    MavenPomPathResolutionStrategy,
};

use crate::domain::{Dependency, Repository};

/// Produces the ordered, finite set of plausible locations for one aspect of
/// a dependency (artifact, checksum or descriptor) inside one repository.
///
/// Implementations must be deterministic for identical inputs and must not
/// perform I/O. Order is a priority: earlier candidates are preferred.
#[cfg_attr(test, mockall::automock)]
pub trait PathResolutionStrategy: Send + Sync {
    fn paths_to(&self, repository: &Repository, dependency: &Dependency) -> Vec<String>;
}
