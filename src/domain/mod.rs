// src/domain/mod.rs
//
// Domain value types - immutable inputs and outcomes of resolution.

pub mod dependency;
pub mod resolution;

pub use dependency::{Dependency, Repository};
pub use resolution::{AggregatorHit, ResolutionResult, ResolvedArtifact};
