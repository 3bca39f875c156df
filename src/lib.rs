// src/lib.rs
// Artifetch - repository-querying dependency resolver
//
// Architecture:
// - Domain-centric: resolution inputs and outcomes are immutable value types
// - Capability seams: pinging, fetching, path strategy, digesting and
//   verification are traits injected at construction
// - Fail-soft networking: unreachable is a value, not an error
// - Cache-correct: at most one in-flight resolution per dependency key,
//   monotonic checked promotion, misses never cached

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod net;
pub mod output;
pub mod services;
pub mod strategy;

// ============================================================================
// PUBLIC API - Domain Value Types
// ============================================================================

pub use domain::{AggregatorHit, Dependency, Repository, ResolutionResult, ResolvedArtifact};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::ResolverConfig;

// ============================================================================
// PUBLIC API - Transport
// ============================================================================

pub use net::{HttpUrlFetcher, HttpUrlPinger, UrlFetcher, UrlPinger};

// ============================================================================
// PUBLIC API - Path Strategies
// ============================================================================

pub use strategy::{
    MavenChecksumPathResolutionStrategy,
    MavenPathResolutionStrategy,
    MavenPomPathResolutionStrategy,
    PathResolutionStrategy,
};

// ============================================================================
// PUBLIC API - Output Collaborators
// ============================================================================

pub use output::{
    DependencyFilePathStrategy,
    FileOutputWriter,
    FilePathStrategy,
    OutputWriter,
    OutputWriterFactory,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Resolution
    CachingDependencyResolver,
    // Digesting
    ChecksumCalculator,
    // Verification
    ChecksumDependencyVerifier,
    DependencyResolver,
    DependencyVerifier,
    PassthroughVerifier,
    PingingRepositoryEnquirer,
    // Pre-resolved overrides
    PreResolutionDataReader,
    PreResolvedEntry,
    RepositoryEnquirer,
    Sha256Calculator,
};
