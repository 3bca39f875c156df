// src/services/mod.rs
//
// Services Module - Resolution and Verification Layer

pub mod checksum;
pub mod enquirer;
pub mod preresolve;
pub mod resolver;
pub mod verifier;


// Re-export all services and their seams
pub use checksum::{ChecksumCalculator, Sha256Calculator};

pub use enquirer::{PingingRepositoryEnquirer, RepositoryEnquirer};

pub use preresolve::{PreResolutionDataReader, PreResolvedEntry};

pub use resolver::{CachingDependencyResolver, DependencyResolver};

pub use verifier::{ChecksumDependencyVerifier, DependencyVerifier, PassthroughVerifier};
