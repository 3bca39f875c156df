// src/output/mod.rs
//
// Output collaborators - deterministic file placement and byte-stream
// persistence for checksum sidecar files.

use log::debug;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::Dependency;
use crate::error::AppResult;

/// Selects the on-disk location owned by a dependency.
#[cfg_attr(test, mockall::automock)]
pub trait FilePathStrategy: Send + Sync {
    fn select_for(&self, dependency: &Dependency) -> PathBuf;
}

/// Places files under a root directory mirroring the repository layout:
/// `{root}/{group as dirs}/{artifact}/{version}/{stem}.{extension}`.
///
/// The extension is derived from a digest algorithm name the same way
/// checksum URLs are (`SHA-256` -> `sha256`), so the sidecar path is
/// per-dependency and per-algorithm.
pub struct DependencyFilePathStrategy {
    root: PathBuf,
    extension: String,
}

impl DependencyFilePathStrategy {
    pub fn new(root: impl Into<PathBuf>, algorithm: &str) -> Self {
        Self {
            root: root.into(),
            extension: algorithm.to_lowercase().replace('-', ""),
        }
    }
}

impl FilePathStrategy for DependencyFilePathStrategy {
    fn select_for(&self, dependency: &Dependency) -> PathBuf {
        let mut path = self.root.clone();
        for segment in dependency.group_id.split('.') {
            path.push(segment);
        }
        path.push(&dependency.artifact_id);
        path.push(&dependency.version);
        path.push(format!("{}.{}", dependency.file_stem(), self.extension));
        path
    }
}

/// Persists a byte stream of known length to one path.
pub trait OutputWriter: Send + Sync {
    fn write_from(&self, reader: &mut dyn Read, length: u64) -> AppResult<u64>;
}

pub struct FileOutputWriter {
    path: PathBuf,
}

impl FileOutputWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputWriter for FileOutputWriter {
    fn write_from(&self, reader: &mut dyn Read, length: u64) -> AppResult<u64> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(&self.path)?;
        let written = io::copy(reader, &mut file)?;
        file.flush()?;

        if written != length {
            debug!(
                "Wrote {} bytes to {} but expected {}",
                written,
                self.path.display(),
                length
            );
        }

        Ok(written)
    }
}

/// Pairs a path strategy with writer creation so consumers can both ask
/// "where does this dependency's file live?" and write to it.
pub struct OutputWriterFactory {
    strategy: Arc<dyn FilePathStrategy>,
}

impl OutputWriterFactory {
    pub fn new(strategy: Arc<dyn FilePathStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &Arc<dyn FilePathStrategy> {
        &self.strategy
    }

    pub fn create(&self, dependency: &Dependency) -> FileOutputWriter {
        FileOutputWriter::new(self.strategy.select_for(dependency))
    }
}
