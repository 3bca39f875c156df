// src/domain/dependency.rs
//
// Dependency and Repository value types.
//
// Both are immutable after construction. Equality and hashing are by field
// identity, so they can key the resolution cache directly.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, versioned software component with optional classifier and
/// transitive dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub classifier: Option<String>,

    /// Components this dependency pulls in itself. Not consulted during
    /// resolution of this dependency; the consumer walks them.
    #[serde(default)]
    pub transitive: Vec<Dependency>,
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        classifier: Option<String>,
        transitive: Vec<Dependency>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            classifier,
            transitive,
        }
    }

    pub fn is_snapshot(&self) -> bool {
        self.version.ends_with("-SNAPSHOT")
    }

    /// Filename stem shared by artifact, checksum and descriptor files:
    /// `{artifact}-{version}[-{classifier}]`
    pub fn file_stem(&self) -> String {
        match &self.classifier {
            Some(classifier) => {
                format!("{}-{}-{}", self.artifact_id, self.version, classifier)
            }
            None => format!("{}-{}", self.artifact_id, self.version),
        }
    }
}

/// Canonical string identity: `group:artifact:version[:classifier]`.
/// Pre-resolved override maps are keyed by this form.
impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.group_id, self.artifact_id, self.version
        )?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}

/// A remote source location queried for artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    url: Url,
}

impl Repository {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
