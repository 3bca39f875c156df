// src/strategy/maven.rs
//
// Maven repository layout strategies.
//
// All paths share the directory scheme
//   {base}/{group with '.' -> '/'}/{artifact}/{version}/
// and differ only in the file name and extension.

use std::sync::Arc;

use crate::domain::{Dependency, Repository};

use super::PathResolutionStrategy;

fn version_directory(repository: &Repository, dependency: &Dependency) -> String {
    let base = repository.url().as_str();
    let base = base.strip_suffix('/').unwrap_or(base);
    format!(
        "{}/{}/{}/{}",
        base,
        dependency.group_id.replace('.', "/"),
        dependency.artifact_id,
        dependency.version
    )
}

/// Artifact paths. Releases yield a single candidate. Snapshot versions
/// yield the standard `-SNAPSHOT` file name first, then the name with the
/// suffix stripped, which some repositories deploy instead. The order is a
/// probing priority.
pub struct MavenPathResolutionStrategy;

impl PathResolutionStrategy for MavenPathResolutionStrategy {
    fn paths_to(&self, repository: &Repository, dependency: &Dependency) -> Vec<String> {
        let directory = version_directory(repository, dependency);
        let mut candidates = vec![format!("{}/{}.jar", directory, dependency.file_stem())];

        if dependency.is_snapshot() {
            let base_version = dependency.version.trim_end_matches("-SNAPSHOT");
            let stem = match &dependency.classifier {
                Some(classifier) => {
                    format!("{}-{}-{}", dependency.artifact_id, base_version, classifier)
                }
                None => format!("{}-{}", dependency.artifact_id, base_version),
            };
            candidates.push(format!("{}/{}.jar", directory, stem));
        }

        candidates
    }
}

/// Checksum paths: every candidate of the decorated strategy, suffixed with
/// the digest-file extension for the configured algorithm
/// (`SHA-256` -> `.sha256`, `SHA-1` -> `.sha1`, `MD5` -> `.md5`).
pub struct MavenChecksumPathResolutionStrategy {
    extension: String,
    delegate: Arc<dyn PathResolutionStrategy>,
}

impl MavenChecksumPathResolutionStrategy {
    pub fn new(algorithm: &str, delegate: Arc<dyn PathResolutionStrategy>) -> Self {
        Self {
            extension: algorithm.to_lowercase().replace('-', ""),
            delegate,
        }
    }
}

impl PathResolutionStrategy for MavenChecksumPathResolutionStrategy {
    fn paths_to(&self, repository: &Repository, dependency: &Dependency) -> Vec<String> {
        self.delegate
            .paths_to(repository, dependency)
            .into_iter()
            .map(|path| format!("{}.{}", path, self.extension))
            .collect()
    }
}

/// Descriptor (POM) paths, used to detect aggregator repositories that host
/// metadata but not the artifact itself.
pub struct MavenPomPathResolutionStrategy;

impl PathResolutionStrategy for MavenPomPathResolutionStrategy {
    fn paths_to(&self, repository: &Repository, dependency: &Dependency) -> Vec<String> {
        let directory = version_directory(repository, dependency);
        vec![format!(
            "{}/{}-{}.pom",
            directory, dependency.artifact_id, dependency.version
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn repo() -> Repository {
        Repository::new(Url::parse("https://repo.example.org/releases/").unwrap())
    }

    fn dep(version: &str, classifier: Option<&str>) -> Dependency {
        Dependency::new(
            "com.example.lib",
            "widget",
            version,
            classifier.map(String::from),
            Vec::new(),
        )
    }

    #[test]
    fn test_release_artifact_path() {
        let paths = MavenPathResolutionStrategy.paths_to(&repo(), &dep("1.2.3", None));
        assert_eq!(
            paths,
            vec![
                "https://repo.example.org/releases/com/example/lib/widget/1.2.3/widget-1.2.3.jar"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_classifier_in_file_name() {
        let paths = MavenPathResolutionStrategy.paths_to(&repo(), &dep("1.2.3", Some("sources")));
        assert_eq!(paths.len(), 1);
        assert!(paths[0].ends_with("/widget-1.2.3-sources.jar"));
    }

    #[test]
    fn test_snapshot_candidates_are_ordered() {
        let paths = MavenPathResolutionStrategy.paths_to(&repo(), &dep("2.0-SNAPSHOT", None));
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("/2.0-SNAPSHOT/widget-2.0-SNAPSHOT.jar"));
        assert!(paths[1].ends_with("/2.0-SNAPSHOT/widget-2.0.jar"));
    }

    #[test]
    fn test_checksum_paths_suffix_every_candidate() {
        let strategy = MavenChecksumPathResolutionStrategy::new(
            "SHA-256",
            Arc::new(MavenPathResolutionStrategy),
        );
        let paths = strategy.paths_to(&repo(), &dep("2.0-SNAPSHOT", None));
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("widget-2.0-SNAPSHOT.jar.sha256"));
        assert!(paths[1].ends_with("widget-2.0.jar.sha256"));
    }

    #[test]
    fn test_pom_path() {
        let paths = MavenPomPathResolutionStrategy.paths_to(&repo(), &dep("1.2.3", None));
        assert_eq!(
            paths,
            vec![
                "https://repo.example.org/releases/com/example/lib/widget/1.2.3/widget-1.2.3.pom"
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let repo = Repository::new(Url::parse("https://repo.example.org/releases").unwrap());
        let paths = MavenPathResolutionStrategy.paths_to(&repo, &dep("1.2.3", None));
        assert!(paths[0].starts_with("https://repo.example.org/releases/com/"));
    }
}
