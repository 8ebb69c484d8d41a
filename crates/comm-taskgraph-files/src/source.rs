//! Sources of changed-file information

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use comm_taskgraph_core::error::FilesError;

use crate::repository::{GitRepo, Result};

/// Fetches the files changed by a revision of a repository
pub trait ChangedFilesSource: Send + Sync {
    /// Get the paths changed by `revision` relative to its parent(s)
    fn get_changed_files(&self, repository: &str, revision: &str) -> Result<Vec<String>>;
}

/// Changed files computed from local git checkouts
///
/// Repository URLs are mapped to checkout directories; a repository string
/// with no mapping is treated as a local path.
#[derive(Debug, Clone, Default)]
pub struct GitChangedFiles {
    checkouts: HashMap<String, PathBuf>,
}

impl GitChangedFiles {
    /// Create a source with no URL mappings
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a repository URL to a local checkout
    pub fn with_checkout(mut self, repository: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.checkouts.insert(repository.into(), path.into());
        self
    }

    fn checkout_for(&self, repository: &str) -> PathBuf {
        self.checkouts
            .get(repository)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(repository))
    }
}

impl ChangedFilesSource for GitChangedFiles {
    fn get_changed_files(&self, repository: &str, revision: &str) -> Result<Vec<String>> {
        let checkout = self.checkout_for(repository);
        debug!(repository, checkout = %checkout.display(), revision, "fetching changed files from git");
        let repo = GitRepo::open(&checkout)?;
        repo.changed_paths(revision)
    }
}

#[derive(Debug, Deserialize)]
struct RecordedChange {
    repository: String,
    revision: String,
    files: Vec<String>,
}

/// Changed files recorded ahead of time, e.g. from a push log export
#[derive(Debug, Clone, Default)]
pub struct StaticChangedFiles {
    changes: HashMap<(String, String), Vec<String>>,
}

impl StaticChangedFiles {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the files changed by a revision
    pub fn with_change(
        mut self,
        repository: impl Into<String>,
        revision: impl Into<String>,
        files: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.changes.insert(
            (repository.into(), revision.into()),
            files.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Load a table from a YAML or JSON list of `{repository, revision, files}`
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading recorded changed files");
        let content =
            std::fs::read_to_string(path).map_err(|e| FilesError::LoadFailed(e.to_string()))?;

        let records: Vec<RecordedChange> = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content).map_err(|e| FilesError::LoadFailed(e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| FilesError::LoadFailed(e.to_string()))?
        };

        let mut table = Self::new();
        for record in records {
            table = table.with_change(record.repository, record.revision, record.files);
        }
        Ok(table)
    }
}

impl ChangedFilesSource for StaticChangedFiles {
    fn get_changed_files(&self, repository: &str, revision: &str) -> Result<Vec<String>> {
        self.changes
            .get(&(repository.to_string(), revision.to_string()))
            .cloned()
            .ok_or_else(|| FilesError::NotRecorded {
                repository: repository.to_string(),
                revision: revision.to_string(),
            })
    }
}
