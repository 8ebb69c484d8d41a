//! Local git checkouts used to compute changed files

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use git2::{DiffOptions, Repository};
use tracing::{debug, info, instrument};

use comm_taskgraph_core::error::FilesError;

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, FilesError>;

/// Git repository wrapper
pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                FilesError::RepositoryNotFound(path.display().to_string())
            } else {
                FilesError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Files touched by `revision` relative to its parents.
    ///
    /// Merge commits report the union over every parent and root commits are
    /// compared with the empty tree. Renames report both the old and new path.
    /// Paths come back sorted.
    pub fn changed_paths(&self, revision: &str) -> Result<Vec<String>> {
        let commit = self
            .repo
            .revparse_single(revision)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|e| {
                if e.code() == git2::ErrorCode::NotFound {
                    FilesError::RevisionNotFound {
                        repository: self.path.display().to_string(),
                        revision: revision.to_string(),
                    }
                } else {
                    FilesError::Git2(e)
                }
            })?;
        let tree = commit.tree()?;

        let mut parent_trees = Vec::new();
        for parent in commit.parents() {
            parent_trees.push(Some(parent.tree()?));
        }
        if parent_trees.is_empty() {
            parent_trees.push(None);
        }

        let mut paths = BTreeSet::new();
        for parent_tree in &parent_trees {
            let mut opts = DiffOptions::new();
            let mut diff =
                self.repo
                    .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
            diff.find_similar(None)?;

            for delta in diff.deltas() {
                for file in [delta.old_file(), delta.new_file()] {
                    if let Some(path) = file.path().and_then(Path::to_str) {
                        paths.insert(path.to_string());
                    }
                }
            }
        }

        debug!(
            revision,
            parents = parent_trees.len(),
            files = paths.len(),
            "computed changed paths"
        );
        Ok(paths.into_iter().collect())
    }
}
