//! Memoized change sets and the suite path filter

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use comm_taskgraph_core::config::GraphConfig;
use comm_taskgraph_core::path::{match_any, match_path};
use comm_taskgraph_core::types::Parameters;

use crate::repository::Result;
use crate::source::ChangedFilesSource;

/// Set of changed paths, relative to the repository root
pub type ChangedFileSet = BTreeSet<String>;

/// Top-level directories owned by the suite product
pub const SUITE_DIRS: [&str; 2] = ["editor", "suite"];

/// Return whether `path` matches at least one of `patterns`
pub fn is_path_excluded<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    match_any(path, patterns)
}

/// Return whether `path` lives under one of the suite directories
pub fn is_suite_path(path: &str) -> bool {
    is_path_excluded(path, &SUITE_DIRS)
}

/// Parameter names locating one repository of a push
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryKeys {
    /// Parameter holding the repository URL
    pub repository: String,
    /// Parameter holding the revision
    pub revision: String,
    /// Whether paths from this repository get the comm prefix
    pub prefixed: bool,
}

impl RepositoryKeys {
    /// The head (gecko) repository: `head_repository` / `head_rev`
    pub fn head() -> Self {
        Self::with_prefix("", false)
    }

    /// The project repository, e.g. `comm_head_repository` / `comm_head_rev` for `comm_`
    pub fn project(prefix: &str) -> Self {
        Self::with_prefix(prefix, true)
    }

    fn with_prefix(prefix: &str, prefixed: bool) -> Self {
        Self {
            repository: format!("{}head_repository", prefix),
            revision: format!("{}head_rev", prefix),
            prefixed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ChangeSetKey {
    repository: String,
    revision: String,
}

type Slot = Arc<Mutex<Option<Arc<ChangedFileSet>>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Lookup-or-compute cache with one lock per key.
///
/// Concurrent first lookups of the same key wait on that key's slot, so each
/// key is computed at most once. Failed computations leave the slot empty.
#[derive(Default)]
struct MemoCache {
    slots: Mutex<HashMap<ChangeSetKey, Slot>>,
}

impl MemoCache {
    fn get_or_try_insert(
        &self,
        key: ChangeSetKey,
        compute: impl FnOnce() -> Result<ChangedFileSet>,
    ) -> Result<Arc<ChangedFileSet>> {
        let slot = Arc::clone(lock(&self.slots).entry(key).or_default());

        let mut cached = lock(&slot);
        if let Some(set) = cached.as_ref() {
            return Ok(Arc::clone(set));
        }

        let set = Arc::new(compute()?);
        *cached = Some(Arc::clone(&set));
        Ok(set)
    }
}

/// Resolves the files changed by a push, remembering every answer.
///
/// One resolver is meant to live for a whole graph generation and be shared
/// by every strategy that inspects changed files.
pub struct ChangeSetResolver {
    source: Arc<dyn ChangedFilesSource>,
    suite_dirs: Vec<String>,
    comm_prefix: String,
    head_repository: RepositoryKeys,
    project_repository: RepositoryKeys,
    changed: MemoCache,
    non_suite: MemoCache,
}

impl ChangeSetResolver {
    /// Create a resolver with the default configuration
    pub fn new(source: Arc<dyn ChangedFilesSource>) -> Self {
        Self::with_config(source, &GraphConfig::default())
    }

    /// Create a resolver from the graph configuration
    pub fn with_config(source: Arc<dyn ChangedFilesSource>, config: &GraphConfig) -> Self {
        Self {
            source,
            suite_dirs: config.optimize.suite_dirs.clone(),
            comm_prefix: config.optimize.comm_prefix.clone(),
            head_repository: RepositoryKeys::head(),
            project_repository: RepositoryKeys::project(&config.project_repo_param_prefix),
            changed: MemoCache::default(),
            non_suite: MemoCache::default(),
        }
    }

    /// Files changed by `revision` of `repository`
    pub fn changed_files(&self, repository: &str, revision: &str) -> Result<Arc<ChangedFileSet>> {
        let key = ChangeSetKey {
            repository: repository.to_string(),
            revision: revision.to_string(),
        };
        self.changed.get_or_try_insert(key, || {
            debug!(repository, revision, "fetching changed files");
            let files: ChangedFileSet = self
                .source
                .get_changed_files(repository, revision)?
                .into_iter()
                .collect();
            debug!(repository, revision, count = files.len(), "changed files fetched");
            Ok(files)
        })
    }

    /// Files changed by `revision` of `repository`, without suite paths
    pub fn non_suite_changed_files(
        &self,
        repository: &str,
        revision: &str,
    ) -> Result<Arc<ChangedFileSet>> {
        let key = ChangeSetKey {
            repository: repository.to_string(),
            revision: revision.to_string(),
        };
        self.non_suite.get_or_try_insert(key, || {
            let files = self.changed_files(repository, revision)?;
            Ok(files
                .iter()
                .filter(|path| !self.is_suite(path))
                .cloned()
                .collect())
        })
    }

    /// Parameter keys of the head (gecko) repository
    pub fn head_repository(&self) -> &RepositoryKeys {
        &self.head_repository
    }

    /// Parameter keys of the project (comm) repository
    pub fn project_repository(&self) -> &RepositoryKeys {
        &self.project_repository
    }

    /// Whether `path` is under one of this resolver's suite directories
    pub fn is_suite(&self, path: &str) -> bool {
        is_path_excluded(path, &self.suite_dirs)
    }

    /// Union of the files changed in every repository of the push.
    ///
    /// Returns `None` when none of the repositories are described by `params`.
    pub fn push_changed_files(
        &self,
        params: &Parameters,
        repositories: &[RepositoryKeys],
    ) -> Result<Option<ChangedFileSet>> {
        let mut found = false;
        let mut files = ChangedFileSet::new();

        for keys in repositories {
            let Some((repository, revision)) =
                params.repository_revision(&keys.repository, &keys.revision)
            else {
                continue;
            };
            found = true;

            let changed = self.changed_files(repository, revision)?;
            if keys.prefixed {
                files.extend(changed.iter().map(|p| format!("{}{}", self.comm_prefix, p)));
            } else {
                files.extend(changed.iter().cloned());
            }
        }

        Ok(found.then_some(files))
    }

    /// Whether any file changed by the push matches one of `patterns`.
    ///
    /// Both the head and the project repositories are consulted; project
    /// paths carry the comm prefix.
    pub fn check<S: AsRef<str>>(&self, params: &Parameters, patterns: &[S]) -> Result<bool> {
        let repositories = [self.head_repository.clone(), self.project_repository.clone()];
        self.check_repositories(params, patterns, &repositories)
    }

    /// Like [`check`](Self::check) for an explicit list of repositories.
    ///
    /// When no repository information is available every file is assumed changed.
    pub fn check_repositories<S: AsRef<str>>(
        &self,
        params: &Parameters,
        patterns: &[S],
        repositories: &[RepositoryKeys],
    ) -> Result<bool> {
        let Some(files) = self.push_changed_files(params, repositories)? else {
            warn!("missing repository or revision parameters; assuming all files have changed");
            return Ok(true);
        };

        let matched = patterns
            .iter()
            .any(|pattern| files.iter().any(|path| match_path(path, pattern.as_ref())));
        Ok(matched)
    }
}
