//! comm-taskgraph files - which files did a push change
//!
//! This crate computes the files changed by a revision, either from local
//! git checkouts or from a recorded table, and memoizes the answers for the
//! lifetime of a graph generation. Suite-only paths can be filtered out.

mod repository;
mod resolver;
mod source;

pub use repository::{GitRepo, Result};
pub use resolver::{
    is_path_excluded, is_suite_path, ChangeSetResolver, ChangedFileSet, RepositoryKeys, SUITE_DIRS,
};
pub use source::{ChangedFilesSource, GitChangedFiles, StaticChangedFiles};
