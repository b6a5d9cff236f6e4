//! Repository status, staging and commit creation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use git2::{
    Commit, ErrorCode, IndexAddOption, Oid, Repository, Status, StatusOptions, message_prettify,
};
use tracing::debug;

use crate::error::RepositoryError;

use super::diff::collect_staged_diff;

/// Changed paths, partitioned into staged and unstaged.
///
/// A path with both index and worktree changes appears in both lists.
/// Untracked files count as unstaged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryStatus {
    pub staged: Vec<String>,
    pub unstaged: Vec<String>,
}

impl RepositoryStatus {
    /// No changes at all, staged or not.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.unstaged.is_empty()
    }

    pub fn has_staged(&self) -> bool {
        !self.staged.is_empty()
    }
}

/// The version-control operations the commit flow depends on.
///
/// This abstraction allows substituting the repository in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Stage every working-tree change, including deletions and untracked files.
    async fn stage_all(&self) -> Result<(), RepositoryError>;

    async fn status(&self) -> Result<RepositoryStatus, RepositoryError>;

    /// Unified diff of staged content against HEAD.
    async fn staged_diff(&self) -> Result<String, RepositoryError>;

    /// Commit the index with `message`, returning the new commit id.
    async fn commit(&self, message: &str) -> Result<Oid, RepositoryError>;
}

/// A git working tree accessed through libgit2.
///
/// Each operation reopens the repository so index and HEAD are always read
/// fresh from disk.
#[derive(Debug, Clone)]
pub struct GitRepository {
    workdir: PathBuf,
}

impl GitRepository {
    /// Locate the repository enclosing `path`.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let repo = Repository::discover(path).map_err(RepositoryError::Open)?;
        let workdir = repo.workdir().ok_or(RepositoryError::Bare)?.to_path_buf();
        debug!("Using repository at {}", workdir.display());
        Ok(Self { workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn open(&self) -> Result<Repository, RepositoryError> {
        Repository::open(&self.workdir).map_err(RepositoryError::Open)
    }
}

#[async_trait]
impl VersionControl for GitRepository {
    async fn stage_all(&self) -> Result<(), RepositoryError> {
        stage_all(&self.open()?)
    }

    async fn status(&self) -> Result<RepositoryStatus, RepositoryError> {
        read_status(&self.open()?)
    }

    async fn staged_diff(&self) -> Result<String, RepositoryError> {
        collect_staged_diff(&self.open()?).map(|diff| diff.text)
    }

    async fn commit(&self, message: &str) -> Result<Oid, RepositoryError> {
        create_commit(&self.open()?, message)
    }
}

fn staged_flags() -> Status {
    Status::INDEX_NEW
        | Status::INDEX_MODIFIED
        | Status::INDEX_DELETED
        | Status::INDEX_RENAMED
        | Status::INDEX_TYPECHANGE
}

fn unstaged_flags() -> Status {
    Status::WT_NEW
        | Status::WT_MODIFIED
        | Status::WT_DELETED
        | Status::WT_RENAMED
        | Status::WT_TYPECHANGE
        | Status::CONFLICTED
}

/// Stage all changes (like `git add -A`).
///
/// `add_all` picks up new and modified files; `update_all` records deletions
/// of tracked files.
pub fn stage_all(repo: &Repository) -> Result<(), RepositoryError> {
    let mut index = repo.index().map_err(RepositoryError::Staging)?;
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .map_err(RepositoryError::Staging)?;
    index
        .update_all(["*"].iter(), None)
        .map_err(RepositoryError::Staging)?;
    index.write().map_err(RepositoryError::Staging)?;

    debug!("Staged all changes ({} index entries)", index.len());
    Ok(())
}

/// Read the working tree status, excluding ignored files.
pub fn read_status(repo: &Repository) -> Result<RepositoryStatus, RepositoryError> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);

    let statuses = repo
        .statuses(Some(&mut opts))
        .map_err(RepositoryError::Status)?;

    let mut status = RepositoryStatus::default();
    for entry in statuses.iter() {
        let Some(path) = entry.path() else {
            continue;
        };
        let flags = entry.status();

        if flags.intersects(staged_flags()) {
            status.staged.push(path.to_string());
        }
        if flags.intersects(unstaged_flags()) {
            status.unstaged.push(path.to_string());
        }
    }

    debug!(
        "Status: {} staged, {} unstaged",
        status.staged.len(),
        status.unstaged.len()
    );
    Ok(status)
}

/// Create a commit from the current index on HEAD.
///
/// The message gets the same whitespace cleanup as `git commit -m`. Fails with
/// [`RepositoryError::NothingToCommit`] when the index tree matches HEAD.
pub fn create_commit(repo: &Repository, message: &str) -> Result<Oid, RepositoryError> {
    let mut index = repo.index().map_err(RepositoryError::Commit)?;
    let tree_id = index.write_tree().map_err(RepositoryError::Commit)?;
    let tree = repo.find_tree(tree_id).map_err(RepositoryError::Commit)?;

    let sig = repo.signature().map_err(RepositoryError::Signature)?;

    let parent: Option<Commit<'_>> = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().map_err(RepositoryError::Commit)?),
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => None,
        Err(e) => return Err(RepositoryError::Commit(e)),
    };

    let unchanged = match &parent {
        Some(parent) => parent.tree_id() == tree_id,
        None => tree.len() == 0,
    };
    if unchanged {
        return Err(RepositoryError::NothingToCommit);
    }

    let message = message_prettify(message, None).map_err(RepositoryError::Commit)?;
    let parents: Vec<&Commit<'_>> = parent.iter().collect();

    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, &message, &tree, &parents)
        .map_err(RepositoryError::Commit)?;

    debug!("Created commit {}", oid);
    Ok(oid)
}
