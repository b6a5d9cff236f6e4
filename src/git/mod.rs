//! Version-control boundary: the `VersionControl` trait and its git2 implementation.

pub mod diff;
pub mod repository;

pub use diff::{StagedDiff, collect_staged_diff};
pub use repository::{
    GitRepository, RepositoryStatus, VersionControl, create_commit, read_status, stage_all,
};

#[cfg(test)]
pub use repository::MockVersionControl;
