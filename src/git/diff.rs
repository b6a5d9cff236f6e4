//! Staged diff collection using git2.

use git2::{Diff, DiffFormat, ErrorCode, Repository, Tree};
use tracing::{debug, warn};

use crate::error::RepositoryError;

/// Maximum characters for the unified diff text before truncation.
pub const MAX_DIFF_LENGTH: usize = 30_000;

/// Unified diff of the index against HEAD.
#[derive(Debug, Clone, Default)]
pub struct StagedDiff {
    pub text: String,
    pub files: usize,
    pub additions: usize,
    pub deletions: usize,
    pub truncated: bool,
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found),
/// `Ok(Some(tree))` for repos with a valid HEAD, or `Err(RepositoryError::Diff)`
/// for real errors (corrupt HEAD, permission issues, missing objects).
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, RepositoryError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(RepositoryError::Diff(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(RepositoryError::Diff)?;
    Ok(Some(tree))
}

/// Collect the diff of staged content (HEAD tree to index).
///
/// On an unborn branch the base is the empty tree, so every staged file shows
/// up as an addition. The text is capped at [`MAX_DIFF_LENGTH`], cut at a
/// line boundary.
pub fn collect_staged_diff(repo: &Repository) -> Result<StagedDiff, RepositoryError> {
    let head_tree = resolve_head_tree(repo)?;

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(RepositoryError::Diff)?;

    let mut staged = StagedDiff {
        files: diff.deltas().len(),
        ..Default::default()
    };
    append_diff_text(&diff, &mut staged)?;

    if staged.truncated {
        warn!(
            "Staged diff exceeds {} characters; sending a truncated diff",
            MAX_DIFF_LENGTH
        );
    }
    debug!(
        "Staged diff: {} files, {} additions, {} deletions, {} chars",
        staged.files,
        staged.additions,
        staged.deletions,
        staged.text.len()
    );

    Ok(staged)
}

/// Append unified diff text from a diff object, respecting the max length.
fn append_diff_text(diff: &Diff<'_>, staged: &mut StagedDiff) -> Result<(), RepositoryError> {
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let origin = line.origin();
        match origin {
            '+' => staged.additions += 1,
            '-' => staged.deletions += 1,
            _ => {}
        }

        if staged.truncated {
            return true;
        }

        let content = String::from_utf8_lossy(line.content());

        // Check if adding this line would exceed the limit
        if staged.text.len() + content.len() + 1 > MAX_DIFF_LENGTH {
            staged.truncated = true;
            return true;
        }

        if origin == '+' || origin == '-' || origin == ' ' {
            staged.text.push(origin);
        }
        staged.text.push_str(&content);

        true
    })
    .map_err(RepositoryError::Diff)
}
