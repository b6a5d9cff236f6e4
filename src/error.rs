//! Error types for ai-commit modules using thiserror.

use thiserror::Error;

/// Errors from reading configuration at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Neither GEMINI_API_KEY nor OPENAI_API_KEY is set. Export one of them or add it to a .env file"
    )]
    MissingApiKey,
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Failed to open repository: {0}")]
    Open(#[source] git2::Error),

    #[error("Bare repositories are not supported")]
    Bare,

    #[error("Failed to stage changes: {0}")]
    Staging(#[source] git2::Error),

    #[error("Failed to read repository status: {0}")]
    Status(#[source] git2::Error),

    #[error("Failed to collect staged diff: {0}")]
    Diff(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    Signature(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    Commit(#[source] git2::Error),

    #[error("Nothing to commit: the index matches HEAD")]
    NothingToCommit,
}

/// Errors from commit message generation.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Staged diff is empty; cannot generate a commit message from no changes")]
    EmptyDiff,

    #[error("Chat completion request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Chat completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response from the API: no content returned")]
    EmptyResponse,
}

/// Errors from the interactive confirmation prompt.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to read confirmation: {0}")]
    Interaction(#[source] dialoguer::Error),

    #[error("Confirmation prompt did not complete: {0}")]
    Task(String),
}

/// Errors from the commit flow. Every variant is fatal to the run.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Error generating commit message: {0}")]
    Generation(#[from] GenerationError),

    #[error("Error during confirmation: {0}")]
    Prompt(#[from] PromptError),
}
