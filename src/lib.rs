//! ai-commit - A CLI tool that proposes commit messages for staged changes.
//!
//! # Overview
//!
//! ai-commit reads the staged diff of a git repository, asks an
//! OpenAI-compatible chat completion API for a Conventional Commits message,
//! and commits with it once the user accepts. Rejecting a candidate generates
//! a new one from a fresh diff.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{CommitOptions, CommitOrchestrator, CommitOutcome, Presenter, Progress};
pub use config::{ApiConfig, Provider};
pub use error::{CommitError, ConfigError, GenerationError, PromptError, RepositoryError};
pub use git::{GitRepository, RepositoryStatus, VersionControl};
pub use llm::{ChatCompletionGenerator, MessageGenerator};
