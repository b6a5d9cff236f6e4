//! The commit flow: stage, diff, generate, confirm, commit.

pub mod orchestrator;
pub mod presenter;
pub mod subject;

pub use orchestrator::{CommitOptions, CommitOrchestrator, CommitOutcome};
pub use presenter::{Presenter, Progress, TerminalPresenter, confirmation_prompt};
pub use subject::{CommitType, ConventionalSubject};
