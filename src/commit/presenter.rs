//! Presentation of progress and the candidate message.
//!
//! The orchestrator talks to the terminal only through [`Presenter`], so the
//! flow itself has no formatting or I/O of its own.

use async_trait::async_trait;
use dialoguer::Confirm;

use crate::error::PromptError;

/// Progress notices emitted by the commit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Staging,
    Generating,
    Regenerating,
}

impl Progress {
    pub fn message(&self) -> &'static str {
        match self {
            Progress::Staging => "Staging all changes...",
            Progress::Generating => "Generating commit message with AI...",
            Progress::Regenerating => "Regenerating commit message...",
        }
    }
}

/// Shows progress and asks the user to accept or regenerate a candidate.
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Show a progress notice. Purely informational.
    fn notify(&self, _event: Progress) {}

    /// Present `message` and return `true` to accept it, `false` to
    /// regenerate. Must not alter the message.
    async fn confirm(&self, message: &str) -> Result<bool, PromptError>;
}

/// Build the confirmation question shown for a candidate.
pub fn confirmation_prompt(message: &str) -> String {
    format!(
        "Use this commit message?\n\"{}\"\nPress \"Y\" to confirm or \"N\" to regenerate.",
        message
    )
}

/// Interactive terminal presenter using dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

#[async_trait]
impl Presenter for TerminalPresenter {
    fn notify(&self, event: Progress) {
        println!("{}", event.message());
    }

    async fn confirm(&self, message: &str) -> Result<bool, PromptError> {
        let prompt = confirmation_prompt(message);

        // dialoguer blocks on stdin
        tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(true)
                .interact()
        })
        .await
        .map_err(|e| PromptError::Task(e.to_string()))?
        .map_err(PromptError::Interaction)
    }
}
