//! End-to-end commit flow and the generate/confirm loop.

use git2::Oid;
use tracing::debug;

use crate::error::CommitError;
use crate::git::VersionControl;
use crate::llm::MessageGenerator;

use super::presenter::{Presenter, Progress};
use super::subject::ConventionalSubject;

/// Options for a single run, derived from CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitOptions {
    /// Stage all working-tree changes before diffing.
    pub stage_all: bool,
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The working tree has no changes at all.
    NoChanges,
    /// There are changes, but none are staged and staging was not requested.
    NothingStaged,
    /// A commit was created with the accepted message.
    Committed { id: Oid, message: String },
}

impl CommitOutcome {
    pub fn summary(&self) -> &'static str {
        match self {
            CommitOutcome::NoChanges => "No changes to commit.",
            CommitOutcome::NothingStaged => {
                "No staged changes to commit. Stage changes or use the --all flag."
            }
            CommitOutcome::Committed { .. } => "✔ Commit created successfully!",
        }
    }
}

/// States of the generate/confirm loop.
///
/// Only one candidate is ever held; a rejected candidate is dropped on the
/// transition back to `Generating`.
#[derive(Debug)]
enum LoopState {
    Generating { attempt: u32 },
    AwaitingConfirmation { attempt: u32, message: String },
    Accepted(String),
    Aborted(CommitError),
}

/// Drives one commit from the current repository state.
pub struct CommitOrchestrator<V, G, P> {
    vcs: V,
    generator: G,
    presenter: P,
}

impl<V, G, P> CommitOrchestrator<V, G, P>
where
    V: VersionControl,
    G: MessageGenerator,
    P: Presenter,
{
    pub fn new(vcs: V, generator: G, presenter: P) -> Self {
        Self {
            vcs,
            generator,
            presenter,
        }
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Run the flow: optional staging, change checks, the generate/confirm
    /// loop, then the commit. Any collaborator error aborts the run; nothing
    /// already done (such as staging) is rolled back.
    pub async fn run(&self, options: CommitOptions) -> Result<CommitOutcome, CommitError> {
        if options.stage_all {
            self.presenter.notify(Progress::Staging);
            self.vcs.stage_all().await?;
        }

        let status = self.vcs.status().await?;
        if status.is_clean() {
            debug!("Working tree is clean");
            return Ok(CommitOutcome::NoChanges);
        }
        if !status.has_staged() && !options.stage_all {
            debug!("{} unstaged paths, nothing staged", status.unstaged.len());
            return Ok(CommitOutcome::NothingStaged);
        }

        let message = self.confirm_loop().await?;

        let id = self.vcs.commit(&message).await?;
        Ok(CommitOutcome::Committed { id, message })
    }

    /// Generate candidates until one is accepted. There is no attempt cap;
    /// the user ends the loop by accepting.
    async fn confirm_loop(&self) -> Result<String, CommitError> {
        let mut state = LoopState::Generating { attempt: 1 };

        loop {
            state = match state {
                LoopState::Generating { attempt } => match self.generate_candidate(attempt).await {
                    Ok(message) => LoopState::AwaitingConfirmation { attempt, message },
                    Err(e) => LoopState::Aborted(e),
                },
                LoopState::AwaitingConfirmation { attempt, message } => {
                    match self.presenter.confirm(&message).await {
                        Ok(true) => LoopState::Accepted(message),
                        Ok(false) => {
                            debug!("Candidate {} rejected", attempt);
                            LoopState::Generating {
                                attempt: attempt + 1,
                            }
                        }
                        Err(e) => LoopState::Aborted(e.into()),
                    }
                }
                LoopState::Accepted(message) => return Ok(message),
                LoopState::Aborted(e) => return Err(e),
            };
        }
    }

    /// Read a fresh staged diff and ask the generator for one candidate.
    async fn generate_candidate(&self, attempt: u32) -> Result<String, CommitError> {
        let diff = self.vcs.staged_diff().await?;

        self.presenter.notify(if attempt == 1 {
            Progress::Generating
        } else {
            Progress::Regenerating
        });

        let message = self.generator.generate(&diff).await?;
        match ConventionalSubject::parse(&message) {
            Some(subject) => debug!("Candidate {}: {}", attempt, subject),
            None => debug!("Candidate {} has a free-form subject", attempt),
        }
        Ok(message)
    }
}
