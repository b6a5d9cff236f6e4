//! ai-commit - CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use ai_commit::commit::{CommitOptions, CommitOrchestrator, CommitOutcome, TerminalPresenter};
use ai_commit::config::ApiConfig;
use ai_commit::git::GitRepository;
use ai_commit::llm::ChatCompletionGenerator;

/// Environment variable holding tracing filter directives.
const LOG_ENV_VAR: &str = "AI_COMMIT_LOG";

/// Auto-generate Git commit messages using AI.
#[derive(Parser, Debug)]
#[command(name = "ai-commit")]
#[command(about = "CLI tool to auto-generate Git commit messages using AI")]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Auto-generate a commit message based on staged changes
    Commit {
        /// Stage all changes before generating the message
        #[arg(short = 'a', long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env before logging so it can carry AI_COMMIT_LOG too
    let dotenv = dotenvy::dotenv();
    init_tracing(cli.verbose);
    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    match cli.command {
        Command::Commit { all } => run_commit(CommitOptions { stage_all: all }).await,
    }
}

/// Wire the collaborators and run the commit flow.
async fn run_commit(options: CommitOptions) -> Result<()> {
    // Credentials are checked before touching the repository
    let config = ApiConfig::from_env()?;

    let generator =
        ChatCompletionGenerator::new(&config).context("Failed to build the API client")?;

    let repo = GitRepository::discover(".")
        .context("Not a git repository. Run ai-commit from within a git repository.")?;

    let orchestrator = CommitOrchestrator::new(repo, generator, TerminalPresenter);
    let outcome = orchestrator
        .run(options)
        .await
        .context("Error during commit process")?;

    match &outcome {
        CommitOutcome::Committed { id, message } => {
            let id = id.to_string();
            let subject = message.lines().next().unwrap_or_default();
            println!("{} [{}] {}", outcome.summary(), &id[..7], subject);
        }
        CommitOutcome::NoChanges | CommitOutcome::NothingStaged => {
            println!("{}", outcome.summary());
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber on stderr.
///
/// `--verbose` forces debug output for this crate; otherwise the filter comes
/// from `AI_COMMIT_LOG`, then `RUST_LOG`, then defaults to `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("warn,ai_commit=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
