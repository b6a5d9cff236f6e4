//! Conventional commit subject parsing.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Pattern: optional emoji prefix, then `type(scope)!: description`.
static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^\w\s]+\s*)?(\w+)(?:\(([^)]+)\))?(!)?\s*:\s*(\S.*)$")
        .expect("subject pattern is valid")
});

/// Conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
    Revert,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Revert => "revert",
        }
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            "revert" => Ok(Self::Revert),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first line of a message in `type(scope)!: description` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalSubject {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub breaking: bool,
    pub description: String,
}

impl ConventionalSubject {
    /// Parse the first line of `message`. Returns `None` when it is not a
    /// conventional subject with a known type.
    pub fn parse(message: &str) -> Option<Self> {
        let first_line = message.lines().next()?.trim();
        let caps = SUBJECT_RE.captures(first_line)?;

        let commit_type = caps.get(1)?.as_str().parse::<CommitType>().ok()?;
        let scope = caps.get(2).map(|m| m.as_str().trim().to_string());
        let breaking = caps.get(3).is_some();
        let description = caps.get(4)?.as_str().trim().to_string();

        Some(Self {
            commit_type,
            scope,
            breaking,
            description,
        })
    }
}

impl fmt::Display for ConventionalSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.commit_type)?;
        if let Some(scope) = &self.scope {
            write!(f, "({})", scope)?;
        }
        if self.breaking {
            f.write_str("!")?;
        }
        write!(f, ": {}", self.description)
    }
}
