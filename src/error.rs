//! Error types for trunk tag publishing.
//!
//! Every terminal error names the stage it killed: validation, reachability,
//! or publish. Tag-already-exists is an outcome, not an error.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for tagger operations.
pub type Result<T> = std::result::Result<T, TaggerError>;

/// Main error type for all tagger operations.
#[derive(Error, Debug)]
pub enum TaggerError {
    /// Manually supplied commit identifier is not 40 lowercase hex characters.
    #[error("invalid commit identifier '{commit}': expected 40 lowercase hex characters")]
    Validation {
        /// The rejected identifier.
        commit: String,
    },

    /// Commit absent from the object database, or off the trunk history.
    #[error("commit {commit} is unreachable: {reason}")]
    UnreachableCommit {
        /// The commit identifier.
        commit: String,
        /// Why it cannot be tagged.
        reason: String,
    },

    /// Retry budget exhausted without a successful push.
    #[error("failed to publish tag '{tag}' after {attempts} attempt(s)")]
    PublishFailed {
        /// Tag the run tried to create.
        tag: String,
        /// Attempts performed before giving up.
        attempts: u32,
        /// Failure of the last attempt, when one was made.
        #[source]
        source: Option<Box<TaggerError>>,
    },

    /// Git subprocess failure.
    #[error("git error: {0}")]
    Git(#[from] GitError),

    /// IO errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors from anyhow.
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Failures from driving the `git` binary.
#[derive(Error, Debug)]
pub enum GitError {
    /// `git` is not installed or not on PATH.
    #[error("`git` binary not found on PATH")]
    BinaryNotFound,

    /// The given path is not inside a git repository.
    #[error("not a git repository: {path}")]
    NotRepository {
        /// Path that failed the repository probe.
        path: PathBuf,
    },

    /// A git command exited unsuccessfully.
    #[error("`git {command}` failed: {stderr}")]
    CommandFailed {
        /// Arguments the command ran with.
        command: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// A git command could not be spawned at all.
    #[error("could not run `git {command}`: {source}")]
    Spawn {
        /// Arguments the command ran with.
        command: String,
        /// Underlying spawn failure.
        #[source]
        source: std::io::Error,
    },
}

impl TaggerError {
    /// Stage of the run this error terminated, for operator-facing output.
    pub fn stage(&self) -> &'static str {
        match self {
            TaggerError::Validation { .. } => "validation",
            TaggerError::UnreachableCommit { .. } => "reachability",
            TaggerError::PublishFailed { .. } => "publish",
            TaggerError::Json(_) => "reporting",
            TaggerError::Git(_) | TaggerError::Io(_) | TaggerError::Anyhow(_) => {
                "repository access"
            }
        }
    }

    /// Get actionable recovery suggestions for this error.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            TaggerError::Validation { .. } => vec![
                "Pass the full 40-character hash: git rev-parse <ref>".to_string(),
            ],
            TaggerError::UnreachableCommit { .. } => vec![
                "Fetch the latest history: git fetch origin".to_string(),
                "Confirm the commit is on the integration branch: \
                 git merge-base --is-ancestor <commit> origin/main"
                    .to_string(),
            ],
            TaggerError::PublishFailed { .. } => vec![
                "Check connectivity and push permissions for the remote".to_string(),
                "Re-run once the remote is reachable; publishing is idempotent".to_string(),
            ],
            TaggerError::Git(GitError::BinaryNotFound) => {
                vec!["Install git or add it to PATH".to_string()]
            }
            TaggerError::Git(GitError::NotRepository { .. }) => vec![
                "Run from within a git repository, or pass --repo <path>".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
