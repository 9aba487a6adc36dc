//! Idempotent trunk tag creation with bounded retry.
//!
//! The remote tag namespace is the source of truth: a push of a new tag name
//! either succeeds, or is rejected because a concurrent publisher already won
//! the name. The loop re-checks existence before every attempt and once more
//! after the last, so a lost race always terminates as `AlreadyExists`.

mod backoff;

pub use backoff::BackoffPolicy;

use log::{debug, warn};
use serde::Serialize;
use tokio::time::{Duration, Instant, sleep};

use crate::error::{Result, TaggerError};
use crate::git::GitOperations;
use crate::trigger::TriggerKind;

/// Prefix every trunk tag name carries.
pub const TAG_PREFIX: &str = "trunk/";

/// Tag name for a commit: the prefix followed by the full identifier.
pub fn trunk_tag_name(commit: &str) -> String {
    format!("{TAG_PREFIX}{commit}")
}

/// A commit identifier is exactly 40 lowercase hex characters.
pub fn is_valid_commit_id(commit: &str) -> bool {
    commit.len() == 40
        && commit
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Terminal outcome of a publish run. Both variants mean the tag exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishOutcome {
    /// This run created and pushed the tag.
    Created,
    /// The tag was already present locally or on the remote.
    AlreadyExists,
}

/// Successful publish result handed to the reporting sink.
#[derive(Debug, Clone)]
pub struct Publication {
    /// Terminal outcome.
    pub outcome: PublishOutcome,
    /// Tag the run ensured.
    pub tag: String,
    /// Create-and-push attempts performed.
    pub attempts: u32,
}

/// Tuning for a publish run.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Remote that owns the authoritative tag namespace.
    pub remote: String,
    /// Integration branch manual commits must be reachable from.
    pub branch: String,
    /// Retry schedule for the creation loop.
    pub backoff: BackoffPolicy,
    /// Optional overall budget; `None` keeps only the bounded retry loop.
    pub deadline: Option<Duration>,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
            backoff: BackoffPolicy::default(),
            deadline: None,
        }
    }
}

/// Publisher ensuring exactly one `trunk/<commit>` tag exists per commit.
pub struct TrunkPublisher<'a, G> {
    git: &'a G,
    options: PublishOptions,
}

impl<'a, G: GitOperations> TrunkPublisher<'a, G> {
    /// Create a publisher over a git backend.
    pub fn new(git: &'a G, options: PublishOptions) -> Self {
        Self { git, options }
    }

    /// Ensure the trunk tag for `commit` exists locally and on the remote.
    ///
    /// Validation runs in order and fails fast: identifier format (manual
    /// triggers only), object-database resolution, then ancestry against the
    /// remote integration branch tip (manual triggers only). Push triggers
    /// carry the just-pushed tip, which is reachable by construction.
    pub async fn publish(&self, commit: &str, trigger: TriggerKind) -> Result<Publication> {
        if trigger == TriggerKind::Manual && !is_valid_commit_id(commit) {
            return Err(TaggerError::Validation {
                commit: commit.to_string(),
            });
        }

        if self.git.resolve_commit(commit).await?.is_none() {
            return Err(TaggerError::UnreachableCommit {
                commit: commit.to_string(),
                reason: "not present in the object database".to_string(),
            });
        }

        if trigger == TriggerKind::Manual {
            let tip = format!("{}/{}", self.options.remote, self.options.branch);
            if !self.git.is_ancestor(commit, &tip).await? {
                return Err(TaggerError::UnreachableCommit {
                    commit: commit.to_string(),
                    reason: format!("not an ancestor of {tip}"),
                });
            }
        }

        let tag = trunk_tag_name(commit);
        if self.tag_exists_anywhere(&tag).await? {
            debug!("tag {tag} already exists, nothing to do");
            return Ok(Publication {
                outcome: PublishOutcome::AlreadyExists,
                tag,
                attempts: 0,
            });
        }

        self.create_with_retry(commit, tag).await
    }

    /// Query the combined local and remote tag namespaces.
    async fn tag_exists_anywhere(&self, tag: &str) -> Result<bool> {
        if self.git.local_tag_exists(tag).await? {
            return Ok(true);
        }
        self.git.remote_tag_exists(&self.options.remote, tag).await
    }

    async fn create_with_retry(&self, commit: &str, tag: String) -> Result<Publication> {
        let policy = self.options.backoff;
        let deadline = self.options.deadline.map(|limit| Instant::now() + limit);
        let mut attempts_made = 0;
        let mut last_error = None;

        loop {
            // Runs immediately before the first create, before every retry,
            // and once more after the final failure: a win by a concurrent
            // publisher always terminates the run as a success.
            let check = self.tag_exists_anywhere(&tag).await;
            match check {
                Ok(true) => {
                    return Ok(Publication {
                        outcome: PublishOutcome::AlreadyExists,
                        tag,
                        attempts: attempts_made,
                    });
                }
                Ok(false) => {}
                // Before the first attempt a failed query is terminal; during
                // retries it degrades to "not seen" and the loop continues.
                Err(error) if attempts_made == 0 => return Err(error),
                Err(error) => warn!("tag existence re-check failed: {error}"),
            }

            if attempts_made >= policy.total_attempts() {
                break;
            }
            if let Some(deadline) = deadline
                && Instant::now() >= deadline
            {
                debug!("publish deadline reached after {attempts_made} attempt(s)");
                break;
            }

            attempts_made += 1;
            let outcome = self.attempt(commit, &tag).await;
            match outcome {
                Ok(()) => {
                    return Ok(Publication {
                        outcome: PublishOutcome::Created,
                        tag,
                        attempts: attempts_made,
                    });
                }
                Err(error) => {
                    warn!(
                        "publish attempt {attempts_made}/{} for {tag} failed: {error}",
                        policy.total_attempts()
                    );
                    last_error = Some(error);
                }
            }

            if attempts_made <= policy.max_retries {
                let mut delay = policy.delay_before_retry(attempts_made);
                if let Some(deadline) = deadline {
                    delay = delay.min(deadline.saturating_duration_since(Instant::now()));
                }
                debug!("waiting {delay:?} before retry");
                sleep(delay).await;
            }
        }

        Err(TaggerError::PublishFailed {
            tag,
            attempts: attempts_made,
            source: last_error.map(Box::new),
        })
    }

    /// One create-and-push attempt. Any failure is transient to the caller.
    async fn attempt(&self, commit: &str, tag: &str) -> Result<()> {
        self.git.create_tag(tag, commit).await?;

        match self.git.push_tag(&self.options.remote, tag).await {
            Ok(()) => Ok(()),
            Err(push_error) => {
                // A dangling local tag would block the next attempt.
                if let Err(cleanup_error) = self.git.delete_tag(tag).await {
                    debug!("ignoring local tag cleanup failure: {cleanup_error}");
                }
                // Make a tag landed by a racing publisher visible locally.
                if let Err(fetch_error) = self.git.fetch_tags(&self.options.remote).await {
                    debug!("tag fetch after failed push also failed: {fetch_error}");
                }
                Err(push_error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_is_prefix_plus_commit() {
        let commit = "a".repeat(40);
        assert_eq!(trunk_tag_name(&commit), format!("trunk/{commit}"));
    }

    #[test]
    fn valid_commit_ids_pass() {
        assert!(is_valid_commit_id(&"a".repeat(40)));
        assert!(is_valid_commit_id(
            "0123456789abcdef0123456789abcdef01234567"
        ));
    }

    #[test]
    fn invalid_commit_ids_fail() {
        assert!(!is_valid_commit_id(""));
        assert!(!is_valid_commit_id(&"a".repeat(39)));
        assert!(!is_valid_commit_id(&"a".repeat(41)));
        // Uppercase hex is rejected.
        assert!(!is_valid_commit_id(&"A".repeat(40)));
        assert!(!is_valid_commit_id(&"g".repeat(40)));
        assert!(!is_valid_commit_id(
            "0123456789abcdef0123456789abcdef0123456 "
        ));
    }
}
