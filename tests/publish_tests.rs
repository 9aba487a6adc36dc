//! Publisher behavior against an in-memory git backend.
//!
//! The fake models a repository plus its remote, with switches for simulated
//! push failures and a racing publisher landing the tag mid-run. Paused-clock
//! tests let the full 8s/16s/30s schedule run instantly.

use std::collections::HashSet;
use std::sync::Mutex;

use tokio::time::{Duration, Instant};

use trunk_tagger::error::{GitError, Result, TaggerError};
use trunk_tagger::git::GitOperations;
use trunk_tagger::publish::{PublishOptions, PublishOutcome, TrunkPublisher};
use trunk_tagger::trigger::TriggerKind;

fn c1() -> String {
    "f".repeat(40)
}

fn tag1() -> String {
    format!("trunk/{}", c1())
}

#[derive(Default)]
struct FakeState {
    commits: HashSet<String>,
    trunk_ancestors: HashSet<String>,
    local_tags: HashSet<String>,
    remote_tags: HashSet<String>,
    push_failures_remaining: u32,
    racer_wins_during_failure: bool,
    creates: u32,
    pushes: u32,
}

/// In-memory stand-in for a repository plus its remote.
#[derive(Default)]
struct FakeGit {
    state: Mutex<FakeState>,
}

impl FakeGit {
    /// Repository holding `commit` on the trunk history.
    fn with_trunk_commit(commit: &str) -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock().unwrap();
            state.commits.insert(commit.to_string());
            state.trunk_ancestors.insert(commit.to_string());
        }
        fake
    }

    fn fail_pushes(&self, count: u32) {
        self.state.lock().unwrap().push_failures_remaining = count;
    }

    fn racer_wins_during_failure(&self) {
        self.state.lock().unwrap().racer_wins_during_failure = true;
    }

    fn seed_remote_tag(&self, tag: &str) {
        self.state.lock().unwrap().remote_tags.insert(tag.to_string());
    }

    fn drop_from_trunk(&self, commit: &str) {
        self.state.lock().unwrap().trunk_ancestors.remove(commit);
    }

    fn creates(&self) -> u32 {
        self.state.lock().unwrap().creates
    }

    fn pushes(&self) -> u32 {
        self.state.lock().unwrap().pushes
    }

    fn remote_tags(&self) -> Vec<String> {
        self.state.lock().unwrap().remote_tags.iter().cloned().collect()
    }

    fn local_tags(&self) -> Vec<String> {
        self.state.lock().unwrap().local_tags.iter().cloned().collect()
    }
}

impl GitOperations for FakeGit {
    async fn resolve_commit(&self, rev: &str) -> Result<Option<String>> {
        let state = self.state.lock().unwrap();
        Ok(state.commits.contains(rev).then(|| rev.to_string()))
    }

    async fn is_ancestor(&self, commit: &str, _reference: &str) -> Result<bool> {
        Ok(self.state.lock().unwrap().trunk_ancestors.contains(commit))
    }

    async fn local_tag_exists(&self, tag: &str) -> Result<bool> {
        Ok(self.state.lock().unwrap().local_tags.contains(tag))
    }

    async fn remote_tag_exists(&self, _remote: &str, tag: &str) -> Result<bool> {
        Ok(self.state.lock().unwrap().remote_tags.contains(tag))
    }

    async fn create_tag(&self, tag: &str, _commit: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.creates += 1;
        state.local_tags.insert(tag.to_string());
        Ok(())
    }

    async fn delete_tag(&self, tag: &str) -> Result<()> {
        self.state.lock().unwrap().local_tags.remove(tag);
        Ok(())
    }

    async fn push_tag(&self, _remote: &str, tag: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.pushes += 1;
        if state.remote_tags.contains(tag) {
            // The remote rejects a duplicate name.
            return Err(GitError::CommandFailed {
                command: format!("push origin refs/tags/{tag}"),
                stderr: "! [rejected] (already exists)".to_string(),
            }
            .into());
        }
        if state.push_failures_remaining > 0 {
            state.push_failures_remaining -= 1;
            if state.racer_wins_during_failure {
                state.remote_tags.insert(tag.to_string());
            }
            return Err(GitError::CommandFailed {
                command: format!("push origin refs/tags/{tag}"),
                stderr: "remote hung up unexpectedly".to_string(),
            }
            .into());
        }
        state.remote_tags.insert(tag.to_string());
        Ok(())
    }

    async fn fetch_tags(&self, _remote: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let remote: Vec<String> = state.remote_tags.iter().cloned().collect();
        state.local_tags.extend(remote);
        Ok(())
    }
}

#[tokio::test]
async fn publish_then_republish_is_idempotent() {
    let git = FakeGit::with_trunk_commit(&c1());
    let publisher = TrunkPublisher::new(&git, PublishOptions::default());

    let first = publisher.publish(&c1(), TriggerKind::Manual).await.unwrap();
    assert_eq!(first.outcome, PublishOutcome::Created);
    assert_eq!(first.tag, tag1());
    assert_eq!(first.attempts, 1);

    let second = publisher.publish(&c1(), TriggerKind::Manual).await.unwrap();
    assert_eq!(second.outcome, PublishOutcome::AlreadyExists);
    assert_eq!(second.attempts, 0);

    // Exactly one remote tag after both calls.
    assert_eq!(git.remote_tags(), vec![tag1()]);
    assert_eq!(git.creates(), 1);
}

#[tokio::test]
async fn preexisting_remote_tag_short_circuits() {
    let git = FakeGit::with_trunk_commit(&c1());
    git.seed_remote_tag(&tag1());
    let publisher = TrunkPublisher::new(&git, PublishOptions::default());

    let publication = publisher.publish(&c1(), TriggerKind::Push).await.unwrap();
    assert_eq!(publication.outcome, PublishOutcome::AlreadyExists);
    assert_eq!(git.creates(), 0);
    assert_eq!(git.pushes(), 0);
}

#[tokio::test]
async fn missing_commit_attempts_no_tag_operation() {
    let git = FakeGit::default();
    let publisher = TrunkPublisher::new(&git, PublishOptions::default());

    let error = publisher.publish(&c1(), TriggerKind::Push).await.unwrap_err();
    assert!(matches!(error, TaggerError::UnreachableCommit { .. }));
    assert_eq!(git.creates(), 0);
    assert!(git.local_tags().is_empty());
    assert!(git.remote_tags().is_empty());
}

#[tokio::test]
async fn malformed_manual_commit_is_rejected_before_resolution() {
    let git = FakeGit::default();
    let publisher = TrunkPublisher::new(&git, PublishOptions::default());

    let bad_ids = [
        String::new(),
        "abc".to_string(),
        "A".repeat(40),
        "g".repeat(40),
        "a".repeat(39),
    ];
    for bad in &bad_ids {
        let error = publisher.publish(bad, TriggerKind::Manual).await.unwrap_err();
        assert!(
            matches!(error, TaggerError::Validation { .. }),
            "expected validation error for {bad:?}"
        );
    }
}

#[tokio::test]
async fn manual_commit_off_the_trunk_is_unreachable() {
    let git = FakeGit::with_trunk_commit(&c1());
    git.drop_from_trunk(&c1());
    let publisher = TrunkPublisher::new(&git, PublishOptions::default());

    let error = publisher
        .publish(&c1(), TriggerKind::Manual)
        .await
        .unwrap_err();
    assert!(matches!(error, TaggerError::UnreachableCommit { .. }));
    assert_eq!(git.creates(), 0);
}

#[tokio::test]
async fn push_trigger_skips_the_ancestor_check() {
    let git = FakeGit::with_trunk_commit(&c1());
    git.drop_from_trunk(&c1());
    let publisher = TrunkPublisher::new(&git, PublishOptions::default());

    let publication = publisher.publish(&c1(), TriggerKind::Push).await.unwrap();
    assert_eq!(publication.outcome, PublishOutcome::Created);
}

#[tokio::test(start_paused = true)]
async fn retry_exhaustion_performs_four_attempts_with_full_backoff() {
    let git = FakeGit::with_trunk_commit(&c1());
    git.fail_pushes(u32::MAX);
    let publisher = TrunkPublisher::new(&git, PublishOptions::default());

    let started = Instant::now();
    let error = publisher.publish(&c1(), TriggerKind::Push).await.unwrap_err();

    // Delays of 8s, 16s and 30s between the four attempts, none after the last.
    assert_eq!(started.elapsed(), Duration::from_secs(8 + 16 + 30));
    match error {
        TaggerError::PublishFailed { attempts, tag, .. } => {
            assert_eq!(attempts, 4);
            assert_eq!(tag, tag1());
        }
        other => panic!("expected PublishFailed, got {other:?}"),
    }
    assert_eq!(git.creates(), 4);
    assert!(git.remote_tags().is_empty());
    // Cleanup removed the transient local tag after every failed attempt.
    assert!(git.local_tags().is_empty());
}

#[tokio::test(start_paused = true)]
async fn losing_a_race_converges_to_already_exists() {
    let git = FakeGit::with_trunk_commit(&c1());
    git.fail_pushes(1);
    git.racer_wins_during_failure();
    let publisher = TrunkPublisher::new(&git, PublishOptions::default());

    let publication = publisher.publish(&c1(), TriggerKind::Push).await.unwrap();
    assert_eq!(publication.outcome, PublishOutcome::AlreadyExists);
    assert_eq!(publication.attempts, 1);

    // Exactly one remote tag regardless of who created it.
    assert_eq!(git.remote_tags(), vec![tag1()]);
}

#[tokio::test(start_paused = true)]
async fn deadline_stops_the_retry_loop_early() {
    let git = FakeGit::with_trunk_commit(&c1());
    git.fail_pushes(u32::MAX);
    let options = PublishOptions {
        deadline: Some(Duration::from_secs(10)),
        ..PublishOptions::default()
    };
    let publisher = TrunkPublisher::new(&git, options);

    let started = Instant::now();
    let error = publisher.publish(&c1(), TriggerKind::Push).await.unwrap_err();

    // Attempt at t=0, 8s wait, attempt at t=8, then the clamped 2s wait
    // exhausts the 10s budget.
    assert_eq!(started.elapsed(), Duration::from_secs(10));
    match error {
        TaggerError::PublishFailed { attempts, .. } => assert_eq!(attempts, 2),
        other => panic!("expected PublishFailed, got {other:?}"),
    }
}
