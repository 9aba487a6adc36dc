//! Final run report for the operator-facing sink.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::publish::{Publication, PublishOutcome};
use crate::trigger::TriggerKind;

/// Summary of a publish run, printable as text or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    /// Terminal outcome.
    pub outcome: PublishOutcome,
    /// Tag the run ensured.
    pub tag: String,
    /// Commit the tag points at.
    pub commit: String,
    /// Event kind that requested the tag.
    pub trigger: TriggerKind,
    /// Create-and-push attempts performed.
    pub attempts: u32,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl PublishReport {
    /// Build a report from a successful publication.
    pub fn new(publication: &Publication, commit: &str, trigger: TriggerKind) -> Self {
        Self {
            outcome: publication.outcome,
            tag: publication.tag.clone(),
            commit: commit.to_string(),
            trigger,
            attempts: publication.attempts,
            finished_at: Utc::now(),
        }
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
