//! Trigger context distinguishing automatic and manual tag requests.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Which kind of event asked for a trunk tag.
///
/// Push triggers carry the just-pushed branch tip, so the publisher skips the
/// format and ancestor checks that guard operator-supplied identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// The commit just landed on the integration branch.
    Push,
    /// The commit identifier came from an operator request.
    Manual,
}

impl TriggerKind {
    /// Stable lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKind::Push => "push",
            TriggerKind::Manual => "manual",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
