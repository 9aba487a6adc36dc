//! # trunk_tagger
//!
//! Idempotent trunk tag publisher for git repositories.
//!
//! Given a commit that landed on the integration branch (or an
//! operator-supplied commit hash), the publisher ensures exactly one tag
//! named `trunk/<commit>` exists, pointing at that commit, both locally and
//! on the remote. Concurrent runs for the same commit converge on a single
//! tag without error: the remote tag namespace is the source of truth, and a
//! push rejected because the name already exists counts as success for the
//! losing run.
//!
//! ## Usage
//!
//! ```bash
//! trunk_tagger publish <sha> --trigger push   # just-pushed branch tip
//! trunk_tagger publish <sha>                  # operator request, fully validated
//! trunk_tagger check <sha>                    # query without creating
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod error;
pub mod git;
pub mod publish;
pub mod report;
pub mod trigger;

// Re-export main types for public API
pub use cli::Args;
pub use error::{GitError, Result, TaggerError};
pub use git::{GitCli, GitOperations};
pub use publish::{
    BackoffPolicy, Publication, PublishOptions, PublishOutcome, TrunkPublisher,
    is_valid_commit_id, trunk_tag_name,
};
pub use report::PublishReport;
pub use trigger::TriggerKind;
