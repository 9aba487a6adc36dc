//! Check command implementation.
//!
//! Queries both tag namespaces without creating anything. Exits 0 when the
//! trunk tag exists locally or on the remote, 1 otherwise.

use serde_json::json;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::{Result, TaggerError};
use crate::git::{GitCli, GitOperations};
use crate::publish::{is_valid_commit_id, trunk_tag_name};

/// Execute the check command.
pub(super) async fn execute_check(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let Command::Check { commit } = &args.command else {
        unreachable!("execute_check called with non-Check command");
    };

    // Check has no trigger context, so the strict format rule always applies.
    if !is_valid_commit_id(commit) {
        return Err(TaggerError::Validation {
            commit: commit.clone(),
        });
    }

    let git = GitCli::open(&args.repo).await?;
    let tag = trunk_tag_name(commit);

    let local = git.local_tag_exists(&tag).await?;
    let remote = git.remote_tag_exists(&args.remote, &tag).await?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&json!({
            "tag": tag,
            "commit": commit,
            "local": local,
            "remote": remote,
        }))?;
        println!("{rendered}");
    } else if local || remote {
        let location = match (local, remote) {
            (true, true) => "local and remote",
            (true, false) => "local only",
            _ => "remote only",
        };
        config.success_println(&format!("{tag} exists ({location})"));
    } else {
        config.println(&format!("{tag} does not exist"));
    }

    Ok(if local || remote { 0 } else { 1 })
}
