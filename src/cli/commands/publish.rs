//! Publish command implementation.

use tokio::time::Duration;

use crate::cli::{Args, Command, RuntimeConfig};
use crate::error::Result;
use crate::git::GitCli;
use crate::publish::{BackoffPolicy, PublishOptions, PublishOutcome, TrunkPublisher};
use crate::report::PublishReport;

/// Execute the publish command.
pub(super) async fn execute_publish(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let Command::Publish {
        commit,
        trigger,
        deadline_secs,
    } = &args.command
    else {
        unreachable!("execute_publish called with non-Publish command");
    };

    let git = GitCli::open(&args.repo).await?;
    let publisher = TrunkPublisher::new(
        &git,
        PublishOptions {
            remote: args.remote.clone(),
            branch: args.branch.clone(),
            backoff: BackoffPolicy::default(),
            deadline: deadline_secs.map(Duration::from_secs),
        },
    );

    config.verbose_println(&format!(
        "Publishing trunk tag for {commit} ({trigger} trigger, remote '{}')",
        args.remote
    ));

    let publication = publisher.publish(commit, *trigger).await?;
    let report = PublishReport::new(&publication, commit, *trigger);

    if args.json {
        // Machine-readable rendering bypasses quiet mode.
        println!("{}", report.to_json()?);
        return Ok(0);
    }

    match report.outcome {
        PublishOutcome::Created => {
            config.success_println(&format!("Created {} -> {commit}", report.tag));
            config.indent(&format!("attempts: {}", report.attempts));
        }
        PublishOutcome::AlreadyExists => {
            config.success_println(&format!("{} already exists, nothing to do", report.tag));
        }
    }
    config.indent(&format!("trigger: {}", report.trigger));

    Ok(0)
}
