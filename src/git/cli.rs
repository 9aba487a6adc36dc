//! Git backend driving the `git` binary.
//!
//! Every operation is one `git -C <repo> …` subprocess. Boolean probes
//! (`merge-base --is-ancestor`, `rev-parse --verify`) distinguish a failing
//! exit status from a failure to run git at all.

use std::path::{Path, PathBuf};
use std::process::Output;

use log::debug;
use tokio::process::Command;

use crate::error::{GitError, Result};

use super::operations::GitOperations;

/// Git operations backed by the `git` binary in a fixed repository.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    /// Open a repository, verifying both the `git` binary and the work tree.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        which::which("git").map_err(|_| GitError::BinaryNotFound)?;

        let backend = Self {
            repo: path.as_ref().to_path_buf(),
        };
        if !backend.probe(&["rev-parse", "--git-dir"]).await? {
            return Err(GitError::NotRepository {
                path: backend.repo,
            }
            .into());
        }
        Ok(backend)
    }

    /// Repository path this backend operates on.
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    async fn output(&self, args: &[&str]) -> Result<Output> {
        debug!("git {}", args.join(" "));
        Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()
            .await
            .map_err(|source| {
                GitError::Spawn {
                    command: args.join(" "),
                    source,
                }
                .into()
            })
    }

    /// Run a command whose non-zero exit is an error, returning trimmed stdout.
    async fn run(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args).await?;
        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run a probe whose failing exit means "no" rather than an error.
    async fn probe(&self, args: &[&str]) -> Result<bool> {
        let output = self.output(args).await?;
        Ok(output.status.success())
    }
}

impl GitOperations for GitCli {
    async fn resolve_commit(&self, rev: &str) -> Result<Option<String>> {
        let spec = format!("{rev}^{{commit}}");
        let output = self
            .output(&["rev-parse", "--verify", "--quiet", &spec])
            .await?;
        if !output.status.success() {
            return Ok(None);
        }
        Ok(Some(
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
        ))
    }

    async fn is_ancestor(&self, commit: &str, reference: &str) -> Result<bool> {
        // Exit 1 is the documented "not an ancestor" answer; anything else
        // non-zero is a real failure.
        let output = self
            .output(&["merge-base", "--is-ancestor", commit, reference])
            .await?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(GitError::CommandFailed {
                command: format!("merge-base --is-ancestor {commit} {reference}"),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into()),
        }
    }

    async fn local_tag_exists(&self, tag: &str) -> Result<bool> {
        let listing = self.run(&["tag", "--list", tag]).await?;
        Ok(!listing.is_empty())
    }

    async fn remote_tag_exists(&self, remote: &str, tag: &str) -> Result<bool> {
        let refspec = format!("refs/tags/{tag}");
        let listing = self.run(&["ls-remote", "--tags", remote, &refspec]).await?;
        Ok(!listing.is_empty())
    }

    async fn create_tag(&self, tag: &str, commit: &str) -> Result<()> {
        self.run(&["tag", tag, commit]).await?;
        Ok(())
    }

    async fn delete_tag(&self, tag: &str) -> Result<()> {
        self.run(&["tag", "--delete", tag]).await?;
        Ok(())
    }

    async fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        // Full refspec so the name can never be taken for a branch.
        let refspec = format!("refs/tags/{tag}");
        self.run(&["push", remote, &refspec]).await?;
        Ok(())
    }

    async fn fetch_tags(&self, remote: &str) -> Result<()> {
        self.run(&["fetch", remote, "--tags", "--quiet"]).await?;
        Ok(())
    }
}
