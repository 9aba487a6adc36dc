//! Core Git operations trait for tag publishing.
//!
//! This module defines the GitOperations trait that specifies all Git
//! operations the publisher needs. The concrete implementation is provided by
//! the cli module, which drives the `git` binary.

use std::future::Future;

use crate::error::Result;

/// Trait defining all required Git operations for tag publishing.
pub trait GitOperations {
    /// Resolve a revision to a full commit id, or `None` if it does not name
    /// a commit in the object database.
    fn resolve_commit(&self, rev: &str) -> impl Future<Output = Result<Option<String>>>;

    /// Whether `commit` is an ancestor of (reachable from) `reference`.
    fn is_ancestor(&self, commit: &str, reference: &str) -> impl Future<Output = Result<bool>>;

    /// Whether a tag with this exact name exists locally.
    fn local_tag_exists(&self, tag: &str) -> impl Future<Output = Result<bool>>;

    /// Whether a tag with this exact name exists on the named remote.
    fn remote_tag_exists(&self, remote: &str, tag: &str) -> impl Future<Output = Result<bool>>;

    /// Create a local lightweight tag pointing at a commit.
    fn create_tag(&self, tag: &str, commit: &str) -> impl Future<Output = Result<()>>;

    /// Delete a local tag.
    fn delete_tag(&self, tag: &str) -> impl Future<Output = Result<()>>;

    /// Push a local tag to the named remote under the same name.
    fn push_tag(&self, remote: &str, tag: &str) -> impl Future<Output = Result<()>>;

    /// Fetch tag metadata from the named remote into the local namespace.
    fn fetch_tags(&self, remote: &str) -> impl Future<Output = Result<()>>;
}
