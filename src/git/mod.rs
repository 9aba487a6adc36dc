//! Git integration for tag publishing.
//!
//! The GitOperations trait names the repository capabilities the publisher
//! needs; GitCli implements them by shelling out to the `git` binary.

mod cli;
mod operations;

pub use cli::GitCli;
pub use operations::GitOperations;
