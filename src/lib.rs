//! bitsim: an in-memory simulator of a git-like repository
//!
//! The crate models a commit DAG with branches, tags, remote-tracking refs,
//! a stash stack and HEAD, together with the algorithms that mutate and query
//! it (ancestry, fast-forward detection, rebase replay, cherry-pick, reset).
//!
//! - `areas`: the repository instance and the state it owns
//! - `artifacts`: value types and graph algorithms
//! - `commands`: model operations (`porcelain`) and the command interpreter

/// Debug logging that only prints when the `debug_graph` feature is enabled
///
/// # Usage
/// ```rust,ignore
/// debug_log!("Replaying commit {}", commit_id);
/// ```
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_graph")]
        {
            eprintln!($($arg)*);
        }
    };
}

pub mod areas;
pub mod artifacts;
pub mod commands;
