//! Repository model operations
//!
//! Each file adds one operation (or a small family) to `Repository`.
//! Mutating operations run through the repository's transaction helper, so
//! they either apply completely or leave the repository untouched.
//!
//! ## Operations
//!
//! - `init`: Create (or recreate) an empty repository
//! - `commit`: Record a commit on the current tip
//! - `branch`: Create a branch at the current tip
//! - `checkout`: Attach HEAD to a branch or detach it at a commit
//! - `merge`: Up-to-date, fast-forward or two-parent merge
//! - `rebase`: Replay unique commits onto another branch
//! - `cherry_pick`: Copy one commit onto the current tip
//! - `reset`: Move the current branch to any revision
//! - `stash`: Bookmark stack of tips
//! - `tag`: Immutable named pointers
//! - `push` / `pull`: Remote-tracking ref bookkeeping
//! - `log`, `status`, `snapshot`, `rev_parse`: Queries

pub mod branch;
pub mod checkout;
pub mod cherry_pick;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod pull;
pub mod push;
pub mod rebase;
pub mod reset;
pub mod rev_parse;
pub mod snapshot;
pub mod stash;
pub mod status;
pub mod tag;
