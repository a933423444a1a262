//! Error taxonomy of the repository model
//!
//! Two families are kept apart:
//!
//! - Precondition failures are user-correctable (unknown branch, detached
//!   HEAD, duplicate tag, ...). They never change state.
//! - [`ConsistencyError`] means the model broke one of its own invariants.
//!   It is wrapped in [`RepositoryError::Internal`] and signals a bug.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

/// Invariant violations found by the consistency check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("HEAD is attached to missing branch '{0}'")]
    HeadBranchMissing(BranchName),

    #[error("detached HEAD points at missing commit {0}")]
    HeadCommitMissing(ObjectId),

    #[error("branch '{branch}' points at missing commit {oid}")]
    DanglingBranch { branch: BranchName, oid: ObjectId },

    #[error("commit {commit} has missing parent {parent}")]
    DanglingParent { commit: ObjectId, parent: ObjectId },

    #[error("tag '{tag}' points at missing commit {oid}")]
    DanglingTag { tag: BranchName, oid: ObjectId },

    #[error("remote-tracking ref '{remote}' points at missing commit {oid}")]
    DanglingRemote { remote: BranchName, oid: ObjectId },

    #[error("stash entry {index} points at missing commit {oid}")]
    DanglingStash { index: usize, oid: ObjectId },

    #[error("commit table key {key} does not match commit id {oid}")]
    MismatchedKey { key: ObjectId, oid: ObjectId },

    #[error("branch '{0}' has no commits although the history is not empty")]
    UnbornBranch(BranchName),

    #[error("more than one branch without commits: {0:?}")]
    MultipleUnbornBranches(Vec<BranchName>),
}

/// Failure of a repository operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("not a repository (run 'init' first)")]
    NotARepository,

    #[error("no commits yet")]
    NoCommits,

    #[error("a branch named '{0}' already exists")]
    BranchExists(BranchName),

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("branch '{0}' has no commits")]
    EmptyBranch(BranchName),

    #[error("tag '{0}' already exists")]
    TagExists(BranchName),

    #[error("{0}")]
    InvalidName(String),

    #[error("no such ref or commit: '{0}'")]
    UnknownRevision(String),

    #[error("short id '{prefix}' is ambiguous ({} candidates)", .candidates.len())]
    AmbiguousRevision {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("cannot {0} in detached HEAD state")]
    DetachedHead(&'static str),

    #[error("cannot {operation} '{branch}' into itself")]
    SelfReference {
        operation: &'static str,
        branch: BranchName,
    },

    #[error("'{0}' walks past the root commit")]
    PastRoot(String),

    #[error("no stash entries")]
    EmptyStash,

    #[error("no remote-tracking ref for '{0}' (push it first)")]
    NoTrackingRef(BranchName),

    #[error("internal error: {0}")]
    Internal(#[from] ConsistencyError),
}

impl RepositoryError {
    /// Whether the error reveals a defect in the model rather than misuse
    pub fn is_internal(&self) -> bool {
        matches!(self, RepositoryError::Internal(_))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
