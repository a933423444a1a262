//! Commit object
//!
//! Commits are the nodes of the history DAG. They contain:
//! - An opaque object id
//! - Parent commit ID(s): none for a root, one for a normal commit, two or
//!   more for a merge (the first parent is the mainline)
//! - The commit message and creation timestamp
//! - The branch that was checked out when the commit was made
//! - Provenance: whether the commit is a merge, a rebase replay or a
//!   cherry-pick, and which commit it was copied from
//!
//! Commits are immutable. History rewriting creates new commits and never
//! edits existing ones.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// How a commit came to exist
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Provenance {
    /// Created directly by `commit`
    #[default]
    Original,
    /// Created by a true (non fast-forward) merge
    Merge,
    /// Replay of `original_id` made by `rebase`
    Rebased { original_id: ObjectId },
    /// Copy of `original_id` made by `cherry-pick`
    CherryPicked { original_id: ObjectId },
}

impl Provenance {
    /// The commit this one was copied from, if any
    pub fn original_id(&self) -> Option<&ObjectId> {
        match self {
            Provenance::Rebased { original_id } | Provenance::CherryPicked { original_id } => {
                Some(original_id)
            }
            Provenance::Original | Provenance::Merge => None,
        }
    }
}

/// Slim representation of a commit
///
/// Contains only what graph walks need (parents and timestamp) and borrows
/// from the commit table instead of cloning.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SlimCommit<'c> {
    /// The commit's object ID
    pub oid: &'c ObjectId,
    /// The commit's parent object IDs
    pub parents: &'c [ObjectId],
    /// Commit timestamp (needed for ordering walks)
    pub timestamp: DateTime<FixedOffset>,
}

/// Commit record
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    id: ObjectId,
    /// Parent commit IDs (empty for the root commit, multiple for merges)
    parents: Vec<ObjectId>,
    message: String,
    timestamp: DateTime<FixedOffset>,
    /// Branch checked out at creation time, `None` for detached commits
    origin_branch: Option<BranchName>,
    provenance: Provenance,
}

impl Commit {
    /// Create a new commit stamped with the current local time
    ///
    /// # Arguments
    ///
    /// * `id` - Freshly generated id
    /// * `parents` - Parent commit IDs (empty for the first commit)
    /// * `message` - Commit message
    /// * `origin_branch` - Branch HEAD was attached to, if any
    /// * `provenance` - How the commit was produced
    pub fn new(
        id: ObjectId,
        parents: Vec<ObjectId>,
        message: String,
        origin_branch: Option<BranchName>,
        provenance: Provenance,
    ) -> Self {
        Self::new_with_timestamp(
            id,
            parents,
            message,
            chrono::Local::now().fixed_offset(),
            origin_branch,
            provenance,
        )
    }

    /// Create a new commit with a specific timestamp
    pub fn new_with_timestamp(
        id: ObjectId,
        parents: Vec<ObjectId>,
        message: String,
        timestamp: DateTime<FixedOffset>,
        origin_branch: Option<BranchName>,
        provenance: Provenance,
    ) -> Self {
        Commit {
            id,
            parents,
            message,
            timestamp,
            origin_branch,
            provenance,
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// First (mainline) parent
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    /// Get the full commit message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    ///
    /// Useful for short-form display (e.g., `log --oneline`)
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn origin_branch(&self) -> Option<&BranchName> {
        self.origin_branch.as_ref()
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1 || self.provenance == Provenance::Merge
    }

    pub fn is_rebased(&self) -> bool {
        matches!(self.provenance, Provenance::Rebased { .. })
    }

    pub fn is_cherry_picked(&self) -> bool {
        matches!(self.provenance, Provenance::CherryPicked { .. })
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }

    pub fn as_slim(&self) -> SlimCommit<'_> {
        SlimCommit {
            oid: &self.id,
            parents: &self.parents,
            timestamp: self.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_commit_has_no_parent() {
        let commit = Commit::new(
            ObjectId::generate(0),
            vec![],
            "initial".to_string(),
            None,
            Provenance::Original,
        );

        assert!(commit.is_root());
        assert!(commit.parent().is_none());
        assert!(!commit.is_merge());
    }

    #[test]
    fn merge_commit_reports_mainline_parent_first() {
        let mainline = ObjectId::generate(1);
        let side = ObjectId::generate(2);
        let commit = Commit::new(
            ObjectId::generate(3),
            vec![mainline.clone(), side],
            "Merge branch 'side'".to_string(),
            BranchName::try_parse("master".to_string()).ok(),
            Provenance::Merge,
        );

        assert!(commit.is_merge());
        assert_eq!(commit.parent(), Some(&mainline));
    }

    #[test]
    fn provenance_exposes_original_id_for_copies() {
        let original = ObjectId::generate(4);

        assert_eq!(
            Provenance::Rebased {
                original_id: original.clone()
            }
            .original_id(),
            Some(&original)
        );
        assert_eq!(Provenance::Merge.original_id(), None);
    }

    #[test]
    fn short_message_is_first_line() {
        let commit = Commit::new(
            ObjectId::generate(5),
            vec![],
            "subject\n\nbody".to_string(),
            None,
            Provenance::Original,
        );

        assert_eq!(commit.short_message(), "subject");
    }
}
