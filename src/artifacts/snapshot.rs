//! Read-only copy of a repository
//!
//! A snapshot owns its data: the repository can keep mutating after a
//! snapshot is taken without the snapshot changing. Renderers and other
//! read-only consumers work from snapshots only.

use crate::areas::refs::Head;
use crate::areas::repository::RepositoryState;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::graph::layout::{self, GraphLayout};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub initialized: bool,
    pub commits: BTreeMap<ObjectId, Commit>,
    pub branches: BTreeMap<BranchName, Option<ObjectId>>,
    pub tags: BTreeMap<BranchName, ObjectId>,
    pub remotes: BTreeMap<BranchName, ObjectId>,
    pub head: Option<Head>,
    /// Newest entry (`stash@{0}`) first
    pub stash: Vec<ObjectId>,
}

impl RepositorySnapshot {
    /// Snapshot of a repository that has not been initialized
    pub fn uninitialized() -> Self {
        Self::default()
    }

    pub fn capture(state: &RepositoryState) -> Self {
        RepositorySnapshot {
            initialized: true,
            commits: state.database.to_map(),
            branches: state.refs.branches().clone(),
            tags: state.refs.tags().clone(),
            remotes: state.refs.remotes().clone(),
            head: Some(state.refs.head().clone()),
            stash: state.stash.list(),
        }
    }

    pub fn commit(&self, id: &ObjectId) -> Option<&Commit> {
        self.commits.get(id)
    }

    /// The commit HEAD resolves to
    pub fn tip(&self) -> Option<&ObjectId> {
        match self.head.as_ref()? {
            Head::Attached(branch) => self.branches.get(branch)?.as_ref(),
            Head::Detached(oid) => Some(oid),
        }
    }

    pub fn topological_order(&self) -> Vec<ObjectId> {
        layout::topological_order(&self.commits)
    }

    pub fn rows(&self) -> HashMap<ObjectId, usize> {
        layout::rows(&self.commits)
    }

    pub fn columns(&self) -> HashMap<ObjectId, usize> {
        layout::columns(&self.commits)
    }

    pub fn layout(&self) -> GraphLayout {
        GraphLayout::compute(&self.commits)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize repository snapshot")
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse repository snapshot")
    }
}
