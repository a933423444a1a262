//! Graph layout inputs
//!
//! Turns a set of commits into the ordering data a renderer needs:
//!
//! - `topological_order`: every commit after all of its parents
//! - `rows`: depth of each commit, 0 for roots and one more than the
//!   deepest parent otherwise, so newer work sits above older work
//! - `columns`: a lane per originating branch (branch affinity)
//!
//! Nothing here mutates the commits it reads.

use crate::artifacts::graph::ancestry::Ancestry;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

/// Key used to break ties between commits that are ready at the same time
type ReadyKey = Reverse<(chrono::DateTime<chrono::FixedOffset>, ObjectId)>;

/// Order commits so that each one comes after all of its parents
///
/// Among commits whose parents are all placed, the oldest (then the
/// smallest id) goes first, which keeps the order deterministic. Parents
/// missing from `commits` are ignored.
pub fn topological_order(commits: &BTreeMap<ObjectId, Commit>) -> Vec<ObjectId> {
    let mut pending_parents = HashMap::<&ObjectId, usize>::new();
    let mut children = HashMap::<&ObjectId, Vec<&ObjectId>>::new();

    for (oid, commit) in commits {
        let known_parents = commit
            .parents()
            .iter()
            .filter(|parent| commits.contains_key(*parent))
            .collect::<Vec<_>>();
        pending_parents.insert(oid, known_parents.len());
        for parent in known_parents {
            children.entry(parent).or_default().push(oid);
        }
    }

    let ready_key = |oid: &ObjectId| -> ReadyKey {
        let timestamp = commits
            .get(oid)
            .map(Commit::timestamp)
            .unwrap_or_default();
        Reverse((timestamp, oid.clone()))
    };

    let mut ready = pending_parents
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(oid, _)| ready_key(oid))
        .collect::<BinaryHeap<_>>();

    let mut ordered = Vec::with_capacity(commits.len());
    while let Some(Reverse((_, oid))) = ready.pop() {
        if let Some(children) = children.get(&oid) {
            for child in children {
                if let Some(count) = pending_parents.get_mut(*child) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(ready_key(child));
                    }
                }
            }
        }
        ordered.push(oid);
    }

    ordered
}

/// Depth of every commit
pub fn rows(commits: &BTreeMap<ObjectId, Commit>) -> HashMap<ObjectId, usize> {
    let ancestry = Ancestry::new(|oid| commits.get(oid).map(Commit::as_slim));

    commits
        .keys()
        .map(|oid| (oid.clone(), ancestry.generation(oid)))
        .collect()
}

/// Lane of every commit, one lane per originating branch
///
/// Lanes are handed out in topological order, so the branch of the root
/// commit gets lane 0. Commits made on a detached HEAD share one extra lane.
pub fn columns(commits: &BTreeMap<ObjectId, Commit>) -> HashMap<ObjectId, usize> {
    let mut lanes = HashMap::<Option<String>, usize>::new();

    topological_order(commits)
        .into_iter()
        .map(|oid| {
            let branch = commits
                .get(&oid)
                .and_then(|commit| commit.origin_branch())
                .map(|branch| branch.to_string());
            let next_lane = lanes.len();
            let lane = *lanes.entry(branch).or_insert(next_lane);
            (oid, lane)
        })
        .collect()
}

/// Position of one commit in the rendered graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: ObjectId,
    pub row: usize,
    pub column: usize,
}

/// Rows and lanes for a whole commit set, in topological order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphLayout {
    pub nodes: Vec<LayoutNode>,
}

impl GraphLayout {
    pub fn compute(commits: &BTreeMap<ObjectId, Commit>) -> Self {
        let rows = rows(commits);
        let columns = columns(commits);

        let nodes = topological_order(commits)
            .into_iter()
            .map(|id| LayoutNode {
                row: rows.get(&id).copied().unwrap_or(0),
                column: columns.get(&id).copied().unwrap_or(0),
                id,
            })
            .collect();

        GraphLayout { nodes }
    }

    pub fn node(&self, id: &ObjectId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == *id)
    }

    /// Number of distinct lanes in use
    pub fn width(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| node.column + 1)
            .max()
            .unwrap_or(0)
    }
}
