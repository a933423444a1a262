//! Best common ancestor (merge base) finder
//!
//! ## Algorithm Overview
//!
//! ### Phase 1: Find All Common Ancestors
//!
//! A bidirectional walk explores the history of both input commits, newest
//! generation first:
//! - Mark commits as visited from the source side or the target side
//! - When a commit is visited from both sides, it is a common ancestor
//! - Mark the ancestors of a common ancestor as STALE to prune the search
//!
//! ### Phase 2: Filter to Best Common Ancestors
//!
//! > A best common ancestor of commits X and Y is any common ancestor of X and Y
//! > that is not an ancestor of any other common ancestor.
//!
//! Redundant ancestors are dropped by re-running phase 1 between each common
//! ancestor and the others. Criss-cross histories can leave several best
//! common ancestors; one of them is returned, preferring the newest.
//!
//! Walk order uses generation numbers rather than timestamps, because
//! commits created in the same instant would otherwise tie and a descendant
//! could be processed after its ancestor.

use crate::artifacts::graph::ancestry::Ancestry;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b100;
        const RESULT = 0b1000;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub struct BCAFinder<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<SlimCommit<'c>>,
{
    ancestry: Ancestry<'c, CommitLoaderFn>,
}

impl<'c, CommitLoaderFn> BCAFinder<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<SlimCommit<'c>>,
{
    /// Creates a finder backed by the given commit loader
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let finder = BCAFinder::new(|oid| database.slim_commit(oid));
    /// let base = finder.find_best_common_ancestor(&head, &other);
    /// ```
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self {
            ancestry: Ancestry::new(commit_loader),
        }
    }

    fn priority(&self, oid: &ObjectId) -> (usize, ObjectId) {
        (self.ancestry.generation(oid), oid.clone())
    }

    /// Phase 1: every commit reachable from both sides that is not below
    /// another common ancestor
    fn find_common_ancestors(
        &self,
        source: &ObjectId,
        targets: &HashSet<&ObjectId>,
    ) -> HashMap<ObjectId, VisitState> {
        if targets.contains(source) {
            return HashMap::from([(source.clone(), VisitState::RESULT)]);
        }

        let mut states = HashMap::<ObjectId, VisitState>::new();
        let mut queue = BinaryHeap::new();

        states.insert(source.clone(), VisitState::VISITED_FROM_SOURCE);
        queue.push(self.priority(source));

        for &target in targets {
            states.insert(target.clone(), VisitState::VISITED_FROM_TARGET);
            queue.push(self.priority(target));
        }

        while let Some((_, oid)) = queue.pop() {
            let current_state = states.get(&oid).copied().unwrap_or(VisitState::NONE);

            debug_log!("Processing commit {}: state={}", oid, current_state);

            if current_state.contains(VisitState::STALE) {
                continue;
            }

            let is_common_ancestor = current_state.contains(VisitState::VISITED_FROM_BOTH);
            if is_common_ancestor {
                states
                    .entry(oid.clone())
                    .and_modify(|state| *state |= VisitState::RESULT);
            }

            for parent in self.ancestry.parents(&oid) {
                let parent_state = states.get(parent).copied().unwrap_or(VisitState::NONE);

                let mut new_state = parent_state | current_state;
                if is_common_ancestor {
                    new_state |= VisitState::STALE;
                }

                if !parent_state.contains(new_state) {
                    states.insert(parent.clone(), new_state);
                    queue.push(self.priority(parent));
                }
            }
        }

        states
            .into_iter()
            .filter(|(_, state)| {
                !state.contains(VisitState::STALE) && state.contains(VisitState::RESULT)
            })
            .collect()
    }

    /// Every best common ancestor of the two commits
    pub fn find_best_common_ancestors(&self, source: &ObjectId, target: &ObjectId) -> Vec<ObjectId> {
        let common_ancestors = self
            .find_common_ancestors(source, &HashSet::from([target]))
            .into_keys()
            .collect::<HashSet<_>>();

        let mut redundant = HashSet::<ObjectId>::new();
        for commit in &common_ancestors {
            if redundant.contains(commit) {
                continue;
            }

            let others = common_ancestors
                .iter()
                .filter(|other| *other != commit && !redundant.contains(*other))
                .collect::<HashSet<_>>();
            if others.is_empty() {
                continue;
            }

            if others
                .iter()
                .any(|other| self.ancestry.is_ancestor(commit, other))
            {
                redundant.insert(commit.clone());
            }
        }

        debug_log!("Redundant ancestors: {:?}", redundant);

        let mut best = common_ancestors
            .into_iter()
            .filter(|commit| !redundant.contains(commit))
            .collect::<Vec<_>>();
        best.sort_by_key(|oid| std::cmp::Reverse(self.priority(oid)));

        best
    }

    /// One best common ancestor, `None` for unrelated histories
    pub fn find_best_common_ancestor(&self, source: &ObjectId, target: &ObjectId) -> Option<ObjectId> {
        self.find_best_common_ancestors(source, target)
            .into_iter()
            .next()
    }
}
