//! Ancestry queries over the commit DAG
//!
//! All walks follow every parent edge, not only the first-parent chain, and
//! keep a visited set because merges turn the history into diamonds.
//!
//! The walker is backed by a commit loader closure, so it runs the same way
//! over the live commit table and over a detached snapshot:
//!
//! ```rust,ignore
//! let ancestry = Ancestry::new(|oid| database.slim_commit(oid));
//! let fast_forward = ancestry.is_ancestor(&current_tip, &source_tip);
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

pub struct Ancestry<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<SlimCommit<'c>>,
{
    commit_loader: CommitLoaderFn,
    /// Memoized generation numbers (0 for roots)
    generations: RefCell<HashMap<ObjectId, usize>>,
}

impl<'c, CommitLoaderFn> Ancestry<'c, CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> Option<SlimCommit<'c>>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self {
            commit_loader,
            generations: RefCell::new(HashMap::new()),
        }
    }

    pub fn load(&self, oid: &ObjectId) -> Option<SlimCommit<'c>> {
        (self.commit_loader)(oid)
    }

    /// Parents of a commit; unknown commits have none
    pub fn parents(&self, oid: &ObjectId) -> &'c [ObjectId] {
        self.load(oid).map(|commit| commit.parents).unwrap_or(&[])
    }

    /// Every commit reachable from `tip`, `tip` included
    pub fn all_ancestors(&self, tip: &ObjectId) -> HashSet<ObjectId> {
        let mut visited = HashSet::from([tip.clone()]);
        let mut queue = VecDeque::from([tip.clone()]);

        while let Some(oid) = queue.pop_front() {
            for parent in self.parents(&oid) {
                if visited.insert(parent.clone()) {
                    queue.push_back(parent.clone());
                }
            }
        }

        visited
    }

    /// Whether `ancestor` is reachable from `descendant` through parent edges
    ///
    /// A commit counts as its own ancestor.
    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> bool {
        if ancestor == descendant {
            return true;
        }

        let ancestor_generation = self.generation(ancestor);
        let mut visited = HashSet::from([descendant.clone()]);
        let mut queue = VecDeque::from([descendant.clone()]);

        while let Some(oid) = queue.pop_front() {
            for parent in self.parents(&oid) {
                if parent == ancestor {
                    return true;
                }
                // nothing below the ancestor's generation can lead back up to it
                if self.generation(parent) > ancestor_generation && visited.insert(parent.clone()) {
                    queue.push_back(parent.clone());
                }
            }
        }

        false
    }

    /// Commits reachable from `tip` but not in `exclude`, oldest first
    ///
    /// The walk stops at the `exclude` boundary, so ancestors of excluded
    /// commits are never entered. The result lists every commit after all of
    /// its parents; on a linear segment that is plain chronological order.
    pub fn commits_since(&self, tip: &ObjectId, exclude: &HashSet<ObjectId>) -> Vec<ObjectId> {
        let mut ordered = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![(tip.clone(), false)];

        while let Some((oid, expanded)) = stack.pop() {
            if expanded {
                ordered.push(oid);
                continue;
            }
            if exclude.contains(&oid) || !visited.insert(oid.clone()) {
                continue;
            }

            stack.push((oid.clone(), true));
            // reversed so the first parent is expanded first
            for parent in self.parents(&oid).iter().rev() {
                if !exclude.contains(parent) && !visited.contains(parent) {
                    stack.push((parent.clone(), false));
                }
            }
        }

        ordered
    }

    /// Walk `steps` first parents back from `tip`
    ///
    /// Returns `None` when the walk runs past a root commit.
    pub fn nth_first_parent(&self, tip: &ObjectId, steps: usize) -> Option<ObjectId> {
        let mut current = tip.clone();
        for _ in 0..steps {
            current = self.parents(&current).first()?.clone();
        }

        Some(current)
    }

    /// Generation number: 0 for roots, otherwise one more than the highest
    /// parent generation
    ///
    /// Every commit has a strictly higher generation than all its ancestors.
    pub fn generation(&self, oid: &ObjectId) -> usize {
        if let Some(generation) = self.generations.borrow().get(oid) {
            return *generation;
        }

        let mut stack = vec![oid.clone()];
        while let Some(current) = stack.last().cloned() {
            if self.generations.borrow().contains_key(&current) {
                stack.pop();
                continue;
            }

            let parents = self.parents(&current);
            let pending = parents
                .iter()
                .filter(|parent| !self.generations.borrow().contains_key(*parent))
                .cloned()
                .collect::<Vec<_>>();

            if pending.is_empty() {
                let generation = {
                    let generations = self.generations.borrow();
                    parents
                        .iter()
                        .filter_map(|parent| generations.get(parent))
                        .map(|generation| generation + 1)
                        .max()
                        .unwrap_or(0)
                };
                self.generations.borrow_mut().insert(current, generation);
                stack.pop();
            } else {
                stack.extend(pending);
            }
        }

        self.generations.borrow().get(oid).copied().unwrap_or(0)
    }
}
