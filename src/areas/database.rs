//! Commit table
//!
//! The database owns every commit ever created in the repository, keyed by
//! id. Nothing is ever removed: commits abandoned by `reset`, `rebase` or a
//! detached checkout stay in the table, unreferenced.

use crate::areas::errors::{RepositoryError, RepositoryResult};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;
use std::ops::Bound;

#[derive(Debug, Clone, Default)]
pub struct Database {
    commits: BTreeMap<ObjectId, Commit>,
    /// Monotonic counter mixed into generated ids
    nonce: u64,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw an id that is not used by any stored commit
    pub fn generate_id(&mut self) -> ObjectId {
        loop {
            self.nonce += 1;
            let oid = ObjectId::generate(self.nonce);
            if !self.commits.contains_key(&oid) {
                return oid;
            }
        }
    }

    pub fn store(&mut self, commit: Commit) -> ObjectId {
        let oid = commit.id().clone();
        self.commits.insert(oid.clone(), commit);
        oid
    }

    pub fn load(&self, oid: &ObjectId) -> Option<&Commit> {
        self.commits.get(oid)
    }

    pub fn slim_commit(&self, oid: &ObjectId) -> Option<SlimCommit<'_>> {
        self.commits.get(oid).map(Commit::as_slim)
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.commits.contains_key(oid)
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn commits(&self) -> impl Iterator<Item = (&ObjectId, &Commit)> {
        self.commits.iter()
    }

    pub fn to_map(&self) -> BTreeMap<ObjectId, Commit> {
        self.commits.clone()
    }

    /// Find all commits whose id starts with the given prefix
    ///
    /// Ids are kept in a sorted map, so the matches form one contiguous run
    /// starting at the first key not smaller than the prefix.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> Vec<ObjectId> {
        let prefix = prefix.to_ascii_lowercase();

        self.commits
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .take_while(|(oid, _)| oid.has_prefix(&prefix))
            .map(|(oid, _)| oid.clone())
            .collect()
    }

    /// Resolve a full id or an unambiguous abbreviation
    ///
    /// Zero matches and multiple matches are both failures.
    pub fn resolve_prefix(&self, candidate: &str, min_prefix_len: usize) -> RepositoryResult<ObjectId> {
        if !ObjectId::looks_like_oid(candidate, min_prefix_len.min(OBJECT_ID_LENGTH)) {
            return Err(RepositoryError::UnknownRevision(candidate.to_string()));
        }

        let mut matches = self.find_objects_by_prefix(candidate);
        match matches.len() {
            0 => Err(RepositoryError::UnknownRevision(candidate.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(RepositoryError::AmbiguousRevision {
                prefix: candidate.to_string(),
                candidates: matches,
            }),
        }
    }
}
