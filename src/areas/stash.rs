//! Stash stack
//!
//! A stash entry only bookmarks a commit id. No content is captured.
//! Entries are numbered from the top, so the newest one is always
//! `stash@{0}`.

use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone, Default)]
pub struct Stash {
    entries: Vec<ObjectId>,
}

impl Stash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an entry on top, returning the new depth
    pub fn push(&mut self, oid: ObjectId) -> usize {
        self.entries.push(oid);
        self.entries.len()
    }

    pub fn pop(&mut self) -> Option<ObjectId> {
        self.entries.pop()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from the top (most recent) down
    pub fn list(&self) -> Vec<ObjectId> {
        self.entries.iter().rev().cloned().collect()
    }

    /// Entries paired with their `stash@{n}` position, top first
    pub fn positions(&self) -> impl Iterator<Item = (usize, &ObjectId)> {
        self.entries.iter().rev().enumerate()
    }
}
