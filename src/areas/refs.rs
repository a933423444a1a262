//! References (branches, tags, remote-tracking refs, HEAD)
//!
//! References are human-readable names pointing to commits:
//!
//! - Branches: mutable pointers advanced by commits, merges and rebases. The
//!   branch created by `init` has no target until the first commit.
//! - Tags: created once, never moved.
//! - Remote-tracking refs: the tip recorded by the last `push` of a branch,
//!   independent of the local branch.
//! - HEAD: either attached to a branch or detached at a commit.

use crate::artifacts::branch::HEAD_REF_NAME;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Current checkout position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "target", rename_all = "kebab-case")]
pub enum Head {
    /// Commits advance the named branch
    Attached(BranchName),
    /// Commits advance HEAD itself
    Detached(ObjectId),
}

impl Head {
    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }

    pub fn branch(&self) -> Option<&BranchName> {
        match self {
            Head::Attached(branch) => Some(branch),
            Head::Detached(_) => None,
        }
    }
}

impl std::fmt::Display for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Head::Attached(branch) => write!(f, "{}", branch),
            Head::Detached(oid) => write!(f, "{} (detached at {})", HEAD_REF_NAME, oid.to_short_oid()),
        }
    }
}

/// Reference tables manager
#[derive(Debug, Clone)]
pub struct Refs {
    branches: BTreeMap<BranchName, Option<ObjectId>>,
    tags: BTreeMap<BranchName, ObjectId>,
    remotes: BTreeMap<BranchName, ObjectId>,
    head: Head,
}

impl Refs {
    /// Fresh tables: one unborn default branch with HEAD attached to it
    pub fn new(default_branch: BranchName) -> Self {
        Refs {
            branches: BTreeMap::from([(default_branch.clone(), None)]),
            tags: BTreeMap::new(),
            remotes: BTreeMap::new(),
            head: Head::Attached(default_branch),
        }
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn set_head(&mut self, head: Head) {
        self.head = head;
    }

    /// The commit HEAD resolves to, `None` on an unborn branch
    pub fn read_head(&self) -> Option<ObjectId> {
        match &self.head {
            Head::Attached(branch) => self.read_ref(branch),
            Head::Detached(oid) => Some(oid.clone()),
        }
    }

    /// Advance whatever HEAD points at to `oid`
    ///
    /// Attached: moves the branch. Detached: moves HEAD itself.
    pub fn update_head(&mut self, oid: ObjectId) {
        match &self.head {
            Head::Attached(branch) => {
                self.branches.insert(branch.clone(), Some(oid));
            }
            Head::Detached(_) => self.head = Head::Detached(oid),
        }
    }

    pub fn current_branch(&self) -> Option<&BranchName> {
        self.head.branch()
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> bool {
        self.current_branch() == Some(branch_name)
    }

    pub fn has_branch(&self, branch_name: &BranchName) -> bool {
        self.branches.contains_key(branch_name)
    }

    /// Target of a branch; `None` for a missing or unborn branch
    pub fn read_ref(&self, branch_name: &BranchName) -> Option<ObjectId> {
        self.branches.get(branch_name).cloned().flatten()
    }

    pub fn create_branch(&mut self, name: BranchName, source_oid: ObjectId) {
        self.branches.insert(name, Some(source_oid));
    }

    pub fn update_ref(&mut self, name: &BranchName, oid: ObjectId) {
        self.branches.insert(name.clone(), Some(oid));
    }

    pub fn branches(&self) -> &BTreeMap<BranchName, Option<ObjectId>> {
        &self.branches
    }

    pub fn list_branches(&self) -> Vec<BranchName> {
        self.branches.keys().cloned().collect()
    }

    pub fn read_tag(&self, name: &BranchName) -> Option<&ObjectId> {
        self.tags.get(name)
    }

    pub fn create_tag(&mut self, name: BranchName, oid: ObjectId) {
        self.tags.insert(name, oid);
    }

    pub fn tags(&self) -> &BTreeMap<BranchName, ObjectId> {
        &self.tags
    }

    pub fn read_remote(&self, name: &BranchName) -> Option<&ObjectId> {
        self.remotes.get(name)
    }

    /// Record `oid` as the remote tip of `name`, returning the previous tip
    pub fn update_remote(&mut self, name: BranchName, oid: ObjectId) -> Option<ObjectId> {
        self.remotes.insert(name, oid)
    }

    pub fn remotes(&self) -> &BTreeMap<BranchName, ObjectId> {
        &self.remotes
    }

    /// Map every commit to the names pointing at it, for log decorations
    pub fn reverse_refs(&self) -> HashMap<ObjectId, Vec<String>> {
        let mut reverse_refs = HashMap::<ObjectId, Vec<String>>::new();

        if let Head::Detached(oid) = &self.head {
            reverse_refs
                .entry(oid.clone())
                .or_default()
                .push(HEAD_REF_NAME.to_string());
        }

        for (name, oid) in &self.branches {
            if let Some(oid) = oid {
                let label = if self.is_current_branch(name) {
                    format!("{} -> {}", HEAD_REF_NAME, name)
                } else {
                    name.to_string()
                };
                reverse_refs.entry(oid.clone()).or_default().push(label);
            }
        }

        for (name, oid) in &self.remotes {
            reverse_refs
                .entry(oid.clone())
                .or_default()
                .push(format!("origin/{}", name));
        }

        for (name, oid) in &self.tags {
            reverse_refs
                .entry(oid.clone())
                .or_default()
                .push(format!("tag: {}", name));
        }

        reverse_refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> BranchName {
        BranchName::try_parse(s.to_string()).unwrap()
    }

    #[test]
    fn fresh_refs_have_one_unborn_branch() {
        let refs = Refs::new(name("master"));

        assert_eq!(refs.head(), &Head::Attached(name("master")));
        assert_eq!(refs.read_head(), None);
        assert_eq!(refs.list_branches(), vec![name("master")]);
    }

    #[test]
    fn update_head_moves_branch_when_attached() {
        let mut refs = Refs::new(name("master"));
        let oid = ObjectId::generate(1);

        refs.update_head(oid.clone());

        assert_eq!(refs.read_ref(&name("master")), Some(oid.clone()));
        assert_eq!(refs.read_head(), Some(oid));
    }

    #[test]
    fn update_head_moves_only_head_when_detached() {
        let mut refs = Refs::new(name("master"));
        let first = ObjectId::generate(1);
        let second = ObjectId::generate(2);
        refs.update_head(first.clone());
        refs.set_head(Head::Detached(first.clone()));

        refs.update_head(second.clone());

        assert_eq!(refs.read_ref(&name("master")), Some(first));
        assert_eq!(refs.head(), &Head::Detached(second));
    }

    #[test]
    fn reverse_refs_decorate_current_branch_with_head() {
        let mut refs = Refs::new(name("master"));
        let oid = ObjectId::generate(1);
        refs.update_head(oid.clone());
        refs.create_tag(name("v1"), oid.clone());

        let decorations = refs.reverse_refs();

        assert_eq!(
            decorations.get(&oid),
            Some(&vec!["HEAD -> master".to_string(), "tag: v1".to_string()])
        );
    }
}
