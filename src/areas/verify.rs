//! Repository consistency verification
//!
//! Run on the live state before and on the draft state after every mutating
//! operation.
//!
//! # Invariants
//!
//! - HEAD resolves: an attached branch exists, a detached id is a commit
//! - Every branch with a target points at a stored commit
//! - Every parent of every commit is a stored commit
//! - Tags, remote-tracking refs and stash entries point at stored commits
//! - At most one branch is unborn, and only while there are no commits
//!
//! Verification never mutates the repository.

use crate::areas::errors::ConsistencyError;
use crate::areas::refs::Head;
use crate::areas::repository::RepositoryState;

impl RepositoryState {
    pub fn verify(&self) -> Result<(), ConsistencyError> {
        self.verify_head()?;
        self.verify_commits()?;
        self.verify_branches()?;
        self.verify_pointers()?;

        Ok(())
    }

    fn verify_head(&self) -> Result<(), ConsistencyError> {
        match self.refs.head() {
            Head::Attached(branch) if !self.refs.has_branch(branch) => {
                Err(ConsistencyError::HeadBranchMissing(branch.clone()))
            }
            Head::Detached(oid) if !self.database.contains(oid) => {
                Err(ConsistencyError::HeadCommitMissing(oid.clone()))
            }
            _ => Ok(()),
        }
    }

    fn verify_commits(&self) -> Result<(), ConsistencyError> {
        for (key, commit) in self.database.commits() {
            if key != commit.id() {
                return Err(ConsistencyError::MismatchedKey {
                    key: key.clone(),
                    oid: commit.id().clone(),
                });
            }

            if let Some(parent) = commit
                .parents()
                .iter()
                .find(|parent| !self.database.contains(parent))
            {
                return Err(ConsistencyError::DanglingParent {
                    commit: key.clone(),
                    parent: parent.clone(),
                });
            }
        }

        Ok(())
    }

    fn verify_branches(&self) -> Result<(), ConsistencyError> {
        let mut unborn = Vec::new();

        for (branch, target) in self.refs.branches() {
            match target {
                Some(oid) if !self.database.contains(oid) => {
                    return Err(ConsistencyError::DanglingBranch {
                        branch: branch.clone(),
                        oid: oid.clone(),
                    });
                }
                Some(_) => {}
                None => unborn.push(branch.clone()),
            }
        }

        match unborn.len() {
            0 => Ok(()),
            1 if self.database.is_empty() => Ok(()),
            1 => Err(ConsistencyError::UnbornBranch(unborn.remove(0))),
            _ => Err(ConsistencyError::MultipleUnbornBranches(unborn)),
        }
    }

    fn verify_pointers(&self) -> Result<(), ConsistencyError> {
        for (tag, oid) in self.refs.tags() {
            if !self.database.contains(oid) {
                return Err(ConsistencyError::DanglingTag {
                    tag: tag.clone(),
                    oid: oid.clone(),
                });
            }
        }

        for (remote, oid) in self.refs.remotes() {
            if !self.database.contains(oid) {
                return Err(ConsistencyError::DanglingRemote {
                    remote: remote.clone(),
                    oid: oid.clone(),
                });
            }
        }

        for (index, oid) in self.stash.positions() {
            if !self.database.contains(oid) {
                return Err(ConsistencyError::DanglingStash {
                    index,
                    oid: oid.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::config::RepositoryConfig;
    use crate::artifacts::branch::branch_name::BranchName;
    use crate::artifacts::objects::commit::{Commit, Provenance};
    use crate::artifacts::objects::object_id::ObjectId;
    use rstest::{fixture, rstest};

    #[fixture]
    fn state() -> RepositoryState {
        RepositoryState::new(&RepositoryConfig::default())
    }

    fn name(s: &str) -> BranchName {
        BranchName::try_parse(s.to_string()).unwrap()
    }

    #[rstest]
    fn fresh_state_is_consistent(state: RepositoryState) {
        assert_eq!(state.verify(), Ok(()));
    }

    #[rstest]
    fn dangling_parent_is_detected(mut state: RepositoryState) {
        let missing = ObjectId::generate(99);
        let id = state.database.generate_id();
        state.database.store(Commit::new(
            id.clone(),
            vec![missing.clone()],
            "orphan parent".to_string(),
            None,
            Provenance::Original,
        ));
        state.refs.update_head(id.clone());

        assert_eq!(
            state.verify(),
            Err(ConsistencyError::DanglingParent {
                commit: id,
                parent: missing
            })
        );
    }

    #[rstest]
    fn dangling_branch_is_detected(mut state: RepositoryState) {
        let missing = ObjectId::generate(7);
        state.refs.update_head(missing.clone());

        assert_eq!(
            state.verify(),
            Err(ConsistencyError::DanglingBranch {
                branch: name("master"),
                oid: missing
            })
        );
    }

    #[rstest]
    fn detached_head_at_missing_commit_is_detected(mut state: RepositoryState) {
        let missing = ObjectId::generate(3);
        state.refs.set_head(Head::Detached(missing.clone()));

        assert_eq!(
            state.verify(),
            Err(ConsistencyError::HeadCommitMissing(missing))
        );
    }

    #[rstest]
    fn head_on_missing_branch_is_detected(mut state: RepositoryState) {
        state.refs.set_head(Head::Attached(name("ghost")));

        assert_eq!(
            state.verify(),
            Err(ConsistencyError::HeadBranchMissing(name("ghost")))
        );
    }

    #[rstest]
    fn unborn_branch_after_first_commit_is_detected(mut state: RepositoryState) {
        let id = state.database.generate_id();
        state.database.store(Commit::new(
            id.clone(),
            vec![],
            "root".to_string(),
            None,
            Provenance::Original,
        ));
        state.refs.set_head(Head::Detached(id));

        assert_eq!(
            state.verify(),
            Err(ConsistencyError::UnbornBranch(name("master")))
        );
    }
}
