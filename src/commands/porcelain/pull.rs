use crate::areas::errors::{RepositoryError, RepositoryResult};
use crate::areas::events::Operation;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    UpToDate { id: ObjectId },
    FastForward { id: ObjectId },
}

impl PullOutcome {
    pub fn id(&self) -> &ObjectId {
        match self {
            PullOutcome::UpToDate { id } | PullOutcome::FastForward { id } => id,
        }
    }
}

impl Repository {
    /// Move a local branch to its remote-tracking tip
    ///
    /// The local branch is aligned with the remote tip whether or not it is
    /// a descendant of the local tip.
    pub fn pull(&mut self, branch_name: Option<&str>) -> RepositoryResult<PullOutcome> {
        self.transact(Operation::Pull, |state| {
            let branch = state.remote_branch("pull without a branch name", branch_name)?;
            let local = state.branch_tip(&branch)?;
            let remote = state
                .refs
                .read_remote(&branch)
                .cloned()
                .ok_or_else(|| RepositoryError::NoTrackingRef(branch.clone()))?;

            if remote == local {
                return Ok(PullOutcome::UpToDate { id: remote });
            }

            state.refs.update_ref(&branch, remote.clone());

            Ok(PullOutcome::FastForward { id: remote })
        })
    }
}
