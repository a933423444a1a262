use crate::areas::errors::RepositoryResult;
use crate::areas::events::Operation;
use crate::areas::repository::{Repository, RepositoryState};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushOutcome {
    pub branch: BranchName,
    pub id: ObjectId,
    /// No remote-tracking ref existed for the branch before
    pub is_new: bool,
    /// The remote-tracking ref already pointed at the local tip
    pub was_up_to_date: bool,
}

impl RepositoryState {
    /// The branch named explicitly, or else the one HEAD is attached to
    pub(crate) fn remote_branch(
        &self,
        operation: &'static str,
        branch_name: Option<&str>,
    ) -> RepositoryResult<BranchName> {
        match branch_name {
            Some(branch_name) => self.existing_branch(branch_name),
            None => self.attached_branch(operation),
        }
    }
}

impl Repository {
    /// Record the local tip of a branch as its remote-tracking tip
    pub fn push(&mut self, branch_name: Option<&str>) -> RepositoryResult<PushOutcome> {
        self.transact(Operation::Push, |state| {
            let branch = state.remote_branch("push without a branch name", branch_name)?;
            let id = state.branch_tip(&branch)?;

            let previous = state.refs.update_remote(branch.clone(), id.clone());

            Ok(PushOutcome {
                is_new: previous.is_none(),
                was_up_to_date: previous.as_ref() == Some(&id),
                branch,
                id,
            })
        })
    }
}
