use crate::areas::errors::{RepositoryError, RepositoryResult};
use crate::areas::events::Operation;
use crate::areas::repository::{Repository, RepositoryState};
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Create a branch at the current tip without moving HEAD
    pub fn create_branch(&mut self, branch_name: &str) -> RepositoryResult<BranchName> {
        self.transact(Operation::Branch, |state| {
            let branch_name = Self::new_branch_name(state, branch_name)?;
            let source_oid = state.require_tip()?;

            state.refs.create_branch(branch_name.clone(), source_oid);

            Ok(branch_name)
        })
    }

    /// Validate a name for a branch that must not exist yet
    pub(crate) fn new_branch_name(
        state: &RepositoryState,
        branch_name: &str,
    ) -> RepositoryResult<BranchName> {
        let branch_name = RepositoryState::parse_branch_name(branch_name)?;

        if state.refs.has_branch(&branch_name) {
            return Err(RepositoryError::BranchExists(branch_name));
        }

        Ok(branch_name)
    }
}
