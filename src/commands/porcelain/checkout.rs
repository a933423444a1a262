use crate::areas::errors::RepositoryResult;
use crate::areas::events::Operation;
use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// HEAD is now attached to the branch
    Branch(BranchName),
    /// HEAD is now detached at the commit
    Detached(ObjectId),
}

impl fmt::Display for CheckoutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutOutcome::Branch(branch) => write!(f, "Switched to branch '{}'", branch),
            CheckoutOutcome::Detached(oid) => write!(f, "HEAD is now at {}", oid.to_short_oid()),
        }
    }
}

impl Repository {
    /// Attach HEAD to a branch, or detach it at a commit
    ///
    /// Branch names win over commit ids; anything else must be a full id or
    /// an unambiguous prefix of one.
    pub fn checkout(&mut self, target: &str) -> RepositoryResult<CheckoutOutcome> {
        self.transact(Operation::Checkout, |state| {
            if let Ok(branch) = state.existing_branch(target) {
                state.refs.set_head(Head::Attached(branch.clone()));
                return Ok(CheckoutOutcome::Branch(branch));
            }

            let oid = state.resolve_commit(target)?;
            state.refs.set_head(Head::Detached(oid.clone()));

            Ok(CheckoutOutcome::Detached(oid))
        })
    }

    /// Create a branch at the current tip and attach HEAD to it in one step
    pub fn checkout_new_branch(&mut self, branch_name: &str) -> RepositoryResult<BranchName> {
        self.transact(Operation::Checkout, |state| {
            let branch_name = Self::new_branch_name(state, branch_name)?;
            let source_oid = state.require_tip()?;

            state.refs.create_branch(branch_name.clone(), source_oid);
            state.refs.set_head(Head::Attached(branch_name.clone()));

            Ok(branch_name)
        })
    }
}
