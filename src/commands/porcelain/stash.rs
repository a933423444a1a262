use crate::areas::errors::{RepositoryError, RepositoryResult};
use crate::areas::events::Operation;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Push the current tip onto the stash as `stash@{0}`, returning the new
    /// stash depth
    pub fn stash(&mut self) -> RepositoryResult<usize> {
        self.transact(Operation::Stash, |state| {
            let tip = state.require_tip()?;
            Ok(state.stash.push(tip))
        })
    }

    /// Pop the most recent stash entry; HEAD does not move
    pub fn stash_pop(&mut self) -> RepositoryResult<ObjectId> {
        self.transact(Operation::StashPop, |state| {
            state.stash.pop().ok_or(RepositoryError::EmptyStash)
        })
    }
}
