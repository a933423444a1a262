use crate::areas::errors::RepositoryResult;
use crate::areas::events::Operation;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Point the current branch at another commit
    ///
    /// Accepts `HEAD`, `HEAD~N`, `<rev>^`, branch and tag names, ids and id
    /// prefixes. Reachability from the old tip is not checked, and no commit
    /// is created or removed.
    pub fn reset_hard(&mut self, target: &str) -> RepositoryResult<ObjectId> {
        self.transact(Operation::Reset, |state| {
            let branch = state.attached_branch("reset")?;
            let oid = Revision::try_parse(target)?.resolve(state)?;

            state.refs.update_ref(&branch, oid.clone());

            Ok(oid)
        })
    }
}
