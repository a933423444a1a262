use crate::areas::errors::RepositoryResult;
use crate::areas::events::Operation;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Provenance;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Record a new commit on top of the current tip
    ///
    /// The first commit is a root commit. On an attached HEAD the branch
    /// advances; on a detached HEAD only HEAD moves, leaving the new commit
    /// unreferenced by any branch.
    pub fn commit(&mut self, message: &str) -> RepositoryResult<ObjectId> {
        let message = message.trim().to_string();

        self.transact(Operation::Commit, |state| {
            let parents = state.current_tip().into_iter().collect();
            let commit_id = state.write_commit(parents, message, Provenance::Original);
            state.refs.update_head(commit_id.clone());

            debug_log!("[{}] committed on {}", commit_id.to_short_oid(), state.refs.head());

            Ok(commit_id)
        })
    }
}
