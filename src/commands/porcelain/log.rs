use crate::areas::errors::RepositoryResult;
use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashMap;

impl Repository {
    /// Up to `limit` commits reachable from the current tip, breadth first
    /// across all parents
    ///
    /// The order is visitation order, not strict chronological order. An
    /// unborn branch yields an empty log.
    pub fn log(&self, limit: usize) -> RepositoryResult<Vec<Commit>> {
        let state = self.state()?;

        Ok(RevList::new(state.database(), state.current_tip())
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    /// Ref labels for every referenced commit (`HEAD -> master`, `tag: v1`, ...)
    pub fn decorations(&self) -> RepositoryResult<HashMap<ObjectId, Vec<String>>> {
        Ok(self.state()?.refs().reverse_refs())
    }
}
