use crate::areas::errors::RepositoryResult;
use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::graph::ancestry::Ancestry;
use crate::artifacts::graph::bca_finder::BCAFinder;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Resolve a revision expression (`HEAD~2`, `main^`, `v1`, `a1b2c3d`)
    pub fn resolve(&self, revision: &str) -> RepositoryResult<ObjectId> {
        Revision::try_parse(revision)?.resolve(self.state()?)
    }

    /// Whether the commit `ancestor` resolves to is reachable from `descendant`
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> RepositoryResult<bool> {
        let state = self.state()?;
        let ancestor = Revision::try_parse(ancestor)?.resolve(state)?;
        let descendant = Revision::try_parse(descendant)?.resolve(state)?;

        Ok(Ancestry::new(|oid| state.database().slim_commit(oid)).is_ancestor(&ancestor, &descendant))
    }

    /// Best common ancestor of two revisions, `None` for unrelated histories
    pub fn merge_base(&self, first: &str, second: &str) -> RepositoryResult<Option<ObjectId>> {
        let state = self.state()?;
        let first = Revision::try_parse(first)?.resolve(state)?;
        let second = Revision::try_parse(second)?.resolve(state)?;

        Ok(BCAFinder::new(|oid| state.database().slim_commit(oid))
            .find_best_common_ancestor(&first, &second))
    }
}
