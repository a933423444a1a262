use crate::areas::errors::{RepositoryError, RepositoryResult};
use crate::areas::events::Operation;
use crate::areas::repository::{Repository, RepositoryState};
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    /// Create an immutable tag at `target`, or at the current tip
    pub fn tag(&mut self, name: &str, target: Option<&str>) -> RepositoryResult<ObjectId> {
        self.transact(Operation::Tag, |state| {
            let tag_name = RepositoryState::parse_branch_name(name)?;
            if state.refs.read_tag(&tag_name).is_some() {
                return Err(RepositoryError::TagExists(tag_name));
            }

            let oid = match target {
                Some(target) => Revision::try_parse(target)?.resolve(state)?,
                None => state.require_tip()?,
            };
            state.refs.create_tag(tag_name, oid.clone());

            Ok(oid)
        })
    }
}
