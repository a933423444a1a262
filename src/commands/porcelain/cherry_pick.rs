use crate::areas::errors::{RepositoryError, RepositoryResult};
use crate::areas::events::Operation;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Provenance;
use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CherryPickOutcome {
    pub new_id: ObjectId,
    pub original_id: ObjectId,
    pub message: String,
}

impl Repository {
    /// Copy one commit onto the current tip
    ///
    /// The source is looked up by full id or unambiguous prefix. The copy
    /// advances HEAD exactly as `commit` would.
    pub fn cherry_pick(&mut self, id_or_prefix: &str) -> RepositoryResult<CherryPickOutcome> {
        self.transact(Operation::CherryPick, |state| {
            let original_id = state.resolve_commit(id_or_prefix)?;
            let message = state
                .database
                .load(&original_id)
                .map(|commit| commit.message().to_string())
                .ok_or_else(|| RepositoryError::UnknownRevision(id_or_prefix.to_string()))?;
            let tip = state.require_tip()?;

            let new_id = state.write_commit(
                vec![tip],
                message.clone(),
                Provenance::CherryPicked {
                    original_id: original_id.clone(),
                },
            );
            state.refs.update_head(new_id.clone());

            Ok(CherryPickOutcome {
                new_id,
                original_id,
                message,
            })
        })
    }
}
