use crate::areas::errors::{RepositoryError, RepositoryResult};
use crate::areas::events::Operation;
use crate::areas::repository::{Repository, RepositoryState};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::graph::ancestry::Ancestry;
use crate::artifacts::graph::bca_finder::BCAFinder;
use crate::artifacts::objects::commit::Provenance;
use crate::artifacts::objects::object_id::ObjectId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The source tip is already part of the current history
    UpToDate,
    /// The current branch moved to the source tip, no commit was created
    FastForward { tip: ObjectId },
    /// A two-parent merge commit was created
    Merge {
        id: ObjectId,
        /// Best common ancestor of the two tips
        base: Option<ObjectId>,
    },
}

/// The current branch and tip plus the source tip, checked for a merge or rebase
pub(crate) struct Integration {
    pub(crate) current_branch: BranchName,
    pub(crate) current_tip: ObjectId,
    pub(crate) source_branch: BranchName,
    pub(crate) source_tip: ObjectId,
}

impl Integration {
    /// Preconditions shared by merge and rebase, in the order they are reported:
    /// attached HEAD, a different branch, a source with commits, a current
    /// branch with commits
    pub(crate) fn prepare(
        state: &RepositoryState,
        operation: &'static str,
        source: &str,
    ) -> RepositoryResult<Self> {
        let current_branch = state.attached_branch(operation)?;
        if current_branch.as_ref() == source {
            return Err(RepositoryError::SelfReference {
                operation,
                branch: current_branch,
            });
        }

        let source_branch = state.existing_branch(source)?;
        let source_tip = state.branch_tip(&source_branch)?;
        let current_tip = state.require_tip()?;

        Ok(Integration {
            current_branch,
            current_tip,
            source_branch,
            source_tip,
        })
    }
}

impl Repository {
    /// Merge another branch into the current one
    ///
    /// Up to date when the source tip is reachable from the current tip,
    /// fast-forward when the current tip is reachable from the source tip,
    /// otherwise a merge commit with parents `[current, source]`.
    pub fn merge(&mut self, source: &str) -> RepositoryResult<MergeOutcome> {
        self.transact(Operation::Merge, |state| {
            let Integration {
                current_branch,
                current_tip,
                source_branch,
                source_tip,
            } = Integration::prepare(state, "merge", source)?;

            let (up_to_date, fast_forward, base) = {
                let ancestry = Ancestry::new(|oid| state.database.slim_commit(oid));
                let up_to_date = ancestry.is_ancestor(&source_tip, &current_tip);
                let fast_forward = ancestry.is_ancestor(&current_tip, &source_tip);
                let base = BCAFinder::new(|oid| state.database.slim_commit(oid))
                    .find_best_common_ancestor(&current_tip, &source_tip);
                (up_to_date, fast_forward, base)
            };

            if up_to_date {
                return Ok(MergeOutcome::UpToDate);
            }

            if fast_forward {
                debug_log!("Fast-forward {} to {}", current_branch, source_tip);
                state.refs.update_ref(&current_branch, source_tip.clone());
                return Ok(MergeOutcome::FastForward { tip: source_tip });
            }

            let message = format!("Merge branch '{}' into {}", source_branch, current_branch);
            let id = state.write_commit(vec![current_tip, source_tip], message, Provenance::Merge);
            state.refs.update_ref(&current_branch, id.clone());

            Ok(MergeOutcome::Merge { id, base })
        })
    }
}
