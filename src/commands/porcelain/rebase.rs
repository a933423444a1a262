use crate::areas::errors::RepositoryResult;
use crate::areas::events::Operation;
use crate::areas::repository::Repository;
use crate::artifacts::graph::ancestry::Ancestry;
use crate::artifacts::objects::commit::Provenance;
use crate::artifacts::objects::object_id::ObjectId;
use crate::commands::porcelain::merge::Integration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseOutcome {
    /// Nothing to replay, or the target is already part of the current history
    UpToDate,
    Rebased {
        count: usize,
        tip: ObjectId,
        /// `(original, replayed)` pairs, oldest first
        replayed: Vec<(ObjectId, ObjectId)>,
    },
}

impl Repository {
    /// Replay the commits unique to the current branch on top of another branch
    ///
    /// The unique commits are those reachable from the current tip but not
    /// from the target tip, oldest first. Each one is recreated with the same
    /// message and a single parent, chained from the target tip; the current
    /// branch then moves to the last replayed commit. The originals stay in
    /// the commit table.
    pub fn rebase(&mut self, target: &str) -> RepositoryResult<RebaseOutcome> {
        self.transact(Operation::Rebase, |state| {
            let Integration {
                current_branch,
                current_tip,
                source_tip: target_tip,
                ..
            } = Integration::prepare(state, "rebase", target)?;

            let (already_based, unique) = {
                let ancestry = Ancestry::new(|oid| state.database.slim_commit(oid));
                let new_base = ancestry.all_ancestors(&target_tip);
                (
                    ancestry.is_ancestor(&target_tip, &current_tip),
                    ancestry.commits_since(&current_tip, &new_base),
                )
            };

            if unique.is_empty() || already_based {
                return Ok(RebaseOutcome::UpToDate);
            }

            let mut base = target_tip;
            let mut replayed = Vec::with_capacity(unique.len());
            for original_id in unique {
                let message = state
                    .database
                    .load(&original_id)
                    .map(|commit| commit.message().to_string())
                    .unwrap_or_default();

                debug_log!("Replaying {} onto {}", original_id, base);

                let replayed_id = state.write_commit(
                    vec![base],
                    message,
                    Provenance::Rebased {
                        original_id: original_id.clone(),
                    },
                );
                replayed.push((original_id, replayed_id.clone()));
                base = replayed_id;
            }

            state.refs.update_ref(&current_branch, base.clone());

            Ok(RebaseOutcome::Rebased {
                count: replayed.len(),
                tip: base,
                replayed,
            })
        })
    }
}
