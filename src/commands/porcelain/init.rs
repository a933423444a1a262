use crate::areas::errors::RepositoryResult;
use crate::areas::repository::{Repository, RepositoryState};

/// What `init` found before creating the fresh repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    /// An existing repository was replaced; its history is gone
    Reinitialized { discarded_commits: usize },
}

impl Repository {
    /// Create an empty repository: one unborn default branch with HEAD
    /// attached to it, no tags, no remote-tracking refs, an empty stash
    ///
    /// Running it again throws the whole previous state away.
    pub fn init(&mut self) -> RepositoryResult<InitOutcome> {
        let outcome = match self.state() {
            Ok(previous) => InitOutcome::Reinitialized {
                discarded_commits: previous.database().len(),
            },
            Err(_) => InitOutcome::Created,
        };

        self.install(RepositoryState::new(self.config()))?;

        Ok(outcome)
    }
}
