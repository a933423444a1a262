use crate::areas::repository::Repository;
use crate::artifacts::snapshot::RepositorySnapshot;

impl Repository {
    /// Independent deep copy of the whole repository
    ///
    /// Never fails: an uninitialized repository yields an empty snapshot
    /// with `initialized == false`.
    pub fn snapshot(&self) -> RepositorySnapshot {
        match self.state() {
            Ok(state) => RepositorySnapshot::capture(state),
            Err(_) => RepositorySnapshot::uninitialized(),
        }
    }
}
