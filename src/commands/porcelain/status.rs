use crate::areas::errors::RepositoryResult;
use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;

impl Repository {
    pub fn status(&self) -> RepositoryResult<StatusInfo> {
        Ok(StatusInfo::collect(self.state()?))
    }
}
