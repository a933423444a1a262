use crate::areas::refs::Head;
use crate::areas::repository::RepositoryState;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use serde::Serialize;

const LABEL_WIDTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub head: Head,
    pub tip: Option<ObjectId>,
    pub branches: Vec<BranchName>,
    pub stash_depth: usize,
}

impl StatusInfo {
    pub fn collect(state: &RepositoryState) -> Self {
        StatusInfo {
            head: state.refs.head().clone(),
            tip: state.current_tip(),
            branches: state.refs.list_branches(),
            stash_depth: state.stash.depth(),
        }
    }

    pub fn is_detached(&self) -> bool {
        self.head.is_detached()
    }

    fn label(name: &str) -> String {
        format!("{:<width$}", name, width = LABEL_WIDTH)
    }
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.head {
            Head::Attached(branch) => {
                writeln!(f, "On branch {}", branch.to_string().green().bold())?
            }
            Head::Detached(oid) => writeln!(
                f,
                "{} {}",
                "HEAD detached at".red(),
                oid.to_short_oid().yellow()
            )?,
        }

        match &self.tip {
            Some(tip) => writeln!(f, "{}{}", Self::label("tip:"), tip.to_short_oid().yellow())?,
            None => writeln!(f, "{}(no commits yet)", Self::label("tip:"))?,
        }

        let branches = self
            .branches
            .iter()
            .map(|branch| {
                if self.head.branch() == Some(branch) {
                    format!("* {}", branch).green().to_string()
                } else {
                    branch.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "{}{}", Self::label("branches:"), branches)?;

        write!(f, "{}{}", Self::label("stash:"), self.stash_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::config::RepositoryConfig;
    use crate::artifacts::objects::commit::Provenance;

    #[test]
    fn fresh_repository_has_no_tip() {
        colored::control::set_override(false);
        let state = RepositoryState::new(&RepositoryConfig::default());

        let status = StatusInfo::collect(&state);

        assert!(!status.is_detached());
        assert_eq!(status.tip, None);
        assert_eq!(status.stash_depth, 0);
        assert_eq!(
            status.to_string(),
            "On branch master\ntip:      (no commits yet)\nbranches: * master\nstash:    0"
        );
    }

    #[test]
    fn detached_head_is_reported() {
        let mut state = RepositoryState::new(&RepositoryConfig::default());
        let oid = state.write_commit(vec![], "root".to_string(), Provenance::Original);
        state.refs.update_head(oid.clone());
        state.refs.set_head(Head::Detached(oid.clone()));

        let status = StatusInfo::collect(&state);

        assert!(status.is_detached());
        assert_eq!(status.tip, Some(oid));
    }
}
