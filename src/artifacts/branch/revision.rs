use crate::areas::errors::{RepositoryError, RepositoryResult};
use crate::areas::repository::RepositoryState;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, HEAD_REF_NAME, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::graph::ancestry::Ancestry;
use crate::artifacts::objects::object_id::ObjectId;
use std::fmt;

/// Represents a revision specification that can be used to identify commits.
///
/// Supports multiple formats:
/// - `HEAD` and its alias `@`: the current tip
/// - Branch and tag names: `main`, `feature/login`, `v1.0`
/// - Full ids and abbreviated ids of at least 4 hex characters
/// - Parent notation: `<revision>^` (e.g., `main^`, `HEAD^`, `abc123^`)
/// - Ancestor notation: `<revision>~<n>` (e.g., `main~3`, `HEAD~5`)
///
/// # Parsing Strategy
///
/// Id-like strings (e.g., "abc123") are parsed as `Ref` variants. Resolution
/// tries a branch first, then a tag, then a commit id prefix, so a branch
/// named like a hex string shadows the commit it abbreviates.
///
/// Parent and ancestor steps follow the first parent only.
///
/// # Examples
///
/// ```ignore
/// let rev = Revision::try_parse("main~3")?;
/// let oid = rev.resolve(state)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// The commit HEAD resolves to
    Head,
    /// A branch, tag or commit id (prefix), decided during resolution
    Ref(String),
    /// The first parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
    /// The Nth first-parent ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn try_parse(revision: &str) -> RepositoryResult<Revision> {
        if let Some(caps) = regex::Regex::new(PARENT_REGEX)
            .ok()
            .and_then(|re| re.captures(revision))
        {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = regex::Regex::new(ANCESTOR_REGEX)
            .ok()
            .and_then(|re| re.captures(revision))
        {
            let generations = caps[2]
                .parse::<usize>()
                .map_err(|_| RepositoryError::UnknownRevision(revision.to_string()))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            if resolved_name == HEAD_REF_NAME {
                return Ok(Revision::Head);
            }

            // hex ids are valid ref names, so one check covers both
            BranchName::try_parse(resolved_name.to_string())
                .map_err(|e| RepositoryError::InvalidName(e.to_string()))?;
            Ok(Revision::Ref(resolved_name.to_string()))
        }
    }

    pub fn resolve(&self, state: &RepositoryState) -> RepositoryResult<ObjectId> {
        match self {
            Revision::Head => state.require_tip(),
            Revision::Ref(name) => Self::resolve_ref(name, state),
            Revision::Parent(base_revision) => self.walk_back(base_revision, 1, state),
            Revision::Ancestor(base_revision, generations) => {
                self.walk_back(base_revision, *generations, state)
            }
        }
    }

    fn resolve_ref(name: &str, state: &RepositoryState) -> RepositoryResult<ObjectId> {
        if let Ok(branch) = BranchName::try_parse(name.to_string()) {
            if state.refs.has_branch(&branch) {
                return state.branch_tip(&branch);
            }
            if let Some(oid) = state.refs.read_tag(&branch) {
                return Ok(oid.clone());
            }
        }

        state.resolve_commit(name)
    }

    fn walk_back(
        &self,
        base_revision: &Revision,
        steps: usize,
        state: &RepositoryState,
    ) -> RepositoryResult<ObjectId> {
        let base = base_revision.resolve(state)?;
        let ancestry = Ancestry::new(|oid| state.database.slim_commit(oid));

        ancestry
            .nth_first_parent(&base, steps)
            .ok_or_else(|| RepositoryError::PastRoot(self.to_string()))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Head => write!(f, "{}", HEAD_REF_NAME),
            Revision::Ref(name) => write!(f, "{}", name),
            Revision::Parent(base) => write!(f, "{}^", base),
            Revision::Ancestor(base, generations) => write!(f, "{}~{}", base, generations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::config::RepositoryConfig;
    use crate::artifacts::objects::commit::Provenance;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    fn name(s: &str) -> BranchName {
        BranchName::try_parse(s.to_string()).unwrap()
    }

    #[test]
    fn test_parse_simple_ref() {
        assert_eq!(
            Revision::try_parse("main").unwrap(),
            Revision::Ref("main".to_string())
        );
    }

    #[rstest]
    #[case("HEAD")]
    #[case("@")]
    fn test_parse_head_and_alias(#[case] input: &str) {
        assert_eq!(Revision::try_parse(input).unwrap(), Revision::Head);
    }

    #[test]
    fn test_parse_parent() {
        assert_eq!(
            Revision::try_parse("main^").unwrap(),
            Revision::Parent(Box::new(Revision::Ref("main".to_string())))
        );
    }

    #[test]
    fn test_parse_ancestor() {
        assert_eq!(
            Revision::try_parse("HEAD~3").unwrap(),
            Revision::Ancestor(Box::new(Revision::Head), 3)
        );
    }

    #[test]
    fn test_parse_nested_parent() {
        assert_eq!(
            Revision::try_parse("@^^").unwrap(),
            Revision::Parent(Box::new(Revision::Parent(Box::new(Revision::Head))))
        );
    }

    #[rstest]
    #[case("")]
    #[case("invalid name")]
    #[case("invalid:name")]
    #[case(".invalid")]
    #[case("/invalid")]
    #[case("invalid/")]
    #[case("branch.lock")]
    #[case("feature..name")]
    #[case(".invalid^")]
    #[case(".invalid~5")]
    fn test_parse_rejects_invalid_names(#[case] input: &str) {
        assert!(Revision::try_parse(input).is_err());
    }

    #[rstest]
    #[case("main~2")]
    #[case("HEAD^")]
    #[case("abc1234~10")]
    fn display_reproduces_input(#[case] input: &str) {
        assert_eq!(Revision::try_parse(input).unwrap().to_string(), input);
    }

    /// master: A <- B <- C, tag v1 at A, feature at B
    struct History {
        state: RepositoryState,
        a: ObjectId,
        b: ObjectId,
        c: ObjectId,
    }

    #[fixture]
    fn history() -> History {
        let mut state = RepositoryState::new(&RepositoryConfig::default());
        let commit = |state: &mut RepositoryState, message: &str| {
            let parents = state.current_tip().into_iter().collect();
            let oid = state.write_commit(parents, message.to_string(), Provenance::Original);
            state.refs.update_head(oid.clone());
            oid
        };
        let a = commit(&mut state, "A");
        let b = commit(&mut state, "B");
        let c = commit(&mut state, "C");
        state.refs.create_tag(name("v1"), a.clone());
        state.refs.create_branch(name("feature"), b.clone());

        History { state, a, b, c }
    }

    fn resolve(history: &History, input: &str) -> RepositoryResult<ObjectId> {
        Revision::try_parse(input)?.resolve(&history.state)
    }

    #[rstest]
    fn resolves_head_branches_and_tags(history: History) {
        assert_eq!(resolve(&history, "HEAD"), Ok(history.c.clone()));
        assert_eq!(resolve(&history, "feature"), Ok(history.b.clone()));
        assert_eq!(resolve(&history, "v1"), Ok(history.a.clone()));
    }

    #[rstest]
    fn resolves_ancestors_along_first_parent(history: History) {
        assert_eq!(resolve(&history, "HEAD~2"), Ok(history.a.clone()));
        assert_eq!(resolve(&history, "master^"), Ok(history.b.clone()));
        assert_eq!(resolve(&history, "feature~0"), Ok(history.b.clone()));
    }

    #[rstest]
    fn resolves_abbreviated_ids(history: History) {
        let prefix = &history.c.as_ref()[..10];

        assert_eq!(resolve(&history, prefix), Ok(history.c.clone()));
    }

    #[rstest]
    fn walking_past_root_fails(history: History) {
        assert_eq!(
            resolve(&history, "HEAD~3"),
            Err(RepositoryError::PastRoot("HEAD~3".to_string()))
        );
    }

    #[rstest]
    fn unknown_name_fails(history: History) {
        assert_eq!(
            resolve(&history, "nope"),
            Err(RepositoryError::UnknownRevision("nope".to_string()))
        );
    }

    // Property tests

    fn valid_branch_name_strategy() -> impl Strategy<Value = String> {
        prop::string::string_regex("[a-zA-Z0-9][a-zA-Z0-9_/-]*[a-zA-Z0-9]")
            .unwrap()
            .prop_filter("Must not contain invalid patterns", |s| {
                !s.contains("..") && !s.ends_with(".lock") && !s.contains("//") && s != "HEAD"
            })
    }

    proptest! {
        #[test]
        fn prop_valid_branch_names_parse_as_refs(name in valid_branch_name_strategy()) {
            prop_assert_eq!(Revision::try_parse(&name).unwrap(), Revision::Ref(name));
        }

        #[test]
        fn prop_ancestor_suffix_creates_ancestor_revision(
            name in valid_branch_name_strategy(),
            generations in 0usize..100
        ) {
            let parsed = Revision::try_parse(&format!("{}~{}", name, generations)).unwrap();

            prop_assert_eq!(parsed, Revision::Ancestor(Box::new(Revision::Ref(name)), generations));
        }

        #[test]
        fn prop_multiple_parent_suffixes_nest_correctly(
            name in valid_branch_name_strategy(),
            parent_count in 1usize..5
        ) {
            let revision_str = format!("{}{}", name, "^".repeat(parent_count));

            let mut expected = Revision::Ref(name);
            for _ in 0..parent_count {
                expected = Revision::Parent(Box::new(expected));
            }
            prop_assert_eq!(Revision::try_parse(&revision_str).unwrap(), expected);
        }

        #[test]
        fn prop_hex_ids_parse_as_refs(oid in "[0-9a-f]{4,40}") {
            prop_assert_eq!(Revision::try_parse(&oid).unwrap(), Revision::Ref(oid));
        }
    }
}
