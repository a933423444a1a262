#![allow(dead_code)]

pub mod command;

use bitsim::areas::repository::Repository;
use bitsim::artifacts::graph::ancestry::Ancestry;
use bitsim::artifacts::objects::object_id::ObjectId;
use bitsim::artifacts::snapshot::RepositorySnapshot;
use rstest::fixture;

/// An initialized repository with no commits
#[fixture]
pub fn repository() -> Repository {
    let mut repository = Repository::default();
    repository.init().expect("init never fails");
    repository
}

/// `init; commit("a")`
#[fixture]
pub fn one_commit(mut repository: Repository) -> Repository {
    repository.commit("a").expect("first commit");
    repository
}

/// ```text
/// a - c        master
///  \
///   b          feature
/// ```
#[fixture]
pub fn diverged(mut one_commit: Repository) -> Repository {
    one_commit.create_branch("feature").unwrap();
    one_commit.commit("c").unwrap();
    one_commit.checkout("feature").unwrap();
    one_commit.commit("b").unwrap();
    one_commit.checkout("master").unwrap();
    one_commit
}

pub fn tip(repository: &Repository) -> ObjectId {
    repository
        .current_tip()
        .expect("initialized")
        .expect("has commits")
}

pub fn branch_tip(repository: &Repository, branch: &str) -> ObjectId {
    repository.resolve(branch).expect("branch resolves")
}

pub fn message(repository: &Repository, oid: &ObjectId) -> String {
    repository
        .find_commit(oid.as_ref())
        .expect("commit exists")
        .message()
        .to_string()
}

/// Walk `steps` first parents back from `oid` inside a snapshot
pub fn first_parent_walk(snapshot: &RepositorySnapshot, oid: &ObjectId, steps: usize) -> Option<ObjectId> {
    Ancestry::new(|id| snapshot.commits.get(id).map(|commit| commit.as_slim()))
        .nth_first_parent(oid, steps)
}

/// Graph-level invariants that must hold after every operation
pub fn assert_consistent(repository: &Repository) {
    repository.verify().expect("repository is consistent");

    let snapshot = repository.snapshot();
    for commit in snapshot.commits.values() {
        for parent in commit.parents() {
            assert!(
                snapshot.commits.contains_key(parent),
                "commit {} has dangling parent {}",
                commit.id(),
                parent
            );
        }
    }
    for (branch, target) in &snapshot.branches {
        if let Some(target) = target {
            assert!(
                snapshot.commits.contains_key(target),
                "branch {} points at missing {}",
                branch,
                target
            );
        }
    }
}
