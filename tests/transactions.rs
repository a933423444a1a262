mod common;

use bitsim::areas::events::{Operation, RepositoryEvent};
use bitsim::areas::refs::Head;
use bitsim::areas::repository::Repository;
use bitsim::artifacts::snapshot::RepositorySnapshot;
use bitsim::commands::porcelain::init::InitOutcome;
use common::{diverged, one_commit, repository};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::cell::RefCell;
use std::rc::Rc;

fn record_events(repository: &mut Repository) -> Rc<RefCell<Vec<RepositoryEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    repository.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

#[rstest]
fn failed_operations_leave_state_untouched(mut diverged: Repository) {
    let before = diverged.snapshot();

    assert!(diverged.merge("master").is_err());
    assert!(diverged.create_branch("feature").is_err());
    assert!(diverged.checkout("deadbeef").is_err());
    assert!(diverged.reset_hard("HEAD~5").is_err());
    assert!(diverged.stash_pop().is_err());
    assert!(diverged.pull(None).is_err());
    assert!(diverged.tag("bad name", None).is_err());

    assert_eq!(diverged.snapshot(), before);
}

#[rstest]
fn successful_operations_notify_listeners(mut one_commit: Repository) {
    let events = record_events(&mut one_commit);

    let b = one_commit.commit("b").unwrap();
    one_commit.create_branch("f").unwrap();
    one_commit.checkout(b.as_ref()).unwrap();

    let events = events.borrow();
    let operations = events.iter().map(|event| event.operation).collect::<Vec<_>>();
    assert_eq!(
        operations,
        vec![Operation::Commit, Operation::Branch, Operation::Checkout]
    );
    assert_eq!(events[0].tip, Some(b.clone()));
    assert_eq!(events[2].head, Head::Detached(b));
}

#[rstest]
fn failed_operations_emit_nothing(mut one_commit: Repository) {
    let events = record_events(&mut one_commit);

    one_commit.stash_pop().unwrap_err();
    one_commit.merge("nope").unwrap_err();

    assert!(events.borrow().is_empty());
}

#[rstest]
fn unsubscribed_listeners_stop_receiving(mut one_commit: Repository) {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = one_commit.subscribe(move |_| *sink.borrow_mut() += 1);

    one_commit.commit("b").unwrap();
    assert!(one_commit.unsubscribe(id));
    one_commit.commit("c").unwrap();

    assert_eq!(*count.borrow(), 1);
    assert!(!one_commit.unsubscribe(id));
}

#[rstest]
fn reinit_discards_everything(mut diverged: Repository) {
    diverged.tag("v1", None).unwrap();
    diverged.push(None).unwrap();
    diverged.stash().unwrap();

    let outcome = diverged.init().unwrap();

    assert_eq!(outcome, InitOutcome::Reinitialized { discarded_commits: 3 });
    let snapshot = diverged.snapshot();
    assert!(snapshot.commits.is_empty());
    assert!(snapshot.tags.is_empty());
    assert!(snapshot.remotes.is_empty());
    assert!(snapshot.stash.is_empty());
    assert_eq!(snapshot.branches.len(), 1);
    assert_eq!(snapshot.head.map(|head| head.to_string()), Some("master".to_string()));
}

#[rstest]
fn snapshot_is_detached_from_later_changes(mut one_commit: Repository) {
    let snapshot = one_commit.snapshot();

    one_commit.commit("b").unwrap();

    assert_eq!(snapshot.commits.len(), 1);
    assert_eq!(one_commit.snapshot().commits.len(), 2);
}

#[rstest]
fn snapshot_survives_json(mut diverged: Repository) {
    diverged.merge("feature").unwrap();
    diverged.tag("release", None).unwrap();
    let snapshot = diverged.snapshot();

    let restored = RepositorySnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();

    assert_eq!(restored, snapshot);
}

#[rstest]
fn snapshot_layout_puts_branches_in_lanes(mut diverged: Repository) {
    diverged.merge("feature").unwrap();
    let snapshot = diverged.snapshot();
    let layout = snapshot.layout();
    let tip = snapshot.tip().cloned().unwrap();

    assert_eq!(layout.nodes.len(), 4);
    assert_eq!(layout.width(), 2);
    assert_eq!(layout.nodes.last().map(|node| &node.id), Some(&tip));
    assert_eq!(layout.node(&tip).map(|node| node.row), Some(2));
}

#[rstest]
fn first_commit_gives_unborn_branch_its_tip(mut repository: Repository) {
    assert_eq!(repository.current_tip().unwrap(), None);

    let a = repository.commit("  a  ").unwrap();

    assert_eq!(repository.current_tip().unwrap(), Some(a.clone()));
    assert_eq!(repository.find_commit(a.as_ref()).unwrap().message(), "a");
}
