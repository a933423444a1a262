//! Change notifications
//!
//! Listeners registered with `Repository::subscribe` are called after every
//! successful mutating operation. Failed operations emit nothing.

use crate::areas::refs::Head;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Mutating operations of the repository model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Init,
    Commit,
    Branch,
    Checkout,
    Merge,
    Rebase,
    CherryPick,
    Reset,
    Stash,
    StashPop,
    Tag,
    Push,
    Pull,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Init => "init",
            Operation::Commit => "commit",
            Operation::Branch => "branch",
            Operation::Checkout => "checkout",
            Operation::Merge => "merge",
            Operation::Rebase => "rebase",
            Operation::CherryPick => "cherry-pick",
            Operation::Reset => "reset",
            Operation::Stash => "stash",
            Operation::StashPop => "stash pop",
            Operation::Tag => "tag",
            Operation::Push => "push",
            Operation::Pull => "pull",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What changed, as seen right after the operation completed
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RepositoryEvent {
    pub operation: Operation,
    pub head: Head,
    pub tip: Option<ObjectId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type Listener = Box<dyn FnMut(&RepositoryEvent)>;

/// Registered listeners in subscription order
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, event: &RepositoryEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
