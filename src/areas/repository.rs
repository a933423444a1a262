use crate::areas::config::RepositoryConfig;
use crate::areas::database::Database;
use crate::areas::errors::{RepositoryError, RepositoryResult};
use crate::areas::events::{Listeners, Operation, RepositoryEvent, SubscriptionId};
use crate::areas::refs::{Head, Refs};
use crate::areas::stash::Stash;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::{Commit, Provenance};
use crate::artifacts::objects::object_id::ObjectId;

/// Everything an initialized repository owns
///
/// Cloned into a draft for every mutating operation, so it must stay a plain
/// value type.
#[derive(Debug, Clone)]
pub struct RepositoryState {
    pub(crate) database: Database,
    pub(crate) refs: Refs,
    pub(crate) stash: Stash,
    pub(crate) min_prefix_len: usize,
}

impl RepositoryState {
    pub(crate) fn new(config: &RepositoryConfig) -> Self {
        RepositoryState {
            database: Database::new(),
            refs: Refs::new(config.default_branch().clone()),
            stash: Stash::new(),
            min_prefix_len: config.min_prefix_len(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn stash(&self) -> &Stash {
        &self.stash
    }

    pub(crate) fn current_tip(&self) -> Option<ObjectId> {
        self.refs.read_head()
    }

    pub(crate) fn require_tip(&self) -> RepositoryResult<ObjectId> {
        self.current_tip().ok_or(RepositoryError::NoCommits)
    }

    /// The branch HEAD is attached to, or a detached-HEAD failure for `operation`
    pub(crate) fn attached_branch(&self, operation: &'static str) -> RepositoryResult<BranchName> {
        self.refs
            .current_branch()
            .cloned()
            .ok_or(RepositoryError::DetachedHead(operation))
    }

    pub(crate) fn parse_branch_name(name: &str) -> RepositoryResult<BranchName> {
        BranchName::try_parse(name.to_string())
            .map_err(|e| RepositoryError::InvalidName(e.to_string()))
    }

    /// Parse and look up an existing branch
    pub(crate) fn existing_branch(&self, name: &str) -> RepositoryResult<BranchName> {
        BranchName::try_parse(name.to_string())
            .ok()
            .filter(|branch| self.refs.has_branch(branch))
            .ok_or_else(|| RepositoryError::BranchNotFound(name.to_string()))
    }

    /// Tip of an existing branch that has at least one commit
    pub(crate) fn branch_tip(&self, branch: &BranchName) -> RepositoryResult<ObjectId> {
        if !self.refs.has_branch(branch) {
            return Err(RepositoryError::BranchNotFound(branch.to_string()));
        }

        self.refs
            .read_ref(branch)
            .ok_or_else(|| RepositoryError::EmptyBranch(branch.clone()))
    }

    pub(crate) fn resolve_commit(&self, candidate: &str) -> RepositoryResult<ObjectId> {
        self.database.resolve_prefix(candidate, self.min_prefix_len)
    }

    /// Store a new commit made on top of the current checkout
    pub(crate) fn write_commit(
        &mut self,
        parents: Vec<ObjectId>,
        message: String,
        provenance: Provenance,
    ) -> ObjectId {
        let id = self.database.generate_id();
        let origin_branch = self.refs.current_branch().cloned();
        let commit = Commit::new(id, parents, message, origin_branch, provenance);

        self.database.store(commit)
    }
}

/// A simulated repository
///
/// Starts uninitialized: every operation except `init` fails until `init`
/// has run. Each instance is independent, so tests and sessions can hold as
/// many as they like.
#[derive(Debug)]
pub struct Repository {
    config: RepositoryConfig,
    state: Option<RepositoryState>,
    listeners: Listeners,
}

impl Repository {
    pub fn new(config: RepositoryConfig) -> Self {
        Repository {
            config,
            state: None,
            listeners: Listeners::default(),
        }
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    pub(crate) fn state(&self) -> RepositoryResult<&RepositoryState> {
        self.state.as_ref().ok_or(RepositoryError::NotARepository)
    }

    /// Replace the whole state, as `init` does
    pub(crate) fn install(&mut self, state: RepositoryState) -> RepositoryResult<()> {
        state.verify()?;
        self.state = Some(state);
        self.notify(Operation::Init);

        Ok(())
    }

    /// Run a mutating operation atomically
    ///
    /// The live state is verified, cloned into a draft and handed to
    /// `apply`. The draft replaces the live state only when `apply` succeeds
    /// and the draft passes verification; otherwise it is dropped and the
    /// live state is left exactly as it was.
    pub(crate) fn transact<T>(
        &mut self,
        operation: Operation,
        apply: impl FnOnce(&mut RepositoryState) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let live = self.state()?;
        live.verify()?;

        let mut draft = live.clone();
        let outcome = apply(&mut draft).inspect_err(|_e| {
            debug_log!("{} rejected: {}", operation, _e);
        })?;

        if let Err(e) = draft.verify() {
            debug_log!("{} broke an invariant: {}", operation, e);
            return Err(e.into());
        }

        self.state = Some(draft);
        self.notify(operation);

        Ok(outcome)
    }

    fn notify(&mut self, operation: Operation) {
        if let Some(state) = &self.state {
            let event = RepositoryEvent::new(
                operation,
                state.refs.head().clone(),
                state.current_tip(),
            );
            debug_log!("{} -> HEAD {}", operation, event.head);
            self.listeners.notify(&event);
        }
    }

    /// Register a listener called after every successful mutation
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&RepositoryEvent) + 'static,
    ) -> SubscriptionId {
        self.listeners.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    pub fn head(&self) -> RepositoryResult<Head> {
        Ok(self.state()?.refs.head().clone())
    }

    /// The commit HEAD currently resolves to
    pub fn current_tip(&self) -> RepositoryResult<Option<ObjectId>> {
        Ok(self.state()?.current_tip())
    }

    pub fn current_branch(&self) -> RepositoryResult<Option<BranchName>> {
        Ok(self.state()?.refs.current_branch().cloned())
    }

    pub fn read_ref(&self, branch: &BranchName) -> RepositoryResult<Option<ObjectId>> {
        Ok(self.state()?.refs.read_ref(branch))
    }

    pub fn branches(&self) -> RepositoryResult<Vec<(BranchName, Option<ObjectId>)>> {
        Ok(self
            .state()?
            .refs
            .branches()
            .iter()
            .map(|(name, oid)| (name.clone(), oid.clone()))
            .collect())
    }

    pub fn tags(&self) -> RepositoryResult<Vec<(BranchName, ObjectId)>> {
        Ok(self
            .state()?
            .refs
            .tags()
            .iter()
            .map(|(name, oid)| (name.clone(), oid.clone()))
            .collect())
    }

    pub fn remotes(&self) -> RepositoryResult<Vec<(BranchName, ObjectId)>> {
        Ok(self
            .state()?
            .refs
            .remotes()
            .iter()
            .map(|(name, oid)| (name.clone(), oid.clone()))
            .collect())
    }

    pub fn stash_list(&self) -> RepositoryResult<Vec<ObjectId>> {
        Ok(self.state()?.stash.list())
    }

    pub fn commit_count(&self) -> RepositoryResult<usize> {
        Ok(self.state()?.database.len())
    }

    /// Look up a commit by full id or unambiguous prefix
    pub fn find_commit(&self, id_or_prefix: &str) -> RepositoryResult<Commit> {
        let state = self.state()?;
        let oid = state.resolve_commit(id_or_prefix)?;

        state
            .database
            .load(&oid)
            .cloned()
            .ok_or(RepositoryError::UnknownRevision(id_or_prefix.to_string()))
    }

    /// Run the consistency check on demand
    pub fn verify(&self) -> RepositoryResult<()> {
        Ok(self.state()?.verify()?)
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new(RepositoryConfig::default())
    }
}
