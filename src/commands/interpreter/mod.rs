//! Command interpreter
//!
//! Turns one text line into one repository operation and renders the result
//! (or the failure) as output lines. Bad input never panics and never
//! changes the repository.
//!
//! - `tokenizer`: whitespace splitting with quote support
//! - `command`: the clap command table
//! - `format`: commit and ref rendering
//! - `output`: tagged output lines

pub mod command;
pub mod format;
pub mod output;
pub mod tokenizer;

use crate::areas::config::RepositoryConfig;
use crate::areas::errors::RepositoryError;
use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::commands::interpreter::command::{Command, CommandLine, StashAction};
use crate::commands::interpreter::output::OutputLine;
use crate::commands::porcelain::checkout::CheckoutOutcome;
use crate::commands::porcelain::init::InitOutcome;
use crate::commands::porcelain::merge::MergeOutcome;
use crate::commands::porcelain::pull::PullOutcome;
use crate::commands::porcelain::rebase::RebaseOutcome;
use clap::error::ErrorKind;

const HELP_TEXT: &[(&str, &str)] = &[
    ("init", "create an empty repository (discards existing history)"),
    ("commit -m <message>", "record a commit on the current tip"),
    ("branch [name]", "list branches, or create one at the current tip"),
    ("checkout [-b] <branch|commit>", "switch branch, create one, or detach HEAD"),
    ("merge <branch>", "merge a branch into the current one"),
    ("rebase <branch>", "replay the current branch onto another"),
    ("cherry-pick <commit>", "copy a commit onto the current tip"),
    ("reset --hard [revision]", "move the current branch (HEAD~N, ref, id)"),
    ("stash [pop|list]", "bookmark the current tip, pop or list bookmarks"),
    ("tag [name [revision]]", "list tags, or create one"),
    ("log [--graph] [--oneline] [-n N]", "show the history"),
    ("status", "show HEAD, tip, branches and stash depth"),
    ("push [branch]", "record a branch tip as its remote-tracking tip"),
    ("pull [branch]", "move a branch to its remote-tracking tip"),
    ("help", "show this list"),
    ("clear", "clear the screen"),
];

/// A repository plus the text front end that drives it
#[derive(Debug, Default)]
pub struct Interpreter {
    repository: Repository,
}

impl Interpreter {
    pub fn new(config: RepositoryConfig) -> Self {
        Interpreter {
            repository: Repository::new(config),
        }
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut Repository {
        &mut self.repository
    }

    /// Run one command line
    pub fn execute(&mut self, line: &str) -> Vec<OutputLine> {
        let tokens = match tokenizer::tokenize(line) {
            Ok(tokens) => tokens,
            Err(e) => return vec![OutputLine::Error(e.to_string())],
        };
        if tokens.is_empty() {
            return Vec::new();
        }

        let command = match CommandLine::try_parse_tokens(&tokens) {
            Ok(command) => command,
            Err(e) => return Self::usage_lines(&e),
        };

        debug_log!("Executing {:?}", command);

        self.dispatch(command).unwrap_or_else(Self::failure_lines)
    }

    /// Replay a scenario: every non-blank line that is not a `#` comment is
    /// echoed and executed, and replay continues after failures
    pub fn run_script(&mut self, script: &str) -> Vec<OutputLine> {
        script
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .flat_map(|line| {
                let mut lines = vec![OutputLine::Echo(line.to_string())];
                lines.extend(self.execute(line));
                lines
            })
            .collect()
    }

    fn usage_lines(error: &clap::Error) -> Vec<OutputLine> {
        let rendered = error.render().to_string();
        match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                rendered.lines().map(OutputLine::info).collect()
            }
            _ => rendered
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| {
                    let line = line.strip_prefix("error: ").unwrap_or(line);
                    OutputLine::Error(line.to_string())
                })
                .collect(),
        }
    }

    fn failure_lines(error: anyhow::Error) -> Vec<OutputLine> {
        match error.downcast_ref::<RepositoryError>() {
            Some(e) if e.is_internal() => vec![OutputLine::Internal(e.to_string())],
            _ => vec![OutputLine::Error(error.to_string())],
        }
    }

    fn dispatch(&mut self, command: Command) -> anyhow::Result<Vec<OutputLine>> {
        match command {
            Command::Init => self.init(),
            Command::Commit { message } => self.commit(&message),
            Command::Branch { name: None } => self.list_branches(),
            Command::Branch { name: Some(name) } => {
                let branch = self.repository.create_branch(&name)?;
                let tip = self.repository.resolve(branch.as_ref())?;
                Ok(vec![OutputLine::success(format!(
                    "Created branch '{}' at {}",
                    branch,
                    tip.to_short_oid()
                ))])
            }
            Command::Checkout {
                new_branch: true,
                target,
            } => {
                let branch = self.repository.checkout_new_branch(&target)?;
                Ok(vec![OutputLine::success(format!(
                    "Switched to a new branch '{}'",
                    branch
                ))])
            }
            Command::Checkout { target, .. } => self.checkout(&target),
            Command::Merge { branch } => self.merge(&branch),
            Command::Rebase { branch } => self.rebase(&branch),
            Command::CherryPick { commit } => {
                let outcome = self.repository.cherry_pick(&commit)?;
                Ok(vec![OutputLine::success(format!(
                    "[{} {}] {} (cherry picked from {})",
                    self.head_label()?,
                    outcome.new_id.to_short_oid(),
                    outcome.message.lines().next().unwrap_or_default(),
                    outcome.original_id.to_short_oid()
                ))])
            }
            Command::Reset { target, .. } => {
                let oid = self.repository.reset_hard(&target)?;
                let commit = self.repository.find_commit(oid.as_ref())?;
                Ok(vec![OutputLine::info(format!(
                    "HEAD is now at {} {}",
                    oid.to_short_oid(),
                    commit.short_message()
                ))])
            }
            Command::Stash { action } => self.stash(action),
            Command::Tag { name: None, .. } => self.list_tags(),
            Command::Tag {
                name: Some(name),
                target,
            } => {
                let oid = self.repository.tag(&name, target.as_deref())?;
                Ok(vec![OutputLine::success(format!(
                    "Tagged {} as '{}'",
                    oid.to_short_oid(),
                    name
                ))])
            }
            Command::Log {
                graph,
                oneline,
                limit,
            } => self.log(graph, oneline, limit),
            Command::Status => Ok(self
                .repository
                .status()?
                .to_string()
                .lines()
                .map(OutputLine::info)
                .collect()),
            Command::Push { branch } => self.push(branch.as_deref()),
            Command::Pull { branch } => self.pull(branch.as_deref()),
            Command::Help => Ok(HELP_TEXT
                .iter()
                .map(|(usage, about)| OutputLine::info(format!("  {:<34}{}", usage, about)))
                .collect()),
            Command::Clear => Ok(vec![OutputLine::Clear]),
        }
    }

    /// `master`, or `detached HEAD` when no branch is checked out
    fn head_label(&self) -> anyhow::Result<String> {
        Ok(match self.repository.head()? {
            Head::Attached(branch) => branch.to_string(),
            Head::Detached(_) => "detached HEAD".to_string(),
        })
    }

    fn init(&mut self) -> anyhow::Result<Vec<OutputLine>> {
        let outcome = self.repository.init()?;
        let branch = self.repository.config().default_branch().clone();

        let mut lines = Vec::new();
        if let InitOutcome::Reinitialized { discarded_commits } = outcome {
            lines.push(OutputLine::warning(format!(
                "reinitialized the repository, {} commit(s) of history discarded",
                discarded_commits
            )));
        }
        lines.push(OutputLine::success(format!(
            "Initialized empty repository on branch '{}'",
            branch
        )));

        Ok(lines)
    }

    fn commit(&mut self, message: &str) -> anyhow::Result<Vec<OutputLine>> {
        let is_root = self.repository.current_tip()?.is_none();
        let oid = self.repository.commit(message)?;
        let commit = self.repository.find_commit(oid.as_ref())?;

        Ok(vec![OutputLine::success(format!(
            "[{} {}{}] {}",
            self.head_label()?,
            if is_root { "(root-commit) " } else { "" },
            oid.to_short_oid(),
            commit.short_message()
        ))])
    }

    fn list_branches(&self) -> anyhow::Result<Vec<OutputLine>> {
        let current = self.repository.current_branch()?;
        let mut lines = Vec::new();

        if let Head::Detached(oid) = self.repository.head()? {
            lines.push(OutputLine::info(format!(
                "* (HEAD detached at {})",
                oid.to_short_oid()
            )));
        }
        for (branch, _) in self.repository.branches()? {
            if current.as_ref() == Some(&branch) {
                lines.push(OutputLine::success(format!("* {}", branch)));
            } else {
                lines.push(OutputLine::info(format!("  {}", branch)));
            }
        }

        Ok(lines)
    }

    fn list_tags(&self) -> anyhow::Result<Vec<OutputLine>> {
        Ok(self
            .repository
            .tags()?
            .into_iter()
            .map(|(tag, oid)| OutputLine::info(format!("{} -> {}", tag, oid.to_short_oid())))
            .collect())
    }

    fn checkout(&mut self, target: &str) -> anyhow::Result<Vec<OutputLine>> {
        let outcome = self.repository.checkout(target)?;

        let mut lines = Vec::new();
        if let CheckoutOutcome::Detached(_) = &outcome {
            lines.push(OutputLine::warning(
                "you are in 'detached HEAD' state; new commits will not belong to any branch",
            ));
        }
        lines.push(OutputLine::info(outcome.to_string()));

        Ok(lines)
    }

    fn merge(&mut self, source: &str) -> anyhow::Result<Vec<OutputLine>> {
        let line = match self.repository.merge(source)? {
            MergeOutcome::UpToDate => OutputLine::info("Already up to date."),
            MergeOutcome::FastForward { tip } => {
                OutputLine::success(format!("Fast-forward to {}", tip.to_short_oid()))
            }
            MergeOutcome::Merge { id, base } => OutputLine::success(format!(
                "Merge made: {} (merge base {})",
                id.to_short_oid(),
                base.map(|base| base.to_short_oid())
                    .unwrap_or_else(|| "none".to_string())
            )),
        };

        Ok(vec![line])
    }

    fn rebase(&mut self, target: &str) -> anyhow::Result<Vec<OutputLine>> {
        let current = self.head_label()?;

        let lines = match self.repository.rebase(target)? {
            RebaseOutcome::UpToDate => {
                vec![OutputLine::info(format!("Current branch {} is up to date.", current))]
            }
            RebaseOutcome::Rebased {
                count,
                tip,
                replayed,
            } => {
                let mut lines = replayed
                    .iter()
                    .map(|(original, new)| {
                        OutputLine::info(format!(
                            "  {} -> {}",
                            original.to_short_oid(),
                            new.to_short_oid()
                        ))
                    })
                    .collect::<Vec<_>>();
                lines.push(OutputLine::success(format!(
                    "Successfully rebased {} onto {}: {} commit(s) replayed, now at {}",
                    current,
                    target,
                    count,
                    tip.to_short_oid()
                )));
                lines
            }
        };

        Ok(lines)
    }

    fn stash(&mut self, action: Option<StashAction>) -> anyhow::Result<Vec<OutputLine>> {
        match action {
            None => {
                let tip = self.repository.current_tip()?;
                self.repository.stash()?;
                Ok(vec![OutputLine::success(format!(
                    "Saved position stash@{{0}} at {}",
                    tip.map(|tip| tip.to_short_oid()).unwrap_or_default()
                ))])
            }
            Some(StashAction::Pop) => {
                let oid = self.repository.stash_pop()?;
                Ok(vec![OutputLine::success(format!(
                    "Dropped stash@{{0}} ({})",
                    oid.to_short_oid()
                ))])
            }
            Some(StashAction::List) => Ok(self
                .repository
                .stash_list()?
                .into_iter()
                .enumerate()
                .map(|(position, oid)| {
                    OutputLine::info(format!("stash@{{{}}}: {}", position, oid.to_short_oid()))
                })
                .collect()),
        }
    }

    fn log(
        &self,
        graph: bool,
        oneline: bool,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<OutputLine>> {
        let limit = limit.unwrap_or(self.repository.config().log_limit());
        let commits = self.repository.log(limit)?;
        let decorations = self.repository.decorations()?;

        if commits.is_empty() {
            return Ok(vec![OutputLine::info("(no commits yet)")]);
        }

        if graph {
            let layout = self.repository.snapshot().layout();
            let width = layout.width();
            return Ok(commits
                .iter()
                .map(|commit| {
                    let column = layout.node(commit.id()).map(|node| node.column).unwrap_or(0);
                    OutputLine::info(format!(
                        "{} {}",
                        format::graph_prefix(column, width),
                        format::oneline(commit, &decorations)
                    ))
                })
                .collect());
        }

        if oneline {
            return Ok(commits
                .iter()
                .map(|commit| OutputLine::info(format::oneline(commit, &decorations)))
                .collect());
        }

        let mut lines = Vec::new();
        for (i, commit) in commits.iter().enumerate() {
            if i > 0 {
                lines.push(OutputLine::info(""));
            }
            lines.extend(format::medium(commit, &decorations).into_iter().map(OutputLine::Info));
        }

        Ok(lines)
    }

    fn push(&mut self, branch: Option<&str>) -> anyhow::Result<Vec<OutputLine>> {
        let outcome = self.repository.push(branch)?;

        let line = if outcome.was_up_to_date {
            OutputLine::info("Everything up-to-date")
        } else if outcome.is_new {
            OutputLine::success(format!(
                " * [new branch] {} -> origin/{} ({})",
                outcome.branch,
                outcome.branch,
                outcome.id.to_short_oid()
            ))
        } else {
            OutputLine::success(format!(
                "   {} -> origin/{} ({})",
                outcome.branch,
                outcome.branch,
                outcome.id.to_short_oid()
            ))
        };

        Ok(vec![line])
    }

    fn pull(&mut self, branch: Option<&str>) -> anyhow::Result<Vec<OutputLine>> {
        let line = match self.repository.pull(branch)? {
            PullOutcome::UpToDate { .. } => OutputLine::info("Already up to date."),
            PullOutcome::FastForward { id } => {
                OutputLine::success(format!("Fast-forward to {}", id.to_short_oid()))
            }
        };

        Ok(vec![line])
    }
}
