//! Command table
//!
//! Each interpreter command maps to exactly one repository operation.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bitsim",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    #[command(about = "Create an empty repository, discarding any existing history")]
    Init,
    #[command(about = "Record a new commit on the current tip")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(about = "List branches, or create one at the current tip")]
    Branch {
        #[arg(index = 1, help = "Name of the branch to create")]
        name: Option<String>,
    },
    #[command(about = "Switch to a branch, or detach HEAD at a commit")]
    Checkout {
        #[arg(short = 'b', help = "Create the branch and switch to it")]
        new_branch: bool,
        #[arg(index = 1, help = "Branch name or commit id")]
        target: String,
    },
    #[command(about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(about = "Replay the current branch on top of another branch")]
    Rebase {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "cherry-pick", about = "Copy a commit onto the current tip")]
    CherryPick {
        #[arg(index = 1, help = "Commit id or unambiguous prefix")]
        commit: String,
    },
    #[command(about = "Move the current branch to another commit")]
    Reset {
        #[arg(long, required = true, help = "Move the branch (the only supported mode)")]
        hard: bool,
        #[arg(index = 1, default_value = "HEAD", help = "HEAD, HEAD~N, a ref or a commit id")]
        target: String,
    },
    #[command(about = "Bookmark the current tip, or pop/list bookmarks")]
    Stash {
        #[command(subcommand)]
        action: Option<StashAction>,
    },
    #[command(about = "List tags, or create one")]
    Tag {
        #[arg(index = 1)]
        name: Option<String>,
        #[arg(index = 2, help = "Revision to tag (defaults to HEAD)")]
        target: Option<String>,
    },
    #[command(about = "Show the commit history")]
    Log {
        #[arg(long, help = "Draw the branch lanes")]
        graph: bool,
        #[arg(long, help = "One line per commit")]
        oneline: bool,
        #[arg(short = 'n', long = "max-count", help = "Number of commits to show")]
        limit: Option<usize>,
    },
    #[command(about = "Show HEAD, the current tip, branches and stash depth")]
    Status,
    #[command(about = "Record a branch tip as its remote-tracking tip")]
    Push {
        #[arg(index = 1)]
        branch: Option<String>,
    },
    #[command(about = "Move a branch to its remote-tracking tip")]
    Pull {
        #[arg(index = 1)]
        branch: Option<String>,
    },
    #[command(about = "List the available commands")]
    Help,
    #[command(about = "Clear the screen")]
    Clear,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum StashAction {
    Pop,
    List,
}

impl CommandLine {
    pub fn try_parse_tokens(tokens: &[String]) -> Result<Command, clap::Error> {
        CommandLine::try_parse_from(tokens).map(|command_line| command_line.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(line: &str) -> Result<Command, clap::Error> {
        let tokens = line.split_whitespace().map(String::from).collect::<Vec<_>>();
        CommandLine::try_parse_tokens(&tokens)
    }

    #[rstest]
    #[case("init", Command::Init)]
    #[case("commit -m hello", Command::Commit { message: "hello".to_string() })]
    #[case("branch", Command::Branch { name: None })]
    #[case("checkout -b topic", Command::Checkout { new_branch: true, target: "topic".to_string() })]
    #[case("cherry-pick abcd", Command::CherryPick { commit: "abcd".to_string() })]
    #[case("reset --hard", Command::Reset { hard: true, target: "HEAD".to_string() })]
    #[case("reset --hard HEAD~2", Command::Reset { hard: true, target: "HEAD~2".to_string() })]
    #[case("stash", Command::Stash { action: None })]
    #[case("stash pop", Command::Stash { action: Some(StashAction::Pop) })]
    #[case("tag v1 HEAD^", Command::Tag { name: Some("v1".to_string()), target: Some("HEAD^".to_string()) })]
    #[case("log --graph -n 3", Command::Log { graph: true, oneline: false, limit: Some(3) })]
    #[case("help", Command::Help)]
    fn parses_command_table(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(parse(line).unwrap(), expected);
    }

    #[rstest]
    #[case("commit")]
    #[case("reset HEAD~1")]
    #[case("merge")]
    #[case("frobnicate")]
    #[case("log -n many")]
    fn rejects_malformed_commands(#[case] line: &str) {
        assert!(parse(line).is_err());
    }
}
