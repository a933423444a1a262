//! Commit and ref formatting for interpreter output

use crate::artifacts::objects::commit::{Commit, Provenance};
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::collections::HashMap;

pub type Decorations = HashMap<ObjectId, Vec<String>>;

/// ` (HEAD -> master, origin/master, tag: v1)` or an empty string
pub fn decoration(oid: &ObjectId, decorations: &Decorations) -> String {
    match decorations.get(oid) {
        Some(names) if !names.is_empty() => {
            let names = names
                .iter()
                .map(|name| colored_ref_name(name))
                .collect::<Vec<_>>()
                .join(", ");
            format!(" ({})", names)
        }
        _ => String::new(),
    }
}

fn colored_ref_name(name: &str) -> String {
    if name.starts_with("HEAD") {
        name.cyan().bold().to_string()
    } else if name.starts_with("tag: ") {
        name.yellow().bold().to_string()
    } else if name.starts_with("origin/") {
        name.red().bold().to_string()
    } else {
        name.green().bold().to_string()
    }
}

fn provenance_note(commit: &Commit) -> Option<String> {
    match commit.provenance() {
        Provenance::Original => None,
        Provenance::Merge => Some("merge".to_string()),
        Provenance::Rebased { original_id } => {
            Some(format!("rebased from {}", original_id.to_short_oid()))
        }
        Provenance::CherryPicked { original_id } => {
            Some(format!("cherry picked from {}", original_id.to_short_oid()))
        }
    }
}

pub fn oneline(commit: &Commit, decorations: &Decorations) -> String {
    format!(
        "{}{} {}",
        commit.id().to_short_oid().yellow(),
        decoration(commit.id(), decorations),
        commit.short_message()
    )
}

pub fn medium(commit: &Commit, decorations: &Decorations) -> Vec<String> {
    let mut lines = vec![format!(
        "{}{}",
        format!("commit {}", commit.id()).yellow(),
        decoration(commit.id(), decorations)
    )];

    if commit.is_merge() {
        let parents = commit
            .parents()
            .iter()
            .map(ObjectId::to_short_oid)
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("Merge: {}", parents));
    }
    if let Some(branch) = commit.origin_branch() {
        lines.push(format!("Branch: {}", branch));
    }
    lines.push(format!("Date:   {}", commit.readable_timestamp()));
    if let Some(note) = provenance_note(commit) {
        lines.push(format!("Note:   {}", note));
    }
    lines.push(String::new());
    lines.extend(commit.message().lines().map(|line| format!("    {}", line)));

    lines
}

/// Lane prefix for `log --graph`: one `|` per lane left of the commit
pub fn graph_prefix(column: usize, width: usize) -> String {
    (0..width.max(column + 1))
        .map(|lane| if lane == column { "*" } else { "|" })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::commit::Provenance;
    use rstest::rstest;

    fn commit(message: &str) -> Commit {
        Commit::new(
            ObjectId::generate(1),
            vec![],
            message.to_string(),
            None,
            Provenance::Original,
        )
    }

    #[test]
    fn undecorated_commit_has_no_parentheses() {
        colored::control::set_override(false);
        let commit = commit("first\n\nbody");

        assert_eq!(
            oneline(&commit, &Decorations::new()),
            format!("{} first", commit.id().to_short_oid())
        );
    }

    #[test]
    fn medium_format_indents_every_message_line() {
        colored::control::set_override(false);
        let commit = commit("subject\nsecond line");

        let lines = medium(&commit, &Decorations::new());

        assert_eq!(lines[0], format!("commit {}", commit.id()));
        assert_eq!(&lines[lines.len() - 2..], ["    subject", "    second line"]);
    }

    #[rstest]
    #[case(0, 1, "*")]
    #[case(1, 2, "| *")]
    #[case(0, 3, "* | |")]
    fn graph_prefix_marks_the_commit_lane(
        #[case] column: usize,
        #[case] width: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(graph_prefix(column, width), expected);
    }
}
