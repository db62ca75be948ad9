//! Line classifier for porcelain v2 output.
//!
//! Each line shape is a rule: a regex and an extractor turning its captures
//! into a typed value. Rules are tried top to bottom and the first one whose
//! pattern matches and whose extractor succeeds wins. Anything left over is
//! an [`Entry::Unrecognized`] line, so classification is total.

use std::sync::LazyLock;

use regex::Captures;

use super::{
    ChangedEntry, Entry, FileMode, Head, HeadCommit, ObjectName, RenamedEntry, Score, ScoreKind,
    StatusCode, StatusPair, SubmoduleState, UnmergedEntry,
};
use crate::rules::{Rule, first_match, text};

/// A single update to the branch header state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchField {
    Commit(HeadCommit),
    Head(Head),
    Upstream(String),
    AheadBehind { ahead: String, behind: String },
}

/// Result of classifying one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Branch(BranchField),
    /// A `#` line none of the branch rules understood (e.g. `# stash <N>`).
    UnknownHeader,
    Entry(Entry),
}

// Field grammar shared by the tracked entry shapes.
const XY: &str = r"(?P<staged>[.MADRCU])(?P<unstaged>[.MADRCU])";
const SUBMODULE: &str =
    r"(?P<sub>[SN])(?P<sub_commit>[.C])(?P<sub_tracked>[.M])(?P<sub_untracked>[.U])";
const SCORE: &str = r"(?P<score_kind>[RC])(?P<score>[0-9]+)";
const PATH: &str = r"(?P<path>.+)";
// With `-z` the two paths are NUL separated, otherwise a tab separates them.
const PATH_PAIR: &str = r"(?P<path>.+)[\t\x00](?P<origin_path>.+)";

fn mode_group(name: &str) -> String {
    format!(r"(?P<{name}>[0-7]{{6}})")
}

fn object_group(name: &str) -> String {
    format!(r"(?P<{name}>[0-9a-f]{{40}})")
}

fn line_pattern(fields: &[&str]) -> String {
    format!("^{}$", fields.join(" "))
}

static BRANCH_RULES: LazyLock<[Rule<BranchField>; 4]> = LazyLock::new(|| {
    [
        Rule::new("branch.oid", r"^# branch\.oid (?P<commit>.*)$", |c| {
            let commit = c.name("commit")?.as_str();
            Some(BranchField::Commit(match commit {
                "(initial)" => HeadCommit::Initial,
                _ => HeadCommit::Oid(commit.to_string()),
            }))
        }),
        Rule::new("branch.head", r"^# branch\.head (?P<branch>.*)$", |c| {
            let branch = c.name("branch")?.as_str();
            Some(BranchField::Head(match branch {
                "(detached)" => Head::Detached,
                _ => Head::Branch(branch.to_string()),
            }))
        }),
        Rule::new(
            "branch.upstream",
            r"^# branch\.upstream (?P<upstream>.*)$",
            |c| Some(BranchField::Upstream(text(c, "upstream")?)),
        ),
        Rule::new(
            "branch.ab",
            r"^# branch\.ab \+(?P<ahead>[0-9]+) -(?P<behind>[0-9]+)$",
            |c| {
                Some(BranchField::AheadBehind {
                    ahead: text(c, "ahead")?,
                    behind: text(c, "behind")?,
                })
            },
        ),
    ]
});

static ENTRY_RULES: LazyLock<[Rule<Entry>; 5]> = LazyLock::new(|| {
    // 1 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>
    let changed = line_pattern(&[
        "1",
        XY,
        SUBMODULE,
        &mode_group("mode_head"),
        &mode_group("mode_index"),
        &mode_group("mode_worktree"),
        &object_group("object_head"),
        &object_group("object_index"),
        PATH,
    ]);
    // 2 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <X><score> <path><sep><origPath>
    let renamed = line_pattern(&[
        "2",
        XY,
        SUBMODULE,
        &mode_group("mode_head"),
        &mode_group("mode_index"),
        &mode_group("mode_worktree"),
        &object_group("object_head"),
        &object_group("object_index"),
        SCORE,
        PATH_PAIR,
    ]);
    // u <XY> <sub> <m1> <m2> <m3> <mW> <h1> <h2> <h3> <path>
    let unmerged = line_pattern(&[
        "u",
        XY,
        SUBMODULE,
        &mode_group("mode_1"),
        &mode_group("mode_2"),
        &mode_group("mode_3"),
        &mode_group("mode_worktree"),
        &object_group("object_1"),
        &object_group("object_2"),
        &object_group("object_3"),
        PATH,
    ]);

    [
        Rule::new("changed", &changed, extract_changed),
        Rule::new("renamed_or_copied", &renamed, extract_renamed),
        Rule::new("unmerged", &unmerged, extract_unmerged),
        Rule::new("untracked", &line_pattern(&[r"\?", PATH]), |c| {
            Some(Entry::Untracked {
                path: text(c, "path")?,
            })
        }),
        Rule::new("ignored", &line_pattern(&["!", PATH]), |c| {
            Some(Entry::Ignored {
                path: text(c, "path")?,
            })
        }),
    ]
});

/// Classify a single line (without its trailing newline).
pub fn classify_line(line: &str) -> Outcome {
    if line.starts_with('#') {
        return first_match(&*BRANCH_RULES, line)
            .map_or(Outcome::UnknownHeader, Outcome::Branch);
    }
    let entry = first_match(&*ENTRY_RULES, line).unwrap_or_else(|| Entry::Unrecognized {
        line: line.to_string(),
    });
    Outcome::Entry(entry)
}

fn extract_changed(c: &Captures<'_>) -> Option<Entry> {
    Some(Entry::Changed(ChangedEntry {
        status: status_pair(c)?,
        submodule: submodule(c)?,
        head_mode: mode(c, "mode_head")?,
        index_mode: mode(c, "mode_index")?,
        worktree_mode: mode(c, "mode_worktree")?,
        head_object: object(c, "object_head")?,
        index_object: object(c, "object_index")?,
        path: text(c, "path")?,
    }))
}

fn extract_renamed(c: &Captures<'_>) -> Option<Entry> {
    let kind = match c.name("score_kind")?.as_str() {
        "R" => ScoreKind::Renamed,
        _ => ScoreKind::Copied,
    };
    Some(Entry::RenamedOrCopied(RenamedEntry {
        status: status_pair(c)?,
        submodule: submodule(c)?,
        head_mode: mode(c, "mode_head")?,
        index_mode: mode(c, "mode_index")?,
        worktree_mode: mode(c, "mode_worktree")?,
        head_object: object(c, "object_head")?,
        index_object: object(c, "object_index")?,
        score: Score {
            kind,
            percent: text(c, "score")?,
        },
        path: text(c, "path")?,
        origin_path: text(c, "origin_path")?,
    }))
}

fn extract_unmerged(c: &Captures<'_>) -> Option<Entry> {
    Some(Entry::Unmerged(UnmergedEntry {
        status: status_pair(c)?,
        submodule: submodule(c)?,
        stage_modes: [mode(c, "mode_1")?, mode(c, "mode_2")?, mode(c, "mode_3")?],
        worktree_mode: mode(c, "mode_worktree")?,
        stage_objects: [
            object(c, "object_1")?,
            object(c, "object_2")?,
            object(c, "object_3")?,
        ],
        path: text(c, "path")?,
    }))
}

fn code(c: &Captures<'_>, name: &str) -> Option<StatusCode> {
    c.name(name)?.as_str().chars().next().and_then(StatusCode::from_char)
}

fn status_pair(c: &Captures<'_>) -> Option<StatusPair> {
    Some(StatusPair {
        staged: code(c, "staged")?,
        unstaged: code(c, "unstaged")?,
    })
}

fn submodule(c: &Captures<'_>) -> Option<SubmoduleState> {
    let flag = |name: &str, set: &str| c.name(name).map(|m| m.as_str() == set);
    Some(SubmoduleState {
        is_submodule: flag("sub", "S")?,
        commit_changed: flag("sub_commit", "C")?,
        tracked_changes: flag("sub_tracked", "M")?,
        untracked_changes: flag("sub_untracked", "U")?,
    })
}

fn mode(c: &Captures<'_>, name: &str) -> Option<FileMode> {
    u32::from_str_radix(c.name(name)?.as_str(), 8).ok().map(FileMode)
}

fn object(c: &Captures<'_>, name: &str) -> Option<ObjectName> {
    text(c, name).map(ObjectName)
}
