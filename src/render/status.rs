//! Rendering of a classified porcelain v2 report.

use super::{
    colors::{Style, theme},
    line::Line,
};
use crate::porcelain::{
    BranchState, Entry, Head, HeadCommit, StatusPair, StatusReport, SubmoduleState,
};

/// `<commit> <head> (<upstream>) +<ahead> -<behind>`, leaving out every part
/// the report didn't provide. `None` when no branch header was seen.
pub fn render_branch(branch: &BranchState) -> Option<Line> {
    if branch.is_empty() {
        return None;
    }

    let mut parts: Vec<(String, Style)> = Vec::new();
    if let Some(ref commit) = branch.commit {
        let commit = match commit {
            HeadCommit::Initial => "(initial)".to_string(),
            HeadCommit::Oid(oid) => oid.clone(),
        };
        parts.push((commit, theme::COMMIT));
    }
    if let Some(ref head) = branch.head {
        let head = match head {
            Head::Detached => "(detached)".to_string(),
            Head::Branch(name) => name.clone(),
        };
        parts.push((head, theme::HEAD));
    }
    if let Some(ref upstream) = branch.upstream {
        parts.push((format!("({upstream})"), theme::UPSTREAM));
    }
    if let Some(ref ahead) = branch.ahead {
        parts.push((format!("+{ahead}"), theme::AHEAD));
    }
    if let Some(ref behind) = branch.behind {
        parts.push((format!("-{behind}"), theme::BEHIND));
    }

    let mut line = Line::new();
    for (i, (text, style)) in parts.into_iter().enumerate() {
        if i > 0 {
            line = line.text(" ");
        }
        line = line.span(text, style);
    }
    Some(line)
}

/// Status pair and submodule block shared by the tracked entry shapes.
fn tracked_prefix(status: StatusPair, submodule: SubmoduleState) -> Line {
    Line::new()
        .span(status.staged.as_char().to_string(), theme::STAGED)
        .span(status.unstaged.as_char().to_string(), theme::UNSTAGED)
        .text(" ")
        .span(submodule.to_string(), theme::SUBMODULE)
        .text(" ")
}

pub fn render_entry(entry: &Entry) -> Line {
    match entry {
        Entry::Changed(changed) => {
            tracked_prefix(changed.status, changed.submodule).span(&changed.path, theme::PATH)
        }
        Entry::Unmerged(unmerged) => {
            tracked_prefix(unmerged.status, unmerged.submodule).span(&unmerged.path, theme::PATH)
        }
        Entry::RenamedOrCopied(renamed) => tracked_prefix(renamed.status, renamed.submodule)
            .span(&renamed.origin_path, theme::PATH)
            .text(" ")
            .span("->", theme::RENAME_ARROW)
            .text(" ")
            .span(&renamed.path, theme::PATH),
        Entry::Untracked { path } => Line::new()
            .span("?? ????", theme::UNTRACKED)
            .text(" ")
            .span(path, theme::PATH),
        Entry::Ignored { path } => Line::new()
            .span("!! !!!!", theme::IGNORED)
            .text(" ")
            .span(path, theme::IGNORED_PATH),
        Entry::Unrecognized { line } => Line::raw(line),
    }
}

/// The branch line (if any) followed by one line per entry in arrival order.
/// A report without entries still ends with one empty line.
pub fn render_report(report: &StatusReport) -> Vec<Line> {
    let mut lines: Vec<Line> = render_branch(&report.branch).into_iter().collect();
    if report.entries.is_empty() {
        lines.push(Line::new());
    } else {
        lines.extend(report.entries.iter().map(render_entry));
    }
    lines
}
