//! Model of a `git status --porcelain=v2 --branch` report.
//!
//! Lines are classified one at a time by [`classify_line`]; a [`StatusReport`]
//! folds the outcomes into the branch header state and the ordered entry list.

mod classify;

use std::fmt;

pub use classify::{BranchField, Outcome, classify_line};

/// Staged or unstaged status letter of a tracked entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusCode {
    Unmodified,
    Modified,
    Added,
    Deleted,
    Renamed,
    Copied,
    UpdatedUnmerged,
}

impl StatusCode {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(StatusCode::Unmodified),
            'M' => Some(StatusCode::Modified),
            'A' => Some(StatusCode::Added),
            'D' => Some(StatusCode::Deleted),
            'R' => Some(StatusCode::Renamed),
            'C' => Some(StatusCode::Copied),
            'U' => Some(StatusCode::UpdatedUnmerged),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            StatusCode::Unmodified => '.',
            StatusCode::Modified => 'M',
            StatusCode::Added => 'A',
            StatusCode::Deleted => 'D',
            StatusCode::Renamed => 'R',
            StatusCode::Copied => 'C',
            StatusCode::UpdatedUnmerged => 'U',
        }
    }
}

/// The `<XY>` field: index status first, worktree status second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusPair {
    pub staged: StatusCode,
    pub unstaged: StatusCode,
}

/// The 4 character `<sub>` field, `N...` for plain files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmoduleState {
    pub is_submodule: bool,
    pub commit_changed: bool,
    pub tracked_changes: bool,
    pub untracked_changes: bool,
}

impl fmt::Display for SubmoduleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '.' };
        write!(
            f,
            "{}{}{}{}",
            if self.is_submodule { 'S' } else { 'N' },
            flag(self.commit_changed, 'C'),
            flag(self.tracked_changes, 'M'),
            flag(self.untracked_changes, 'U'),
        )
    }
}

/// Octal file mode, always printed with 6 digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileMode(pub u32);

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06o}", self.0)
    }
}

/// A 40 hex digit object name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectName(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreKind {
    Renamed,
    Copied,
}

/// Similarity between source and target of a rename or copy, e.g. `R100`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Score {
    pub kind: ScoreKind,
    /// The digits exactly as git printed them.
    pub percent: String,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ScoreKind::Renamed => 'R',
            ScoreKind::Copied => 'C',
        };
        write!(f, "{prefix}{}", self.percent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangedEntry {
    pub status: StatusPair,
    pub submodule: SubmoduleState,
    pub head_mode: FileMode,
    pub index_mode: FileMode,
    pub worktree_mode: FileMode,
    pub head_object: ObjectName,
    pub index_object: ObjectName,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenamedEntry {
    pub status: StatusPair,
    pub submodule: SubmoduleState,
    pub head_mode: FileMode,
    pub index_mode: FileMode,
    pub worktree_mode: FileMode,
    pub head_object: ObjectName,
    pub index_object: ObjectName,
    pub score: Score,
    /// Target path.
    pub path: String,
    /// Where the renamed or copied content came from.
    pub origin_path: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnmergedEntry {
    pub status: StatusPair,
    pub submodule: SubmoduleState,
    /// Modes of stages 1, 2 and 3.
    pub stage_modes: [FileMode; 3],
    pub worktree_mode: FileMode,
    /// Object names of stages 1, 2 and 3.
    pub stage_objects: [ObjectName; 3],
    pub path: String,
}

/// One non-header line of the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    Changed(ChangedEntry),
    RenamedOrCopied(RenamedEntry),
    Unmerged(UnmergedEntry),
    Untracked { path: String },
    Ignored { path: String },
    /// Any line no pattern recognized, kept verbatim.
    Unrecognized { line: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadCommit {
    Initial,
    Oid(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Head {
    Detached,
    Branch(String),
}

/// Fields collected from `# branch.*` header lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BranchState {
    pub commit: Option<HeadCommit>,
    pub head: Option<Head>,
    pub upstream: Option<String>,
    /// Commit counts, kept as the digits from the header.
    pub ahead: Option<String>,
    pub behind: Option<String>,
}

impl BranchState {
    pub fn is_empty(&self) -> bool {
        self.commit.is_none()
            && self.head.is_none()
            && self.upstream.is_none()
            && self.ahead.is_none()
            && self.behind.is_none()
    }

    pub fn apply(&mut self, field: BranchField) {
        match field {
            BranchField::Commit(commit) => self.commit = Some(commit),
            BranchField::Head(head) => self.head = Some(head),
            BranchField::Upstream(upstream) => self.upstream = Some(upstream),
            BranchField::AheadBehind { ahead, behind } => {
                self.ahead = Some(ahead);
                self.behind = Some(behind);
            }
        }
    }
}

/// A whole report, built in a single pass over the input lines.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub branch: BranchState,
    pub entries: Vec<Entry>,
}

impl StatusReport {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut report = StatusReport::default();
        for line in lines {
            report.push_line(line);
        }
        report
    }

    pub fn push_line(&mut self, line: &str) {
        match classify_line(line) {
            Outcome::Branch(field) => self.branch.apply(field),
            Outcome::UnknownHeader => {
                tracing::debug!("Dropping unknown header line: {}", line);
            }
            Outcome::Entry(entry) => {
                if let Entry::Unrecognized { ref line } = entry {
                    tracing::debug!("Unrecognized status line: {:?}", line);
                }
                self.entries.push(entry);
            }
        }
    }
}
