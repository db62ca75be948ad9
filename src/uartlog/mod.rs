//! Tagged serial log lines: `[TAG] MESSAGE`, as printed by firmware on a UART.
//!
//! Boot banners look like `(@)<tag> <message>`. Lines may start with a stray
//! carriage return, which is ignored. Anything containing a `(` that isn't a
//! boot banner is passed through untouched.

mod filter;

use std::sync::LazyLock;

use crate::rules::{Rule, first_match, text};

pub use filter::LogFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Boot,
    Tagged,
    TagOnly,
    Untagged,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub kind: RecordKind,
    pub tag: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogLine {
    Record(LogRecord),
    Passthrough(String),
}

fn record(kind: RecordKind, tag: String, message: String) -> LogRecord {
    LogRecord { kind, tag, message }
}

static LOG_RULES: LazyLock<[Rule<LogRecord>; 4]> = LazyLock::new(|| {
    [
        Rule::new("boot", r"^\r?\(@\)(?P<tag>.*) (?P<message>.*)$", |c| {
            Some(record(RecordKind::Boot, text(c, "tag")?, text(c, "message")?))
        }),
        Rule::new("tagged", r"^\r?\[(?P<tag>[^(]+?)\] (?P<message>.*)$", |c| {
            Some(record(RecordKind::Tagged, text(c, "tag")?, text(c, "message")?))
        }),
        Rule::new("tag_only", r"^\r?\[(?P<tag>[^(]+?)\](?P<rest>.*)$", |c| {
            let rest = c.name("rest")?.as_str().trim();
            let message = if rest.is_empty() { " " } else { rest };
            Some(record(RecordKind::TagOnly, text(c, "tag")?, message.to_string()))
        }),
        Rule::new("untagged", r"^\r?(?P<message>[^(]+)$", |c| {
            Some(record(RecordKind::Untagged, String::new(), text(c, "message")?))
        }),
    ]
});

pub fn classify_log_line(line: &str) -> LogLine {
    match first_match(&*LOG_RULES, line) {
        Some(record) => LogLine::Record(record),
        None => LogLine::Passthrough(line.to_string()),
    }
}
