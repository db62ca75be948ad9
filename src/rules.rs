//! Ordered "first match wins" rule tables used by the line classifiers.

use regex::{Captures, Regex};

/// One line shape: a pattern and an extractor that turns its captures into a
/// typed value. An extractor returning `None` lets the next rule try.
pub(crate) struct Rule<T> {
    name: &'static str,
    pattern: Regex,
    extract: fn(&Captures<'_>) -> Option<T>,
}

impl<T> Rule<T> {
    /// Patterns are built-in constants; a bad one is a programming error.
    pub(crate) fn new(
        name: &'static str,
        pattern: &str,
        extract: fn(&Captures<'_>) -> Option<T>,
    ) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|error| panic!("invalid {name} pattern {pattern:?}: {error}"));
        Rule {
            name,
            pattern,
            extract,
        }
    }

    pub(crate) fn apply(&self, line: &str) -> Option<T> {
        let captures = self.pattern.captures(line)?;
        let value = (self.extract)(&captures);
        if value.is_some() {
            tracing::trace!(rule = self.name, "classified line");
        }
        value
    }
}

/// Try each rule in order and return the first extracted value.
pub(crate) fn first_match<T>(rules: &[Rule<T>], line: &str) -> Option<T> {
    rules.iter().find_map(|rule| rule.apply(line))
}

/// Owned text of a named capture group.
pub(crate) fn text(captures: &Captures<'_>, name: &str) -> Option<String> {
    captures.name(name).map(|m| m.as_str().to_string())
}
