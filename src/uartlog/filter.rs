use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use super::LogLine;

/// Keeps the records whose tag or message matches the configured expressions.
#[derive(Debug, Default)]
pub struct LogFilter {
    tag: Option<Regex>,
    message: Option<Regex>,
}

impl LogFilter {
    /// `any` applies to both the tag and the message unless a more specific
    /// expression is given.
    pub fn new(
        tag: Option<&str>,
        message: Option<&str>,
        any: Option<&str>,
        ignore_case: bool,
    ) -> Result<Self> {
        let build = |pattern: Option<&str>| -> Result<Option<Regex>> {
            pattern
                .map(|pattern| {
                    RegexBuilder::new(pattern)
                        .case_insensitive(ignore_case)
                        .build()
                        .with_context(|| format!("invalid filter expression {pattern:?}"))
                })
                .transpose()
        };
        Ok(Self {
            tag: build(tag.or(any))?,
            message: build(message.or(any))?,
        })
    }

    /// Passthrough lines are always kept. With both expressions set a record
    /// needs to match either one.
    pub fn accepts(&self, line: &LogLine) -> bool {
        let LogLine::Record(record) = line else {
            return true;
        };
        let tag = self.tag.as_ref().map(|re| re.is_match(&record.tag));
        let message = self.message.as_ref().map(|re| re.is_match(&record.message));
        match (tag, message) {
            (None, None) => true,
            (Some(matched), None) | (None, Some(matched)) => matched,
            (Some(tag), Some(message)) => tag || message,
        }
    }
}
