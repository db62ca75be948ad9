//! Rendering of tagged serial log lines.

use chrono::{DateTime, Local};

use super::{
    colors::{Style, theme},
    line::Line,
    palette::TagPalette,
};
use crate::uartlog::{LogLine, LogRecord, RecordKind};

pub const DEFAULT_WIDTH: usize = 134;
pub const DEFAULT_TAG_WIDTH: usize = 10;
/// Width of the reception time column, trailing space included.
const TIME_WIDTH: usize = 19;

/// Reception time as printed in front of every record, e.g. `08-31 10:55:02.357`.
pub fn reception_time(now: DateTime<Local>) -> String {
    now.format("%m-%d %H:%M:%S%.3f").to_string()
}

pub struct LogRenderer {
    palette: TagPalette,
    width: usize,
    tag_width: usize,
}

impl LogRenderer {
    pub fn new(palette: TagPalette, width: usize, tag_width: usize) -> Self {
        Self {
            palette,
            width,
            tag_width,
        }
    }

    fn header_size(&self) -> usize {
        self.tag_width.saturating_add(TIME_WIDTH)
    }

    /// Characters of message per output line.
    fn wrap_area(&self) -> usize {
        self.width.saturating_sub(self.header_size().saturating_add(3)).max(1)
    }

    pub fn render(&mut self, line: &LogLine, timestamp: &str) -> Vec<Line> {
        match line {
            LogLine::Passthrough(raw) => vec![Line::raw(raw)],
            LogLine::Record(record) => self.render_record(record, timestamp),
        }
    }

    fn render_record(&mut self, record: &LogRecord, timestamp: &str) -> Vec<Line> {
        let tag = record.tag.trim();
        let tag_style = match record.kind {
            RecordKind::Boot => Style::fg(theme::BOOT_TAG),
            _ if tag.is_empty() => Style::PLAIN,
            _ => Style::fg(self.palette.allocate(tag)),
        };

        // Keep the end of long tags, right aligned.
        let skip = tag.chars().count().saturating_sub(self.tag_width);
        let tag: String = tag.chars().skip(skip).collect();
        let header = Line::new()
            .span(timestamp, theme::TIMESTAMP)
            .text(" ")
            .span(format!("{tag:>width$}", width = self.tag_width), tag_style)
            .text(" ");

        let chars: Vec<char> = record.message.chars().collect();
        if chars.is_empty() {
            return vec![header];
        }

        let indent = " ".repeat(self.header_size() + 1);
        chars
            .chunks(self.wrap_area())
            .enumerate()
            .map(|(i, chunk)| {
                let start = if i == 0 {
                    header.clone()
                } else {
                    Line::raw(indent.as_str())
                };
                start
                    .span(" ", theme::GUTTER)
                    .text(" ")
                    .text(chunk.iter().collect::<String>())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use colored::Color;
    use pretty_assertions::assert_eq;

    use super::*;

    const TIME: &str = "08-31 10:55:02.357";

    fn record(kind: RecordKind, tag: &str, message: &str) -> LogLine {
        LogLine::Record(LogRecord {
            kind,
            tag: tag.to_string(),
            message: message.to_string(),
        })
    }

    fn plain(lines: Vec<Line>) -> Vec<String> {
        lines.iter().map(Line::plain).collect()
    }

    #[test]
    fn test_reception_time_format() {
        let now = Local
            .with_ymd_and_hms(2024, 8, 31, 10, 55, 2)
            .single()
            .unwrap();
        assert_eq!(reception_time(now), "08-31 10:55:02.000");
        assert_eq!(reception_time(now).len() + 1, TIME_WIDTH);
    }

    #[test]
    fn test_tagged_record_layout() {
        let mut renderer = LogRenderer::new(TagPalette::default(), 134, 10);
        let lines = renderer.render(&record(RecordKind::Tagged, "wifi", "connected"), TIME);
        assert_eq!(plain(lines), vec![format!("{TIME} {:>10}   connected", "wifi")]);
    }

    #[test]
    fn test_long_tag_keeps_its_end() {
        let mut renderer = LogRenderer::new(TagPalette::default(), 134, 4);
        let lines = renderer.render(&record(RecordKind::Tagged, "bluetooth", "up"), TIME);
        assert_eq!(plain(lines), vec![format!("{TIME} {:>4}   up", "ooth")]);
    }

    #[test]
    fn test_huge_tag_width_saturates() {
        let renderer = LogRenderer::new(TagPalette::default(), 80, usize::MAX);
        assert_eq!(renderer.header_size(), usize::MAX);
        assert_eq!(renderer.wrap_area(), 1);
    }

    #[test]
    fn test_long_message_wraps_under_message_column() {
        // header = 10 + 19 = 29, wrap area = 40 - 32 = 8
        let mut renderer = LogRenderer::new(TagPalette::default(), 40, 10);
        let lines = plain(renderer.render(
            &record(RecordKind::Tagged, "net", "0123456789abcdefXYZ"),
            TIME,
        ));
        let indent = " ".repeat(30);
        assert_eq!(
            lines,
            vec![
                format!("{TIME} {:>10}   01234567", "net"),
                format!("{indent}  89abcdef"),
                format!("{indent}  XYZ"),
            ]
        );
        // Continuation text starts in the same column as the first chunk.
        assert_eq!(lines[0].find("0123"), lines[1].find("89ab"));
    }

    #[test]
    fn test_empty_message_renders_header_only() {
        let mut renderer = LogRenderer::new(TagPalette::default(), 134, 10);
        let lines = plain(renderer.render(&record(RecordKind::Tagged, "x", ""), TIME));
        assert_eq!(lines, vec![format!("{TIME} {:>10} ", "x")]);
    }

    #[test]
    fn test_boot_tag_is_red_and_does_not_consume_palette() {
        let mut renderer = LogRenderer::new(TagPalette::default(), 134, 10);
        let boot = renderer.render(&record(RecordKind::Boot, "boot", "v1.2"), TIME);
        assert_eq!(boot[0].spans()[2].style, Style::fg(Color::Red));

        let tagged = renderer.render(&record(RecordKind::Tagged, "app", "hi"), TIME);
        assert_eq!(tagged[0].spans()[2].style, Style::fg(Color::Red));
        let tagged = renderer.render(&record(RecordKind::Tagged, "sys", "hi"), TIME);
        assert_eq!(tagged[0].spans()[2].style, Style::fg(Color::Green));
    }

    #[test]
    fn test_passthrough_is_verbatim() {
        let mut renderer = LogRenderer::new(TagPalette::default(), 134, 10);
        let lines = renderer.render(&LogLine::Passthrough("fn(a) -> b".to_string()), TIME);
        assert_eq!(lines, vec![Line::raw("fn(a) -> b")]);
    }

    #[test]
    fn test_styled_matches_plain_without_escapes() {
        colored::control::set_override(true);
        let mut renderer = LogRenderer::new(TagPalette::default(), 134, 10);
        let lines = renderer.render(&record(RecordKind::Tagged, "wifi", "connected"), TIME);
        let styled = lines[0].styled();
        let stripped = regex::Regex::new(r"\x1b\[[0-9;]*m")
            .unwrap()
            .replace_all(&styled, "")
            .into_owned();
        assert_eq!(stripped, lines[0].plain());
    }
}
