//! Styled output lines.
//!
//! Renderers build a [`Line`] of styled spans once; the output layer then
//! prints it styled for the terminal and plain for the mirror file, so both
//! always carry the same text.

use super::colors::Style;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line printed exactly as given, without any styling.
    pub fn raw(text: impl Into<String>) -> Self {
        Self::new().text(text)
    }

    pub fn span(mut self, text: impl Into<String>, style: Style) -> Self {
        self.spans.push(Span {
            text: text.into(),
            style,
        });
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.span(text, Style::PLAIN)
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn plain(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn styled(&self) -> String {
        self.spans
            .iter()
            .map(|span| span.style.apply(&span.text).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use colored::Color;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_concatenates_span_text() {
        let line = Line::new()
            .span("M", Style::fg(Color::Green))
            .span(".", Style::fg(Color::Red))
            .text(" ")
            .text("src/lib.rs");
        assert_eq!(line.plain(), "M. src/lib.rs");
        assert_eq!(line.spans().len(), 4);
    }

    #[test]
    fn test_raw_line_has_no_styling() {
        colored::control::set_override(true);
        let line = Line::raw("some garbage line");
        assert_eq!(line.styled(), "some garbage line");
        assert_eq!(line.plain(), "some garbage line");
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(Line::new().plain(), "");
        assert_eq!(Line::new().styled(), "");
    }
}
