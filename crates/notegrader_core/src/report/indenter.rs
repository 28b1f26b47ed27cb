//! Indentation-aware text accumulator.
//!
//! # Responsibility
//! - Build multi-line plain-text reports with nested indentation levels.
//! - Keep embedded multi-line blocks aligned with the current indent.
//!
//! # Invariants
//! - The current indent is always the concatenation of the pushed indents.
//! - Removing an indent from an empty stack is a no-op.
//! - Output is returned exactly as built, with no trailing normalization.

use std::fmt::{Display, Formatter};

/// Default indent pushed by [`Indenter::add_indent_default`].
pub const DEFAULT_INDENT: &str = "    ";

/// Stack-of-indents text builder.
///
/// Every mutation returns `&mut Self` so calls can be chained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indenter {
    indents: Vec<String>,
    current_indent: String,
    output: String,
}

impl Indenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose first line is `text`.
    pub fn with_line(text: &str) -> Self {
        let mut indenter = Self::new();
        indenter.append_line(text);
        indenter
    }

    /// Pushes `indent` onto the indent stack.
    pub fn add_indent(&mut self, indent: &str) -> &mut Self {
        self.current_indent.push_str(indent);
        self.indents.push(indent.to_string());
        self
    }

    /// Pushes four spaces onto the indent stack.
    pub fn add_indent_default(&mut self) -> &mut Self {
        self.add_indent(DEFAULT_INDENT)
    }

    /// Pops the most recently pushed indent, if any.
    pub fn remove_indent(&mut self) -> &mut Self {
        if let Some(indent) = self.indents.pop() {
            let keep = self.current_indent.len() - indent.len();
            self.current_indent.truncate(keep);
        }
        self
    }

    /// Number of indents currently pushed.
    pub fn depth(&self) -> usize {
        self.indents.len()
    }

    /// Appends `text` verbatim, re-indenting every embedded newline.
    pub fn append_same_line(&mut self, text: &str) -> &mut Self {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.output.push_str(first);
        }
        for line in lines {
            self.output.push('\n');
            self.output.push_str(&self.current_indent);
            self.output.push_str(line);
        }
        self
    }

    /// Starts a new indented line and appends `text` to it.
    pub fn append_line(&mut self, text: &str) -> &mut Self {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output.push_str(&self.current_indent);
        self.append_same_line(text)
    }

    /// Appends each item as its own line, in order.
    pub fn append_lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.append_line(line.as_ref());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

impl Display for Indenter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::Indenter;

    #[test]
    fn append_line_separates_with_newlines_and_indents() {
        let mut indenter = Indenter::new();
        indenter
            .append_line("root")
            .add_indent_default()
            .append_line("child")
            .add_indent("|   ")
            .append_line("leaf")
            .remove_indent()
            .remove_indent()
            .append_line("sibling");

        assert_eq!(
            indenter.to_string(),
            "root\n    child\n    |   leaf\nsibling"
        );
    }

    #[test]
    fn first_line_has_no_leading_newline_even_when_indented() {
        let mut indenter = Indenter::new();
        indenter.add_indent("  ").append_line("a");
        assert_eq!(indenter.as_str(), "  a");
    }

    #[test]
    fn remove_indent_on_empty_stack_is_noop() {
        let mut indenter = Indenter::new();
        indenter
            .remove_indent()
            .append_line("a")
            .add_indent("--")
            .remove_indent()
            .remove_indent()
            .append_line("b");

        assert_eq!(indenter.as_str(), "a\nb");
        assert_eq!(indenter.depth(), 0);
    }

    #[test]
    fn embedded_newlines_follow_current_indent() {
        let block = Indenter::with_line("head").append_line("tail").to_string();

        let mut outer = Indenter::with_line("top");
        outer.add_indent_default().append_line(&block);

        assert_eq!(outer.as_str(), "top\n    head\n    tail");
    }

    #[test]
    fn append_same_line_continues_current_line() {
        let mut indenter = Indenter::with_line("name");
        indenter.append_same_line(" (deleted)");
        assert_eq!(indenter.as_str(), "name (deleted)");
    }

    #[test]
    fn append_lines_keeps_order() {
        let mut indenter = Indenter::new();
        indenter.add_indent("- ").append_lines(["one", "two", "three"]);
        assert_eq!(indenter.as_str(), "- one\n- two\n- three");
    }

    #[test]
    fn empty_first_line_leaves_buffer_empty() {
        let mut indenter = Indenter::with_line("");
        assert!(indenter.is_empty());
        indenter.append_line("x");
        assert_eq!(indenter.as_str(), "x");
    }

    #[test]
    fn trailing_blank_line_is_preserved() {
        let mut indenter = Indenter::with_line("a");
        indenter.append_line("");
        assert_eq!(indenter.into_string(), "a\n");
    }
}
