//! Balanced-tag HTML accumulator.
//!
//! # Responsibility
//! - Build indented HTML fragments for report pages.
//! - Escape text content so report data can never break the markup.
//!
//! # Invariants
//! - Tag names are non-empty and ASCII alphanumeric; anything else is rejected
//!   at `open_tag` time.
//! - Rendering fails while any opened tag is still unclosed.
//! - Class attributes never contain apostrophes.

use crate::report::indenter::Indenter;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by markup builder operations.
pub type HtmlResult<T> = Result<T, HtmlWriterError>;

/// Errors raised by [`HtmlWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlWriterError {
    /// Tag name is empty or contains a non-alphanumeric character.
    InvalidTagName(String),
    /// Rendering was requested while tags remain open (innermost last).
    UnclosedTags(Vec<String>),
}

impl Display for HtmlWriterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTagName(name) => {
                write!(f, "html tag name must be alphanumeric, got `{name}`")
            }
            Self::UnclosedTags(tags) => {
                write!(f, "cannot render html with unclosed tags: {}", tags.join(", "))
            }
        }
    }
}

impl Error for HtmlWriterError {}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn is_valid_tag_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|ch| ch.is_ascii_alphanumeric())
}

/// Stack-of-open-tags HTML builder.
#[derive(Debug, Clone, Default)]
pub struct HtmlWriter {
    tags: Vec<String>,
    class_prefix: String,
    body: Indenter,
}

impl HtmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer whose class attributes all start with `class_prefix`.
    pub fn with_class_prefix(class_prefix: impl Into<String>) -> Self {
        Self {
            class_prefix: class_prefix.into(),
            ..Self::default()
        }
    }

    /// Names of the currently open tags, outermost first.
    pub fn open_tags(&self) -> &[String] {
        &self.tags
    }

    /// Opens `<tag_name>` with an optional prefixed class and indents its body.
    pub fn open_tag(&mut self, tag_name: &str, class_name: &str) -> HtmlResult<&mut Self> {
        if !is_valid_tag_name(tag_name) {
            return Err(HtmlWriterError::InvalidTagName(tag_name.to_string()));
        }

        self.tags.push(tag_name.to_string());
        self.body.append_line(&format!("<{tag_name}"));

        let class = format!("{}{}", self.class_prefix, class_name).replace('\'', "");
        if !class.is_empty() {
            self.body.append_same_line(&format!(" class='{class}'"));
        }

        self.body.append_same_line(">").add_indent_default();
        Ok(self)
    }

    /// Closes the innermost open tag. No-op when nothing is open.
    pub fn close_tag(&mut self) -> &mut Self {
        if let Some(tag) = self.tags.pop() {
            self.body
                .remove_indent()
                .append_line(&format!("</{tag}>"));
        }
        self
    }

    /// Closes every open tag, innermost first.
    pub fn close_all_tags(&mut self) -> &mut Self {
        while !self.tags.is_empty() {
            self.close_tag();
        }
        self
    }

    /// Writes escaped text on its own line.
    pub fn append_text(&mut self, text: &str) -> &mut Self {
        self.body.append_line(&escape_html(text));
        self
    }

    /// Writes each escaped item on its own line.
    pub fn append_texts<I, S>(&mut self, texts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for text in texts {
            self.append_text(text.as_ref());
        }
        self
    }

    /// Embeds the rendered output of another, fully balanced writer.
    ///
    /// Empty writers contribute nothing.
    pub fn append_html(&mut self, html: &HtmlWriter) -> HtmlResult<&mut Self> {
        let rendered = html.render()?;
        if !rendered.is_empty() {
            self.body.append_line(&rendered);
        }
        Ok(self)
    }

    /// Embeds every writer in order.
    pub fn append_htmls<'a, I>(&mut self, htmls: I) -> HtmlResult<&mut Self>
    where
        I: IntoIterator<Item = &'a HtmlWriter>,
    {
        for html in htmls {
            self.append_html(html)?;
        }
        Ok(self)
    }

    /// Writes `<tag_name>` with escaped text content and closes it.
    pub fn append_element(
        &mut self,
        tag_name: &str,
        class_name: &str,
        text: &str,
    ) -> HtmlResult<&mut Self> {
        Ok(self.open_tag(tag_name, class_name)?.append_text(text).close_tag())
    }

    /// Writes `<tag_name>` with one escaped line per item and closes it.
    pub fn append_element_texts<I, S>(
        &mut self,
        tag_name: &str,
        class_name: &str,
        texts: I,
    ) -> HtmlResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.open_tag(tag_name, class_name)?.append_texts(texts).close_tag())
    }

    /// Writes `<tag_name>` wrapping the rendered output of nested writers.
    pub fn append_element_html<'a, I>(
        &mut self,
        tag_name: &str,
        class_name: &str,
        htmls: I,
    ) -> HtmlResult<&mut Self>
    where
        I: IntoIterator<Item = &'a HtmlWriter>,
    {
        Ok(self
            .open_tag(tag_name, class_name)?
            .append_htmls(htmls)?
            .close_tag())
    }

    /// Writes a `<br>` element, which has no closing tag.
    pub fn append_break(&mut self) -> &mut Self {
        self.body.append_line("<br>");
        self
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the document, failing while any tag is still open.
    pub fn render(&self) -> HtmlResult<String> {
        if !self.tags.is_empty() {
            return Err(HtmlWriterError::UnclosedTags(self.tags.clone()));
        }
        Ok(self.body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_html, HtmlWriter, HtmlWriterError};

    #[test]
    fn open_then_close_renders_balanced_div() {
        let mut writer = HtmlWriter::new();
        writer.open_tag("div", "").unwrap().close_tag();
        assert_eq!(writer.render().unwrap(), "<div>\n</div>");
    }

    #[test]
    fn render_with_open_tag_fails() {
        let mut writer = HtmlWriter::new();
        writer.open_tag("div", "").unwrap();
        assert_eq!(
            writer.render().unwrap_err(),
            HtmlWriterError::UnclosedTags(vec!["div".to_string()])
        );

        writer.close_tag();
        assert!(writer.render().is_ok());
    }

    #[test]
    fn invalid_tag_names_are_rejected_without_side_effects() {
        let mut writer = HtmlWriter::new();
        for name in ["", "my-tag", "p class", "<p>", "tag_name"] {
            let err = writer.open_tag(name, "").unwrap_err();
            assert_eq!(err, HtmlWriterError::InvalidTagName(name.to_string()));
        }
        assert!(writer.open_tags().is_empty());
        assert!(writer.is_empty());
    }

    #[test]
    fn element_with_text_lines_escapes_each_line() {
        let mut writer = HtmlWriter::new();
        writer
            .append_element_texts("p", "Inks", ["[Text]: a<b", "[Drawing]"])
            .unwrap();
        assert_eq!(
            writer.render().unwrap(),
            "<p class='Inks'>\n    [Text]: a&lt;b\n    [Drawing]\n</p>"
        );
    }

    #[test]
    fn element_with_bad_tag_name_writes_nothing() {
        let mut writer = HtmlWriter::new();
        let empty: [&str; 0] = [];
        assert!(matches!(
            writer.append_element_texts("my-p", "", empty),
            Err(HtmlWriterError::InvalidTagName(_))
        ));
        assert!(writer.is_empty());
    }

    #[test]
    fn class_prefix_is_prepended_and_apostrophes_stripped() {
        let mut writer = HtmlWriter::with_class_prefix("report");
        writer.append_element("p", "O'Header", "x").unwrap();
        assert_eq!(
            writer.render().unwrap(),
            "<p class='reportOHeader'>\n    x\n</p>"
        );
    }

    #[test]
    fn prefix_alone_still_emits_class() {
        let mut writer = HtmlWriter::with_class_prefix("full");
        writer.open_tag("td", "").unwrap().close_tag();
        assert_eq!(writer.render().unwrap(), "<td class='full'>\n</td>");
    }

    #[test]
    fn text_is_escaped_exactly_once() {
        let mut writer = HtmlWriter::new();
        writer.append_text("a < b & \"c\" > d &amp;");
        assert_eq!(
            writer.render().unwrap(),
            "a &lt; b &amp; &quot;c&quot; &gt; d &amp;amp;"
        );
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn nested_elements_are_indented() {
        let mut writer = HtmlWriter::new();
        writer
            .open_tag("tr", "Row")
            .unwrap()
            .append_element("td", "Cell", "one")
            .unwrap()
            .close_tag();

        assert_eq!(
            writer.render().unwrap(),
            "<tr class='Row'>\n    <td class='Cell'>\n        one\n    </td>\n</tr>"
        );
    }

    #[test]
    fn close_tag_without_open_tags_is_noop() {
        let mut writer = HtmlWriter::new();
        writer.close_tag().close_all_tags();
        assert_eq!(writer.render().unwrap(), "");
    }

    #[test]
    fn close_all_tags_unwinds_stack() {
        let mut writer = HtmlWriter::new();
        writer
            .open_tag("div", "")
            .unwrap()
            .open_tag("table", "")
            .unwrap()
            .open_tag("tr", "")
            .unwrap()
            .close_all_tags();

        assert_eq!(
            writer.render().unwrap(),
            "<div>\n    <table>\n        <tr>\n        </tr>\n    </table>\n</div>"
        );
    }

    #[test]
    fn nested_writers_keep_alignment() {
        let mut inner = HtmlWriter::new();
        inner.append_element("li", "", "item").unwrap();

        let mut outer = HtmlWriter::new();
        outer.append_element_html("ul", "", [&inner]).unwrap();

        assert_eq!(
            outer.render().unwrap(),
            "<ul>\n    <li>\n        item\n    </li>\n</ul>"
        );
    }

    #[test]
    fn appending_unbalanced_writer_fails() {
        let mut inner = HtmlWriter::new();
        inner.open_tag("p", "").unwrap();

        let mut outer = HtmlWriter::new();
        assert!(matches!(
            outer.append_html(&inner),
            Err(HtmlWriterError::UnclosedTags(_))
        ));
    }

    #[test]
    fn break_has_no_closing_tag() {
        let mut writer = HtmlWriter::new();
        writer.append_text("a").append_break();
        assert_eq!(writer.render().unwrap(), "a\n<br>");
    }
}
