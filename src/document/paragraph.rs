//! Paragraph types.
use std::fmt::Write as FmtWrite;

use smallvec::SmallVec;

use crate::error::Result;

use super::bookmark::{Bookmark, bookmark_end_to_xml};
use super::format::{Justification, escape_xml};
use super::run::Run;

/// A child element of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphChild {
    Run(Run),
    BookmarkStart(Bookmark),
    BookmarkEnd(u32),
}

/// A paragraph: a sequence of runs and bookmark markers plus formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub(crate) children: SmallVec<[ParagraphChild; 4]>,
    pub(crate) properties: ParagraphProperties,
}

impl Paragraph {
    /// Create an empty paragraph.
    pub fn new() -> Self {
        Self {
            children: SmallVec::new(),
            properties: ParagraphProperties::default(),
        }
    }

    /// Create a paragraph holding a single text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut paragraph = Self::new();
        paragraph.push_run(Run::with_text(text));
        paragraph
    }

    /// Append a run.
    pub fn push_run(&mut self, run: Run) -> &mut Self {
        self.children.push(ParagraphChild::Run(run));
        self
    }

    /// Append a bookmark start marker.
    pub fn push_bookmark_start(&mut self, bookmark: Bookmark) -> &mut Self {
        self.children.push(ParagraphChild::BookmarkStart(bookmark));
        self
    }

    /// Append a bookmark end marker.
    pub fn push_bookmark_end(&mut self, id: u32) -> &mut Self {
        self.children.push(ParagraphChild::BookmarkEnd(id));
        self
    }

    /// Set paragraph justification.
    pub fn justification(&mut self, justification: Justification) -> &mut Self {
        self.properties.justification = Some(justification);
        self
    }

    /// Set the paragraph style id.
    pub fn style(&mut self, style_id: &str) -> &mut Self {
        self.properties.style = Some(style_id.to_string());
        self
    }

    /// Indent the first line, in hundredths of a character (200 = 2 chars).
    pub fn first_line_chars(&mut self, hundredths: u32) -> &mut Self {
        self.properties.first_line_chars = Some(hundredths);
        self
    }

    /// The paragraph children.
    pub fn children(&self) -> &[ParagraphChild] {
        &self.children
    }

    /// Concatenated text of all text runs.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let ParagraphChild::Run(run) = child
                && let Some(text) = run.text()
            {
                out.push_str(text);
            }
        }
        out
    }

    /// The run at `child_index`, if that child is a run.
    pub(crate) fn run(&self, child_index: usize) -> Option<&Run> {
        match self.children.get(child_index) {
            Some(ParagraphChild::Run(run)) => Some(run),
            _ => None,
        }
    }

    pub(crate) fn run_mut(&mut self, child_index: usize) -> Option<&mut Run> {
        match self.children.get_mut(child_index) {
            Some(ParagraphChild::Run(run)) => Some(run),
            _ => None,
        }
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:p>");

        if self.properties.has_properties() {
            xml.push_str("<w:pPr>");

            if let Some(ref style) = self.properties.style {
                write!(xml, "<w:pStyle w:val=\"{}\"/>", escape_xml(style))?;
            }

            if let Some(justification) = self.properties.justification {
                write!(xml, "<w:jc w:val=\"{}\"/>", justification.as_str())?;
            }

            if let Some(hundredths) = self.properties.first_line_chars {
                write!(xml, "<w:ind w:firstLineChars=\"{hundredths}\"/>")?;
            }

            xml.push_str("</w:pPr>");
        }

        for child in &self.children {
            match child {
                ParagraphChild::Run(run) => run.to_xml(xml)?,
                ParagraphChild::BookmarkStart(bookmark) => bookmark.to_xml(xml)?,
                ParagraphChild::BookmarkEnd(id) => bookmark_end_to_xml(*id, xml)?,
            }
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Paragraph-level formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParagraphProperties {
    pub(crate) justification: Option<Justification>,
    pub(crate) style: Option<String>,
    pub(crate) first_line_chars: Option<u32>,
}

impl ParagraphProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.justification.is_some() || self.style.is_some() || self.first_line_chars.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_concatenation() {
        let mut paragraph = Paragraph::new();
        paragraph.push_run(Run::with_text("Hello, "));
        paragraph.push_bookmark_start(Bookmark::new(1, "mid"));
        paragraph.push_run(Run::with_text("world"));
        paragraph.push_bookmark_end(1);
        assert_eq!(paragraph.text(), "Hello, world");
    }

    #[test]
    fn test_paragraph_xml_ordering() {
        let mut paragraph = Paragraph::with_text("x");
        paragraph.justification(Justification::Center);
        let mut xml = String::new();
        paragraph.to_xml(&mut xml).unwrap();
        assert!(xml.starts_with("<w:p><w:pPr><w:jc w:val=\"center\"/></w:pPr>"));
        assert!(xml.ends_with("</w:p>"));
    }

    #[test]
    fn test_first_line_chars_raw_units() {
        let mut paragraph = Paragraph::with_text("x");
        paragraph.first_line_chars(200);
        let mut xml = String::new();
        paragraph.to_xml(&mut xml).unwrap();
        assert!(xml.contains("w:firstLineChars=\"200\""));
    }
}
