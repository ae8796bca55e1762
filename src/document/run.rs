//! Run types: the unit of character formatting and of replacement.
use std::fmt::Write as FmtWrite;

use crate::error::Result;

use super::format::{UnderlineStyle, escape_xml};
use super::image::InlineImage;

/// Run content type.
#[derive(Debug, Clone, PartialEq)]
pub enum RunContent {
    /// Plain text
    Text(String),
    /// Tab character
    Tab,
    /// Page break
    PageBreak,
    /// Inline picture
    Picture(InlineImage),
}

/// A text run.
///
/// Runs carry text (or a picture/tab/break) plus character formatting, and
/// are the containers the locator hands back for replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub(crate) content: RunContent,
    pub(crate) properties: RunProperties,
}

impl Run {
    /// Create an empty text run.
    pub fn new() -> Self {
        Self {
            content: RunContent::Text(String::new()),
            properties: RunProperties::default(),
        }
    }

    /// Create a run holding `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: RunContent::Text(text.into()),
            properties: RunProperties::default(),
        }
    }

    /// Create a run holding an inline picture.
    pub fn with_picture(image: InlineImage) -> Self {
        Self {
            content: RunContent::Picture(image),
            properties: RunProperties::default(),
        }
    }

    /// Replace the text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = RunContent::Text(text.into());
    }

    /// The text content, or `None` for non-text runs.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            RunContent::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The run content.
    pub fn content(&self) -> &RunContent {
        &self.content
    }

    /// Make the text bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        self.properties.bold = Some(bold);
        self
    }

    /// Make the text italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        self.properties.italic = Some(italic);
        self
    }

    /// Set underline style.
    pub fn underline(&mut self, style: UnderlineStyle) -> &mut Self {
        self.properties.underline = Some(style);
        self
    }

    /// Set font size in half-points (e.g. 24 = 12pt).
    pub fn font_size(&mut self, size: u32) -> &mut Self {
        self.properties.font_size = Some(size);
        self
    }

    /// Set the font name, applied to both ASCII and East-Asian scripts.
    pub fn font_name(&mut self, name: &str) -> &mut Self {
        self.properties.font_name = Some(name.to_string());
        self
    }

    /// Set text color as hex RGB (e.g. "FF0000").
    pub fn color(&mut self, color: &str) -> &mut Self {
        self.properties.color = Some(color.to_string());
        self
    }

    /// Whether this run contributes a text leaf to locator traversal.
    pub(crate) fn is_text(&self) -> bool {
        matches!(self.content, RunContent::Text(_))
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:r>");

        if self.properties.has_properties() {
            xml.push_str("<w:rPr>");

            if let Some(ref font_name) = self.properties.font_name {
                let name = escape_xml(font_name);
                write!(
                    xml,
                    "<w:rFonts w:ascii=\"{name}\" w:hAnsi=\"{name}\" w:eastAsia=\"{name}\"/>"
                )?;
            }

            if let Some(bold) = self.properties.bold
                && bold
            {
                xml.push_str("<w:b/>");
            }

            if let Some(italic) = self.properties.italic
                && italic
            {
                xml.push_str("<w:i/>");
            }

            if let Some(underline) = self.properties.underline {
                write!(xml, "<w:u w:val=\"{}\"/>", underline.as_str())?;
            }

            if let Some(size) = self.properties.font_size {
                write!(xml, "<w:sz w:val=\"{size}\"/>")?;
            }

            if let Some(ref color) = self.properties.color {
                write!(xml, "<w:color w:val=\"{color}\"/>")?;
            }

            xml.push_str("</w:rPr>");
        }

        match &self.content {
            RunContent::Text(text) if !text.is_empty() => {
                write!(
                    xml,
                    "<w:t xml:space=\"preserve\">{}</w:t>",
                    escape_xml(text)
                )?;
            },
            RunContent::Tab => xml.push_str("<w:tab/>"),
            RunContent::PageBreak => xml.push_str("<w:br w:type=\"page\"/>"),
            RunContent::Picture(image) => image.to_xml(xml, "rId1")?,
            _ => {},
        }

        xml.push_str("</w:r>");
        Ok(())
    }
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}

/// Character formatting for a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunProperties {
    pub(crate) bold: Option<bool>,
    pub(crate) italic: Option<bool>,
    pub(crate) underline: Option<UnderlineStyle>,
    pub(crate) font_size: Option<u32>,
    pub(crate) font_name: Option<String>,
    pub(crate) color: Option<String>,
}

impl RunProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.font_size.is_some()
            || self.font_name.is_some()
            || self.color.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_run_xml() {
        let mut run = Run::with_text("hello & <world>");
        run.bold(true);
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("hello &amp; &lt;world&gt;"));
        assert!(xml.contains("xml:space=\"preserve\""));
    }

    #[test]
    fn test_empty_text_run_emits_no_text_element() {
        let run = Run::new();
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        assert_eq!(xml, "<w:r></w:r>");
    }

    #[test]
    fn test_non_text_runs_are_not_leaves() {
        assert!(Run::with_text("x").is_text());
        let mut tab = Run::new();
        tab.content = RunContent::Tab;
        assert!(!tab.is_text());
    }
}
