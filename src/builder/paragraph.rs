//! Fluent paragraph construction.
use crate::document::{Justification, Paragraph, Run};

use super::run::RunBuilder;

/// Builds a [`Paragraph`] from runs plus paragraph-level formatting.
#[derive(Debug, Default)]
pub struct ParagraphBuilder {
    paragraph: Paragraph,
}

impl ParagraphBuilder {
    pub fn new() -> Self {
        Self {
            paragraph: Paragraph::new(),
        }
    }

    /// Set the paragraph style id.
    pub fn style(mut self, style_id: &str) -> Self {
        self.paragraph.style(style_id);
        self
    }

    pub fn justification(mut self, justification: Justification) -> Self {
        self.paragraph.justification(justification);
        self
    }

    /// Indent the first line. 200 (two characters) is the conventional
    /// Chinese body-text indent.
    pub fn first_line_chars(mut self, hundredths: u32) -> Self {
        self.paragraph.first_line_chars(hundredths);
        self
    }

    /// Append a plain text run. Empty text appends nothing.
    pub fn text(self, text: &str) -> Self {
        self.formatted_text(text, false, None, None)
    }

    /// Append a text run with inline formatting. Empty text appends nothing.
    pub fn formatted_text(
        mut self,
        text: &str,
        bold: bool,
        font_size: Option<f32>,
        font: Option<&str>,
    ) -> Self {
        if !text.is_empty() {
            let mut run = RunBuilder::new().text(text).bold(bold);
            if let Some(points) = font_size {
                run = run.font_size(points);
            }
            if let Some(name) = font {
                run = run.font(name);
            }
            self.paragraph.push_run(run.build());
        }
        self
    }

    /// Append an already-built run.
    pub fn run(mut self, run: Run) -> Self {
        self.paragraph.push_run(run);
        self
    }

    pub fn build(self) -> Paragraph {
        self.paragraph
    }
}
