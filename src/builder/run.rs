//! Fluent run construction.
use crate::document::{Run, UnderlineStyle};

/// Builds a [`Run`] with character formatting.
///
/// # Examples
///
/// ```rust
/// use loquat::RunBuilder;
///
/// let run = RunBuilder::new().text("total").bold(true).font_size(10.5).build();
/// assert_eq!(run.text(), Some("total"));
/// ```
#[derive(Debug, Default)]
pub struct RunBuilder {
    run: Run,
}

impl RunBuilder {
    pub fn new() -> Self {
        Self { run: Run::new() }
    }

    /// Set the text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.run.set_text(text);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.run.bold(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.run.italic(italic);
        self
    }

    pub fn underline(mut self, style: UnderlineStyle) -> Self {
        self.run.underline(style);
        self
    }

    /// Font size in points. Stored as half-points with the same rounding
    /// Word applies, so 10.5pt becomes 21.
    pub fn font_size(mut self, points: f32) -> Self {
        self.run.font_size((points * 2.0 + 0.5) as u32);
        self
    }

    /// Font name, applied to ASCII and East-Asian scripts alike.
    pub fn font(mut self, name: &str) -> Self {
        self.run.font_name(name);
        self
    }

    /// Text color as hex RGB, e.g. `"FF0000"`.
    pub fn color(mut self, color: &str) -> Self {
        self.run.color(color);
        self
    }

    pub fn build(self) -> Run {
        self.run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_half_point_rounding() {
        let run = RunBuilder::new().text("x").font_size(10.5).build();
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        assert!(xml.contains("<w:sz w:val=\"21\"/>"));

        let run = RunBuilder::new().text("x").font_size(12.0).build();
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        assert!(xml.contains("<w:sz w:val=\"24\"/>"));
    }

    #[test]
    fn test_font_applies_to_both_scripts() {
        let run = RunBuilder::new().text("字").font("宋体").build();
        let mut xml = String::new();
        run.to_xml(&mut xml).unwrap();
        assert!(xml.contains("w:ascii=\"宋体\""));
        assert!(xml.contains("w:eastAsia=\"宋体\""));
    }
}
