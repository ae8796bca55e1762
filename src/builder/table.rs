//! Fluent table construction from string data.
use crate::document::{Block, Cell, Justification, Row, Table, VerticalAlignment};
use crate::error::{Error, Result};

use super::paragraph::ParagraphBuilder;

/// Separator that splits one cell value into several paragraphs.
pub const CELL_SPLIT_SEPARATOR: &str = "#$$#";

/// Builds a [`Table`] from textual row data.
///
/// Column-scoped settings (`widths`, `justifications`) accept either a
/// single value applied to every column or one value per column; any other
/// length fails `build`.
///
/// # Examples
///
/// ```rust
/// use loquat::TableBuilder;
///
/// let table = TableBuilder::new()
///     .header(vec!["name".into(), "score".into()])
///     .row(vec!["alice".into(), "98".into()])
///     .widths(vec![70, 30])
///     .bordered(true)
///     .build()
///     .unwrap();
/// assert_eq!(table.row_count(), 2);
/// ```
#[derive(Debug)]
pub struct TableBuilder {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    widths: Vec<u32>,
    justifications: Vec<Justification>,
    font_size: Option<f32>,
    bordered: bool,
    separator: String,
    serial_numbers: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            header: None,
            rows: Vec::new(),
            widths: Vec::new(),
            justifications: Vec::new(),
            font_size: None,
            bordered: false,
            separator: CELL_SPLIT_SEPARATOR.to_string(),
            serial_numbers: false,
        }
    }

    /// Set the header row, rendered bold and centered.
    pub fn header(mut self, cells: Vec<String>) -> Self {
        self.header = Some(cells);
        self
    }

    /// Append a data row.
    pub fn row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Append several data rows.
    pub fn rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Column widths as percentages of the table width, one per column or a
    /// single value for all.
    pub fn widths(mut self, percents: Vec<u32>) -> Self {
        self.widths = percents;
        self
    }

    /// One justification applied to every data cell.
    pub fn justification(mut self, justification: Justification) -> Self {
        self.justifications = vec![justification];
        self
    }

    /// Per-column data-cell justifications.
    pub fn column_justifications(mut self, justifications: Vec<Justification>) -> Self {
        self.justifications = justifications;
        self
    }

    /// Data-cell font size in points.
    pub fn font_size(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }

    /// Draw single borders on all edges and between cells.
    pub fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    /// Change the separator that splits a cell value into paragraphs.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Number the paragraphs of split cells (`1）`, `2）`, …).
    pub fn serial_numbers(mut self, enabled: bool) -> Self {
        self.serial_numbers = enabled;
        self
    }

    pub fn build(self) -> Result<Table> {
        let columns = match (&self.header, self.rows.first()) {
            (Some(header), _) => header.len(),
            (None, Some(first)) => first.len(),
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "table needs a header or at least one row".to_string(),
                ));
            },
        };

        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != columns {
                return Err(Error::InvalidArgument(format!(
                    "row {i} has {} cells, expected {columns}",
                    row.len()
                )));
            }
        }

        let widths = spread("widths", &self.widths, columns)?;
        let justifications = spread("justifications", &self.justifications, columns)?;

        let mut table = Table::new();
        table.width_percent(100);
        if self.bordered {
            table.bordered();
        }

        if let Some(header) = &self.header {
            let mut row = Row::new();
            for (col, text) in header.iter().enumerate() {
                let paragraph = ParagraphBuilder::new()
                    .justification(Justification::Center)
                    .formatted_text(text, true, self.font_size, None)
                    .build();
                let mut cell = Cell::new();
                cell.push_block(Block::Paragraph(paragraph));
                cell.vertical_alignment(VerticalAlignment::Center);
                if let Some(&percent) = widths.get(col) {
                    cell.width_percent(percent);
                }
                row.push_cell(cell);
            }
            table.push_row(row);
        }

        for data_row in &self.rows {
            let mut row = Row::new();
            for (col, text) in data_row.iter().enumerate() {
                let justification = justifications
                    .get(col)
                    .copied()
                    .unwrap_or(Justification::Center);
                let mut cell = Cell::new();
                cell.vertical_alignment(VerticalAlignment::Center);
                if let Some(&percent) = widths.get(col) {
                    cell.width_percent(percent);
                }

                let lines: Vec<&str> = text.split(self.separator.as_str()).collect();
                let numbered = self.serial_numbers && lines.len() > 1;
                for (k, line) in lines.iter().enumerate() {
                    let content = if numbered {
                        format!("{}）{line}", k + 1)
                    } else {
                        (*line).to_string()
                    };
                    let paragraph = ParagraphBuilder::new()
                        .justification(justification)
                        .formatted_text(&content, false, self.font_size, None)
                        .build();
                    cell.push_block(Block::Paragraph(paragraph));
                }
                row.push_cell(cell);
            }
            table.push_row(row);
        }

        Ok(table)
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand a column-scoped setting to one value per column.
fn spread<T: Copy>(name: &str, values: &[T], columns: usize) -> Result<Vec<T>> {
    match values.len() {
        0 => Ok(Vec::new()),
        1 => Ok(vec![values[0]; columns]),
        n if n == columns => Ok(values.to_vec()),
        n => Err(Error::InvalidArgument(format!(
            "{name} has {n} entries, expected 1 or {columns}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_row_rejected() {
        let result = TableBuilder::new()
            .header(vec!["a".into(), "b".into()])
            .row(vec!["only one".into()])
            .build();
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_width_count_must_match_columns() {
        let result = TableBuilder::new()
            .header(vec!["a".into(), "b".into(), "c".into()])
            .widths(vec![50, 50])
            .build();
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_single_justification_spreads() {
        let table = TableBuilder::new()
            .row(vec!["a".into(), "b".into()])
            .justification(Justification::Right)
            .build()
            .unwrap();
        let mut xml = String::new();
        table.to_xml(&mut xml).unwrap();
        assert_eq!(xml.matches("<w:jc w:val=\"right\"/>").count(), 2);
    }

    #[test]
    fn test_header_is_bold_and_centered() {
        let table = TableBuilder::new()
            .header(vec!["h".into()])
            .build()
            .unwrap();
        let mut xml = String::new();
        table.to_xml(&mut xml).unwrap();
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("<w:jc w:val=\"center\"/>"));
    }

    #[test]
    fn test_cell_split_with_serial_numbers() {
        let table = TableBuilder::new()
            .row(vec!["first#$$#second".into()])
            .serial_numbers(true)
            .build()
            .unwrap();
        let cell = &table.rows()[0].cells()[0];
        assert_eq!(cell.blocks().len(), 2);
        assert_eq!(cell.text(), "1）first2）second");
    }

    #[test]
    fn test_unsplit_cell_is_never_numbered() {
        let table = TableBuilder::new()
            .row(vec!["plain".into()])
            .serial_numbers(true)
            .build()
            .unwrap();
        assert_eq!(table.rows()[0].cells()[0].text(), "plain");
    }

    #[test]
    fn test_cell_widths_in_pct_fiftieths() {
        let table = TableBuilder::new()
            .row(vec!["a".into(), "b".into()])
            .widths(vec![70, 30])
            .build()
            .unwrap();
        let mut xml = String::new();
        table.to_xml(&mut xml).unwrap();
        assert!(xml.contains("<w:tcW w:w=\"3500\" w:type=\"pct\"/>"));
        assert!(xml.contains("<w:tcW w:w=\"1500\" w:type=\"pct\"/>"));
    }
}
