//! Table types. Cells hold full block content, so tables nest.
use std::fmt::Write as FmtWrite;

use crate::error::Result;

use super::Block;
use super::format::{Justification, TableBorderStyle, VerticalAlignment};
use super::paragraph::Paragraph;

/// A table: rows of cells, each cell a sequence of blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub(crate) rows: Vec<Row>,
    pub(crate) properties: TableProperties,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            properties: TableProperties::default(),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Row) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The rows of this table.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Set table justification.
    pub fn justification(&mut self, justification: Justification) -> &mut Self {
        self.properties.justification = Some(justification);
        self
    }

    /// Set table width as a percentage of the page width.
    pub fn width_percent(&mut self, percent: u32) -> &mut Self {
        // w:tblW in pct units, fiftieths of a percent
        self.properties.width_pct = Some(percent * 50);
        self
    }

    /// Draw single borders on all edges and between cells.
    pub fn bordered(&mut self) -> &mut Self {
        self.properties.borders = Some(TableBorderStyle::Single);
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tbl>");
        xml.push_str("<w:tblPr>");

        if let Some(pct) = self.properties.width_pct {
            write!(xml, "<w:tblW w:w=\"{pct}\" w:type=\"pct\"/>")?;
        }

        if let Some(justification) = self.properties.justification {
            write!(xml, "<w:jc w:val=\"{}\"/>", justification.as_str())?;
        }

        if let Some(style) = self.properties.borders {
            let val = style.as_str();
            xml.push_str("<w:tblBorders>");
            for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
                write!(xml, "<w:{edge} w:val=\"{val}\" w:sz=\"4\"/>")?;
            }
            xml.push_str("</w:tblBorders>");
        }

        xml.push_str("</w:tblPr>");

        for row in &self.rows {
            row.to_xml(xml)?;
        }

        xml.push_str("</w:tbl>");
        Ok(())
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Table-level formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProperties {
    pub(crate) justification: Option<Justification>,
    pub(crate) width_pct: Option<u32>,
    pub(crate) borders: Option<TableBorderStyle>,
}

/// A table row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub(crate) cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Append a cell.
    pub fn push_cell(&mut self, cell: Cell) -> &mut Self {
        self.cells.push(cell);
        self
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The cells of this row.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tr>");
        for cell in &self.cells {
            cell.to_xml(xml)?;
        }
        xml.push_str("</w:tr>");
        Ok(())
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

/// A table cell. Cells hold blocks, so a cell can contain nested tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub(crate) blocks: Vec<Block>,
    pub(crate) properties: CellProperties,
}

impl Cell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            properties: CellProperties::default(),
        }
    }

    /// Create a cell holding a single paragraph of text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut cell = Self::new();
        cell.push_block(Block::Paragraph(Paragraph::with_text(text)));
        cell
    }

    /// Append a block.
    pub fn push_block(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    /// The blocks of this cell.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    /// Set cell width as a percentage of the table width.
    pub fn width_percent(&mut self, percent: u32) -> &mut Self {
        self.properties.width_pct = Some(percent * 50);
        self
    }

    /// Set vertical content alignment.
    pub fn vertical_alignment(&mut self, alignment: VerticalAlignment) -> &mut Self {
        self.properties.vertical_alignment = Some(alignment);
        self
    }

    /// Concatenated text of all paragraphs, nested tables excluded.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            if let Block::Paragraph(paragraph) = block {
                out.push_str(&paragraph.text());
            }
        }
        out
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tc>");

        if self.properties.width_pct.is_some() || self.properties.vertical_alignment.is_some() {
            xml.push_str("<w:tcPr>");
            if let Some(pct) = self.properties.width_pct {
                write!(xml, "<w:tcW w:w=\"{pct}\" w:type=\"pct\"/>")?;
            }
            if let Some(alignment) = self.properties.vertical_alignment {
                write!(xml, "<w:vAlign w:val=\"{}\"/>", alignment.as_str())?;
            }
            xml.push_str("</w:tcPr>");
        }

        // a cell must contain at least one paragraph
        if self.blocks.is_empty() {
            xml.push_str("<w:p/>");
        } else {
            for block in &self.blocks {
                block.to_xml(xml)?;
            }
        }

        xml.push_str("</w:tc>");
        Ok(())
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

/// Cell-level formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellProperties {
    pub(crate) width_pct: Option<u32>,
    pub(crate) vertical_alignment: Option<VerticalAlignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_skips_nested_tables() {
        let mut cell = Cell::with_text("outer");
        cell.push_block(Block::Table(Table::new()));
        assert_eq!(cell.text(), "outer");
    }

    #[test]
    fn test_empty_cell_emits_placeholder_paragraph() {
        let cell = Cell::new();
        let mut xml = String::new();
        cell.to_xml(&mut xml).unwrap();
        assert_eq!(xml, "<w:tc><w:p/></w:tc>");
    }

    #[test]
    fn test_table_width_pct_units() {
        let mut table = Table::new();
        table.width_percent(100);
        let mut xml = String::new();
        table.to_xml(&mut xml).unwrap();
        assert!(xml.contains("<w:tblW w:w=\"5000\" w:type=\"pct\"/>"));
    }

    #[test]
    fn test_bordered_table_has_inside_borders() {
        let mut table = Table::new();
        table.bordered();
        let mut row = Row::new();
        row.push_cell(Cell::with_text("a"));
        table.push_row(row);
        let mut xml = String::new();
        table.to_xml(&mut xml).unwrap();
        assert!(xml.contains("<w:insideH w:val=\"single\""));
        assert!(xml.contains("<w:insideV w:val=\"single\""));
    }
}
