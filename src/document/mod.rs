//! A mutable Word-compatible document tree.
//!
//! The model is a plain owned tree: a [`Document`] holds block lists for the
//! body and each header/footer part, blocks are paragraphs or tables, and
//! table cells hold block lists of their own, so tables nest.
//!
//! Edits work in two passes. [`Document::text_leaves`] materializes every
//! text run in document order as a [`Leaf`](crate::locate::Leaf) addressed by
//! [`RunAddr`]; the locator computes match groups against that snapshot, and
//! the operations in [`crate::ops`] then apply their edits by address, in
//! reverse document order so earlier addresses stay valid.
//!
//! # Example
//!
//! ```rust
//! use loquat::{Document, Paragraph};
//!
//! let mut doc = Document::new();
//! doc.push_paragraph(Paragraph::with_text("Hello, world"));
//! assert_eq!(doc.text(), "Hello, world");
//! ```

pub mod address;
pub mod bookmark;
pub mod format;
pub mod image;
pub mod paragraph;
pub mod run;
pub mod table;

use crate::error::Result;
use crate::locate::Leaf;

pub use address::{BlockAddr, CellHop, ContainerKind, PartRef, RunAddr};
pub use bookmark::Bookmark;
pub use format::{Justification, TableBorderStyle, UnderlineStyle, VerticalAlignment};
pub use image::{ImageFormat, InlineImage, cm_to_emu, px_to_emu};
pub use paragraph::{Paragraph, ParagraphChild};
pub use run::{Run, RunContent};
pub use table::{Cell, Row, Table};

use paragraph::ParagraphChild as Child;

/// A block-level element: a paragraph or a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match self {
            Block::Paragraph(paragraph) => paragraph.to_xml(xml),
            Block::Table(table) => table.to_xml(xml),
        }
    }
}

/// A footnote or endnote: a block list outside the scanned stories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub(crate) blocks: Vec<Block>,
}

impl Note {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_block(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// An in-memory Word-compatible document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub(crate) body: Vec<Block>,
    pub(crate) footers: Vec<Vec<Block>>,
    pub(crate) headers: Vec<Vec<Block>>,
    pub(crate) footnotes: Vec<Note>,
    pub(crate) endnotes: Vec<Note>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block to the body.
    pub fn push_block(&mut self, block: Block) -> &mut Self {
        self.body.push(block);
        self
    }

    /// Append a paragraph to the body.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) -> &mut Self {
        self.push_block(Block::Paragraph(paragraph))
    }

    /// Append a table to the body.
    pub fn push_table(&mut self, table: Table) -> &mut Self {
        self.push_block(Block::Table(table))
    }

    /// Add a footer part, returning its index.
    pub fn add_footer(&mut self, blocks: Vec<Block>) -> usize {
        self.footers.push(blocks);
        self.footers.len() - 1
    }

    /// Add a header part, returning its index.
    pub fn add_header(&mut self, blocks: Vec<Block>) -> usize {
        self.headers.push(blocks);
        self.headers.len() - 1
    }

    /// Add a footnote, returning its index.
    pub fn add_footnote(&mut self, note: Note) -> usize {
        self.footnotes.push(note);
        self.footnotes.len() - 1
    }

    /// Add an endnote, returning its index.
    pub fn add_endnote(&mut self, note: Note) -> usize {
        self.endnotes.push(note);
        self.endnotes.len() - 1
    }

    /// The body blocks.
    pub fn body(&self) -> &[Block] {
        &self.body
    }

    /// Drop every header and footer part.
    pub fn remove_headers_and_footers(&mut self) {
        self.headers.clear();
        self.footers.clear();
    }

    /// Concatenated body text, paragraphs separated by newlines.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();
        for block in &self.body {
            if let Block::Paragraph(paragraph) = block {
                parts.push(paragraph.text());
            }
        }
        parts.join("\n")
    }

    /// Every text run in document order — body, then footers, then headers —
    /// descending into table cells row-major. Pictures, tabs and breaks
    /// contribute no leaf; footnotes and endnotes are not visited.
    pub fn text_leaves(&self) -> Vec<Leaf<RunAddr>> {
        let mut leaves = Vec::new();
        collect_leaves(&self.body, &|i| BlockAddr::top_level(PartRef::Body, i), &mut leaves);
        for (f, blocks) in self.footers.iter().enumerate() {
            collect_leaves(blocks, &|i| BlockAddr::top_level(PartRef::Footer(f), i), &mut leaves);
        }
        for (h, blocks) in self.headers.iter().enumerate() {
            collect_leaves(blocks, &|i| BlockAddr::top_level(PartRef::Header(h), i), &mut leaves);
        }
        leaves
    }

    pub(crate) fn part_blocks(&self, part: PartRef) -> Option<&Vec<Block>> {
        match part {
            PartRef::Body => Some(&self.body),
            PartRef::Footer(i) => self.footers.get(i),
            PartRef::Header(i) => self.headers.get(i),
            PartRef::Footnote(i) => self.footnotes.get(i).map(|n| &n.blocks),
            PartRef::Endnote(i) => self.endnotes.get(i).map(|n| &n.blocks),
        }
    }

    pub(crate) fn part_blocks_mut(&mut self, part: PartRef) -> Option<&mut Vec<Block>> {
        match part {
            PartRef::Body => Some(&mut self.body),
            PartRef::Footer(i) => self.footers.get_mut(i),
            PartRef::Header(i) => self.headers.get_mut(i),
            PartRef::Footnote(i) => self.footnotes.get_mut(i).map(|n| &mut n.blocks),
            PartRef::Endnote(i) => self.endnotes.get_mut(i).map(|n| &mut n.blocks),
        }
    }

    /// The block at `addr`, if the address still resolves.
    pub fn block(&self, addr: &BlockAddr) -> Option<&Block> {
        let mut blocks = self.part_blocks(addr.part)?;
        let mut index = addr.index;
        for hop in &addr.cells {
            let Block::Table(table) = blocks.get(index)? else {
                return None;
            };
            blocks = &table.rows.get(hop.row)?.cells.get(hop.col)?.blocks;
            index = hop.block;
        }
        blocks.get(index)
    }

    /// The sibling list holding `addr`'s block, plus its index in that list.
    pub(crate) fn sibling_blocks_mut(
        &mut self,
        addr: &BlockAddr,
    ) -> Option<(&mut Vec<Block>, usize)> {
        let mut blocks = self.part_blocks_mut(addr.part)?;
        let mut index = addr.index;
        for hop in &addr.cells {
            let Block::Table(table) = blocks.get_mut(index)? else {
                return None;
            };
            blocks = table
                .rows
                .get_mut(hop.row)?
                .cells
                .get_mut(hop.col)?
                .blocks_mut();
            index = hop.block;
        }
        if index < blocks.len() { Some((blocks, index)) } else { None }
    }

    pub(crate) fn block_mut(&mut self, addr: &BlockAddr) -> Option<&mut Block> {
        let (blocks, index) = self.sibling_blocks_mut(addr)?;
        blocks.get_mut(index)
    }

    /// The paragraph at `addr`, if the block is one.
    pub fn paragraph(&self, addr: &BlockAddr) -> Option<&Paragraph> {
        match self.block(addr)? {
            Block::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub(crate) fn paragraph_mut(&mut self, addr: &BlockAddr) -> Option<&mut Paragraph> {
        match self.block_mut(addr)? {
            Block::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    /// The run at `addr`, if the address still resolves to a run.
    pub fn run(&self, addr: &RunAddr) -> Option<&Run> {
        self.paragraph(&addr.block)?.run(addr.child)
    }

    pub(crate) fn run_mut(&mut self, addr: &RunAddr) -> Option<&mut Run> {
        self.paragraph_mut(&addr.block)?.run_mut(addr.child)
    }

    /// Remove the run at `addr`. Returns whether anything was removed.
    pub(crate) fn remove_run(&mut self, addr: &RunAddr) -> bool {
        match self.paragraph_mut(&addr.block) {
            Some(paragraph) if addr.child < paragraph.children.len() => {
                if matches!(paragraph.children[addr.child], Child::Run(_)) {
                    paragraph.children.remove(addr.child);
                    true
                } else {
                    false
                }
            },
            _ => false,
        }
    }

    /// Replace the block at `addr` with clones of `replacement`.
    /// An empty slice removes the block.
    pub(crate) fn replace_block_with(
        &mut self,
        addr: &BlockAddr,
        replacement: &[Block],
    ) -> Option<()> {
        let (blocks, index) = self.sibling_blocks_mut(addr)?;
        blocks.splice(index..=index, replacement.iter().cloned());
        Some(())
    }

    /// Insert clones of `insertion` immediately after the block at `addr`.
    pub(crate) fn insert_blocks_after(
        &mut self,
        addr: &BlockAddr,
        insertion: &[Block],
    ) -> Option<()> {
        let (blocks, index) = self.sibling_blocks_mut(addr)?;
        blocks.splice(index + 1..index + 1, insertion.iter().cloned());
        Some(())
    }

    /// Remove the block at `addr`.
    pub(crate) fn remove_block(&mut self, addr: &BlockAddr) -> Option<Block> {
        let (blocks, index) = self.sibling_blocks_mut(addr)?;
        Some(blocks.remove(index))
    }

    /// The container kind the block at `addr` sits under.
    pub fn container_kind(&self, addr: &BlockAddr) -> ContainerKind {
        if !addr.cells.is_empty() {
            return ContainerKind::TableCell;
        }
        match addr.part {
            PartRef::Body => ContainerKind::Body,
            PartRef::Footer(_) => ContainerKind::FooterRoot,
            PartRef::Header(_) => ContainerKind::HeaderRoot,
            PartRef::Footnote(_) => ContainerKind::Footnote,
            PartRef::Endnote(_) => ContainerKind::Endnote,
        }
    }

    /// Serialize the body as a WordprocessingML document fragment.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024);
        xml.push_str(
            "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">",
        );
        xml.push_str("<w:body>");
        for block in &self.body {
            block.to_xml(&mut xml)?;
        }
        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }

    /// Serialize one story part (body, a header or a footer) on its own.
    pub fn part_to_xml(&self, part: PartRef) -> Result<Option<String>> {
        let Some(blocks) = self.part_blocks(part) else {
            return Ok(None);
        };
        let (open, close) = match part {
            PartRef::Body => ("<w:body>", "</w:body>"),
            PartRef::Footer(_) => ("<w:ftr>", "</w:ftr>"),
            PartRef::Header(_) => ("<w:hdr>", "</w:hdr>"),
            PartRef::Footnote(_) => ("<w:footnote>", "</w:footnote>"),
            PartRef::Endnote(_) => ("<w:endnote>", "</w:endnote>"),
        };
        let mut xml = String::with_capacity(256);
        xml.push_str(open);
        for block in blocks {
            block.to_xml(&mut xml)?;
        }
        xml.push_str(close);
        Ok(Some(xml))
    }
}

fn collect_leaves(
    blocks: &[Block],
    make_addr: &dyn Fn(usize) -> BlockAddr,
    out: &mut Vec<Leaf<RunAddr>>,
) {
    for (i, block) in blocks.iter().enumerate() {
        match block {
            Block::Paragraph(paragraph) => {
                for (c, child) in paragraph.children.iter().enumerate() {
                    if let Child::Run(run) = child
                        && let Some(text) = run.text()
                    {
                        let addr = RunAddr {
                            block: make_addr(i),
                            child: c,
                        };
                        out.push(Leaf::new(text, addr));
                    }
                }
            },
            Block::Table(table) => {
                let addr = make_addr(i);
                for (r, row) in table.rows.iter().enumerate() {
                    for (c, cell) in row.cells.iter().enumerate() {
                        let base = addr.clone();
                        collect_leaves(
                            &cell.blocks,
                            &move |b| {
                                let mut nested = base.clone();
                                nested.cells.push(CellHop {
                                    row: r,
                                    col: c,
                                    block: b,
                                });
                                nested
                            },
                            out,
                        );
                    }
                }
            },
        }
    }
}
