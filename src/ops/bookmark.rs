//! Bookmark-targeted operations.
//!
//! Bookmarks name insertion points: a start marker with a numeric id and a
//! name, paired with an end marker carrying the same id. Content operations
//! act on the children between the two markers inside one paragraph; area
//! operations act on the whole blocks the bookmark region spans.

use crate::builder::RunBuilder;
use crate::document::{
    Block, BlockAddr, Bookmark, CellHop, Document, InlineImage, Paragraph, ParagraphChild, Run,
    Table,
};
use crate::error::{Error, Result};

/// Where a bookmark marker sits: its paragraph's block plus the child index
/// of the marker, along with the bookmark id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkAddr {
    pub block: BlockAddr,
    pub child: usize,
    pub id: u32,
}

impl Document {
    /// Find the start marker of the bookmark named `name`, searching the
    /// body, then footers, then headers, descending into table cells.
    pub fn find_bookmark_start(&self, name: &str) -> Option<BookmarkAddr> {
        self.find_marker(|child| match child {
            ParagraphChild::BookmarkStart(b) if b.name() == name => Some(b.id()),
            _ => None,
        })
    }

    /// Find the end marker paired with bookmark id `id`.
    pub fn find_bookmark_end(&self, id: u32) -> Option<BookmarkAddr> {
        self.find_marker(|child| match child {
            ParagraphChild::BookmarkEnd(end_id) if *end_id == id => Some(id),
            _ => None,
        })
    }

    fn find_marker(
        &self,
        matcher: impl Fn(&ParagraphChild) -> Option<u32>,
    ) -> Option<BookmarkAddr> {
        for addr in self.paragraph_addrs() {
            let paragraph = self.paragraph(&addr)?;
            for (child, node) in paragraph.children().iter().enumerate() {
                if let Some(id) = matcher(node) {
                    return Some(BookmarkAddr {
                        block: addr,
                        child,
                        id,
                    });
                }
            }
        }
        None
    }

    fn paragraph_addrs(&self) -> Vec<BlockAddr> {
        use crate::document::PartRef;
        let mut addrs = Vec::new();
        collect_paragraphs(&self.body, &|i| BlockAddr::top_level(PartRef::Body, i), &mut addrs);
        for (f, blocks) in self.footers.iter().enumerate() {
            collect_paragraphs(blocks, &|i| BlockAddr::top_level(PartRef::Footer(f), i), &mut addrs);
        }
        for (h, blocks) in self.headers.iter().enumerate() {
            collect_paragraphs(blocks, &|i| BlockAddr::top_level(PartRef::Header(h), i), &mut addrs);
        }
        addrs
    }

    /// Remove the children between the bookmark's start marker and its end
    /// marker (or the end of the paragraph, whichever comes first). Returns
    /// the start marker's address, which stays valid for insertion.
    pub fn remove_bookmark_content(&mut self, name: &str) -> Result<BookmarkAddr> {
        let start = self.require_bookmark(name)?;
        let paragraph = self
            .paragraph_mut(&start.block)
            .ok_or_else(|| Error::BookmarkNotFound(name.to_string()))?;

        let from = start.child + 1;
        let mut to = paragraph.children().len();
        for idx in from..paragraph.children().len() {
            if matches!(paragraph.children()[idx], ParagraphChild::BookmarkEnd(id) if id == start.id)
            {
                to = idx;
                break;
            }
        }
        paragraph.children.drain(from..to);
        Ok(start)
    }

    /// Insert a text run right after the bookmark's start marker, leaving
    /// existing content in place.
    pub fn insert_text_at_bookmark(
        &mut self,
        name: &str,
        text: &str,
        font_size: Option<f32>,
    ) -> Result<()> {
        let start = self.require_bookmark(name)?;
        self.insert_child_after(&start, ParagraphChild::Run(text_run(text, font_size)))
    }

    /// Insert clones of `paragraphs` as sibling blocks right after the
    /// bookmark's paragraph, leaving the bookmark and its content intact.
    pub fn insert_paragraphs_at_bookmark(
        &mut self,
        name: &str,
        paragraphs: &[Paragraph],
    ) -> Result<()> {
        let start = self.require_bookmark(name)?;
        let blocks: Vec<Block> = paragraphs
            .iter()
            .cloned()
            .map(Block::Paragraph)
            .collect();
        self.insert_blocks_after(&start.block, &blocks);
        Ok(())
    }

    /// Replace the bookmark's content with a single text run.
    pub fn replace_text_at_bookmark(
        &mut self,
        name: &str,
        text: &str,
        font_size: Option<f32>,
    ) -> Result<()> {
        let start = self.remove_bookmark_content(name)?;
        self.insert_child_after(&start, ParagraphChild::Run(text_run(text, font_size)))
    }

    /// Replace the bookmark's content with an already-built run.
    pub fn replace_run_at_bookmark(&mut self, name: &str, run: Run) -> Result<()> {
        let start = self.remove_bookmark_content(name)?;
        self.insert_child_after(&start, ParagraphChild::Run(run))
    }

    /// Replace the bookmark's content with an inline picture run.
    pub fn replace_picture_at_bookmark(&mut self, name: &str, image: InlineImage) -> Result<()> {
        let start = self.remove_bookmark_content(name)?;
        self.insert_child_after(&start, ParagraphChild::Run(Run::with_picture(image)))
    }

    /// Replace the bookmark's content with a table, inserted as a sibling
    /// block after the bookmark's paragraph.
    pub fn replace_table_at_bookmark(&mut self, name: &str, table: &Table) -> Result<()> {
        let start = self.require_bookmark(name)?;
        if !self.container_kind(&start.block).allows_block_content() {
            return Err(Error::NoInsertionAncestor);
        }
        let start = self.remove_bookmark_content(name)?;
        self.insert_blocks_after(&start.block, &[Block::Table(table.clone())]);
        Ok(())
    }

    /// Remove the start paragraph and every block up to the end marker's
    /// paragraph. The end paragraph itself survives, markers and all; when
    /// both markers share one paragraph, that paragraph is removed whole.
    pub fn remove_bookmark_area(&mut self, name: &str) -> Result<()> {
        let (start, end) = self.bookmark_region(name)?;
        if start.block == end.block {
            self.remove_block(&start.block);
        } else if same_sibling_list(&start.block, &end.block) {
            if let Some((blocks, _)) = self.sibling_blocks_mut(&start.block) {
                let from = in_list_index(&start.block).min(in_list_index(&end.block));
                let to = in_list_index(&start.block)
                    .max(in_list_index(&end.block))
                    .min(blocks.len());
                blocks.drain(from..to);
            }
        } else {
            // Regions spanning stories have no sibling walk; only the start
            // paragraph goes.
            self.remove_block(&start.block);
        }
        Ok(())
    }

    /// Replace the bookmark area with clones of `paragraphs`: the start
    /// paragraph and the blocks before the end marker's paragraph make way
    /// for the replacement, and the end paragraph survives.
    pub fn replace_area_at_bookmark(
        &mut self,
        name: &str,
        paragraphs: &[Paragraph],
    ) -> Result<()> {
        let (start, end) = self.bookmark_region(name)?;
        let replacement: Vec<Block> = paragraphs
            .iter()
            .cloned()
            .map(Block::Paragraph)
            .collect();

        if start.block == end.block {
            self.replace_block_with(&start.block, &replacement);
        } else if same_sibling_list(&start.block, &end.block) {
            if let Some((blocks, _)) = self.sibling_blocks_mut(&start.block) {
                let from = in_list_index(&start.block).min(in_list_index(&end.block));
                let to = in_list_index(&start.block)
                    .max(in_list_index(&end.block))
                    .min(blocks.len());
                blocks.splice(from..to, replacement);
            }
        } else {
            self.replace_block_with(&start.block, &replacement);
        }
        Ok(())
    }

    fn require_bookmark(&self, name: &str) -> Result<BookmarkAddr> {
        self.find_bookmark_start(name)
            .ok_or_else(|| Error::BookmarkNotFound(name.to_string()))
    }

    fn bookmark_region(&self, name: &str) -> Result<(BookmarkAddr, BookmarkAddr)> {
        let start = self.require_bookmark(name)?;
        let end = self
            .find_bookmark_end(start.id)
            .ok_or(Error::BookmarkEndNotFound(start.id))?;
        Ok((start, end))
    }

    fn insert_child_after(&mut self, marker: &BookmarkAddr, child: ParagraphChild) -> Result<()> {
        let paragraph = self
            .paragraph_mut(&marker.block)
            .ok_or(Error::BookmarkEndNotFound(marker.id))?;
        paragraph.children.insert(marker.child + 1, child);
        Ok(())
    }
}

/// Create a named bookmark region around existing paragraph children.
pub fn wrap_in_bookmark(paragraph: &mut Paragraph, id: u32, name: &str) {
    paragraph
        .children
        .insert(0, ParagraphChild::BookmarkStart(Bookmark::new(id, name)));
    paragraph.children.push(ParagraphChild::BookmarkEnd(id));
}

fn text_run(text: &str, font_size: Option<f32>) -> Run {
    let mut builder = RunBuilder::new().text(text);
    if let Some(points) = font_size {
        builder = builder.font_size(points);
    }
    builder.build()
}

fn in_list_index(addr: &BlockAddr) -> usize {
    addr.cells.last().map_or(addr.index, |hop| hop.block)
}

/// Whether two addresses point into the same sibling block list.
fn same_sibling_list(a: &BlockAddr, b: &BlockAddr) -> bool {
    if a.part != b.part || a.cells.len() != b.cells.len() {
        return false;
    }
    if a.cells.is_empty() {
        return true;
    }
    if a.index != b.index {
        return false;
    }
    let n = a.cells.len();
    if a.cells[..n - 1] != b.cells[..n - 1] {
        return false;
    }
    let (last_a, last_b) = (&a.cells[n - 1], &b.cells[n - 1]);
    last_a.row == last_b.row && last_a.col == last_b.col
}

fn collect_paragraphs(
    blocks: &[Block],
    make_addr: &dyn Fn(usize) -> BlockAddr,
    out: &mut Vec<BlockAddr>,
) {
    for (i, block) in blocks.iter().enumerate() {
        match block {
            Block::Paragraph(_) => out.push(make_addr(i)),
            Block::Table(table) => {
                let addr = make_addr(i);
                for (r, row) in table.rows().iter().enumerate() {
                    for (c, cell) in row.cells().iter().enumerate() {
                        let base = addr.clone();
                        collect_paragraphs(
                            cell.blocks(),
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
