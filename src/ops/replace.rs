//! Find-and-replace operations.
//!
//! Every operation runs a full locate pass against a leaf snapshot first,
//! then applies its edits by address in reverse document order, so the
//! addresses of untouched matches stay valid throughout.

use crate::document::{Block, BlockAddr, Document, InlineImage, Paragraph, Run, Table};
use crate::error::Result;
use crate::locate::locate;

impl Document {
    /// Replace every occurrence of `old` with `new`, including occurrences
    /// split across run boundaries. Returns the number of match groups.
    ///
    /// A match confined to one run is substituted in place. A match spanning
    /// several runs is collapsed: the concatenated text is substituted once
    /// and written to the group's first run, and the remaining runs are
    /// removed.
    pub fn replace_string(&mut self, old: &str, new: &str) -> Result<usize> {
        let leaves = self.text_leaves();
        let groups = locate(&leaves, old)?;

        for group in groups.iter().rev() {
            let containers = group.containers();
            let Some((first, rest)) = containers.split_first() else {
                continue;
            };

            if rest.is_empty() {
                if let Some(run) = self.run_mut(first)
                    && let Some(text) = run.text()
                {
                    let replaced = text.replace(old, new);
                    run.set_text(replaced);
                }
                continue;
            }

            let mut combined = String::new();
            for addr in containers {
                if let Some(text) = self.run(addr).and_then(Run::text) {
                    combined.push_str(text);
                }
            }
            let replaced = combined.replace(old, new);

            for addr in rest.iter().rev() {
                self.remove_run(addr);
            }
            if let Some(run) = self.run_mut(first) {
                run.set_text(replaced);
            }
        }

        Ok(groups.len())
    }

    /// Apply several replacements in sequence, returning one count per pair.
    pub fn replace_string_many(&mut self, pairs: &[(&str, &str)]) -> Result<Vec<usize>> {
        let mut counts = Vec::with_capacity(pairs.len());
        for (old, new) in pairs {
            counts.push(self.replace_string(old, new)?);
        }
        Ok(counts)
    }

    /// Replace every paragraph containing `old` with clones of `blocks`.
    /// Returns the number of paragraphs replaced.
    ///
    /// The target is the paragraph holding each group's first run. A
    /// paragraph containing several matches is replaced once; a target whose
    /// surroundings refuse block content is skipped without counting.
    pub fn replace_with_blocks(&mut self, old: &str, blocks: &[Block]) -> Result<usize> {
        let leaves = self.text_leaves();
        let groups = locate(&leaves, old)?;

        let mut targets: Vec<BlockAddr> = Vec::new();
        for group in &groups {
            let addr = group.first().block.clone();
            if !self.container_kind(&addr).allows_block_content() {
                continue;
            }
            if !targets.contains(&addr) {
                targets.push(addr);
            }
        }
        targets.sort();

        for addr in targets.iter().rev() {
            self.replace_block_with(addr, blocks);
        }
        Ok(targets.len())
    }

    /// Replace every paragraph containing `old` with clones of `paragraphs`.
    pub fn replace_with_paragraphs(
        &mut self,
        old: &str,
        paragraphs: &[Paragraph],
    ) -> Result<usize> {
        let blocks: Vec<Block> = paragraphs
            .iter()
            .cloned()
            .map(Block::Paragraph)
            .collect();
        self.replace_with_blocks(old, &blocks)
    }

    /// Replace every paragraph containing `old` with clones of `tables`.
    /// With `blank_separator`, an empty paragraph is placed between
    /// consecutive tables so Word does not fuse them into one.
    pub fn replace_with_tables(
        &mut self,
        old: &str,
        tables: &[Table],
        blank_separator: bool,
    ) -> Result<usize> {
        let mut blocks = Vec::with_capacity(tables.len() * 2);
        for (i, table) in tables.iter().enumerate() {
            if i > 0 && blank_separator {
                blocks.push(Block::Paragraph(Paragraph::new()));
            }
            blocks.push(Block::Table(table.clone()));
        }
        self.replace_with_blocks(old, &blocks)
    }

    /// Replace every occurrence of `old` with an inline picture. The
    /// group's first run becomes the picture run and the remaining runs are
    /// removed. Returns the number of match groups.
    pub fn replace_with_picture(&mut self, old: &str, image: &InlineImage) -> Result<usize> {
        let leaves = self.text_leaves();
        let groups = locate(&leaves, old)?;

        for group in groups.iter().rev() {
            let containers = group.containers();
            let Some((first, rest)) = containers.split_first() else {
                continue;
            };
            for addr in rest.iter().rev() {
                self.remove_run(addr);
            }
            if let Some(run) = self.run_mut(first) {
                *run = Run::with_picture(image.clone());
            }
        }

        Ok(groups.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;
    use crate::document::{Cell, Row, RunContent};

    fn doc_with_runs(texts: &[&str]) -> Document {
        let mut paragraph = Paragraph::new();
        for text in texts {
            paragraph.push_run(Run::with_text(*text));
        }
        let mut doc = Document::new();
        doc.push_paragraph(paragraph);
        doc
    }

    fn picture() -> InlineImage {
        let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        InlineImage::from_bytes(png, None, None).unwrap()
    }

    #[test]
    fn test_replace_within_single_run() {
        let mut doc = doc_with_runs(&["Dear NAME, welcome"]);
        let count = doc.replace_string("NAME", "Ada").unwrap();
        assert_eq!(count, 1);
        assert_eq!(doc.text(), "Dear Ada, welcome");
    }

    #[test]
    fn test_replace_across_runs_collapses_group() {
        let mut doc = doc_with_runs(&["Hello ", "wor", "ld!"]);
        let count = doc.replace_string("world", "there").unwrap();
        assert_eq!(count, 1);
        assert_eq!(doc.text(), "Hello there!");

        // the group's first run keeps the substituted text, the second run
        // is gone, and the untouched leading run survives as its own leaf
        let leaves = doc.text_leaves();
        let texts: Vec<&str> = leaves.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["Hello ", "there!"]);
    }

    #[test]
    fn test_replace_counts_groups_not_occurrences() {
        // Both occurrences in the first run belong to one group; the in-place
        // substitution still rewrites them all.
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::with_text("x marks x"));
        doc.push_paragraph(Paragraph::with_text("and x again"));
        let count = doc.replace_string("x", "y").unwrap();
        assert_eq!(count, 2);
        assert_eq!(doc.text(), "y marks y\nand y again");
    }

    #[test]
    fn test_replace_absent_needle_counts_zero() {
        let mut doc = doc_with_runs(&["nothing here"]);
        assert_eq!(doc.replace_string("absent", "x").unwrap(), 0);
        assert_eq!(doc.text(), "nothing here");
    }

    #[test]
    fn test_replace_many_reports_per_pair() {
        let mut doc = doc_with_runs(&["a b a"]);
        let counts = doc
            .replace_string_many(&[("a", "c"), ("b", "d"), ("z", "q")])
            .unwrap();
        assert_eq!(counts, vec![1, 1, 0]);
        assert_eq!(doc.text(), "c d c");
    }

    #[test]
    fn test_replace_with_paragraphs_swaps_block() {
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::with_text("before"));
        doc.push_paragraph(Paragraph::with_text("PLACEHOLDER"));
        doc.push_paragraph(Paragraph::with_text("after"));

        let replacement = vec![
            Paragraph::with_text("line one"),
            Paragraph::with_text("line two"),
        ];
        let count = doc
            .replace_with_paragraphs("PLACEHOLDER", &replacement)
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(doc.text(), "before\nline one\nline two\nafter");
    }

    #[test]
    fn test_paragraph_with_two_matches_replaced_once() {
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::with_text("slot slot"));
        let count = doc
            .replace_with_paragraphs("slot", &[Paragraph::with_text("filled")])
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(doc.text(), "filled");
    }

    #[test]
    fn test_replace_with_tables_blank_separator() {
        let table = TableBuilder::new().row(vec!["cell".into()]).build().unwrap();
        let mut doc = Document::new();
        doc.push_paragraph(Paragraph::with_text("TABLES"));
        doc.replace_with_tables("TABLES", &[table.clone(), table], true)
            .unwrap();

        let blocks = doc.body();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::Table(_)));
        assert!(matches!(blocks[1], Block::Paragraph(_)));
        assert!(matches!(blocks[2], Block::Table(_)));
    }

    #[test]
    fn test_replace_inside_table_cell() {
        let mut table = Table::new();
        let mut row = Row::new();
        row.push_cell(Cell::with_text("unit: VALUE"));
        table.push_row(row);
        let mut doc = Document::new();
        doc.push_table(table);

        let count = doc.replace_string("VALUE", "42").unwrap();
        assert_eq!(count, 1);
        let leaves = doc.text_leaves();
        assert_eq!(leaves[0].text, "unit: 42");
    }

    #[test]
    fn test_replace_with_picture_consumes_group() {
        let mut doc = doc_with_runs(&["logo: ", "IM", "AGE"]);
        let count = doc.replace_with_picture("IMAGE", &picture()).unwrap();
        assert_eq!(count, 1);

        let paragraph = match &doc.body()[0] {
            Block::Paragraph(p) => p,
            _ => unreachable!(),
        };
        assert_eq!(paragraph.children().len(), 2);
        let picture_run = paragraph.children().iter().any(|child| {
            matches!(
                child,
                crate::document::ParagraphChild::Run(run)
                    if matches!(run.content(), RunContent::Picture(_))
            )
        });
        assert!(picture_run);
    }
}
