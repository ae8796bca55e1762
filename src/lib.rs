//! Loquat - a Rust library for templating Word-compatible documents
//!
//! The library keeps a mutable document tree in memory and edits it with
//! text-driven and bookmark-driven operations. Its core is a cross-fragment
//! text locator: rich-text formats split logical text into arbitrary runs,
//! so a placeholder like `{{name}}` may be spread over several runs, and the
//! locator reassembles such occurrences into match groups that the replace
//! operations consume.
//!
//! # Features
//!
//! - **Cross-fragment search**: Find text spanning run boundaries in a
//!   single pass over the document's text leaves
//! - **Replacement**: Swap matches for text, paragraphs, tables or inline
//!   pictures, with counts reported per search string
//! - **Bookmark editing**: Insert or replace content at named bookmark
//!   positions, including whole-area replacement
//! - **Element builders**: Fluent construction of runs, paragraphs and
//!   string-driven tables
//! - **WordprocessingML output**: Every element serializes to an XML
//!   fragment
//!
//! # Example - Replacing a split placeholder
//!
//! ```
//! use loquat::{Document, Paragraph, Run};
//!
//! # fn main() -> loquat::Result<()> {
//! // "{{city}}" arrives split across three runs, as Word often stores it
//! let mut paragraph = Paragraph::new();
//! paragraph.push_run(Run::with_text("Weather in {{"));
//! paragraph.push_run(Run::with_text("city"));
//! paragraph.push_run(Run::with_text("}}: sunny"));
//!
//! let mut doc = Document::new();
//! doc.push_paragraph(paragraph);
//!
//! let count = doc.replace_string("{{city}}", "Lisbon")?;
//! assert_eq!(count, 1);
//! assert_eq!(doc.text(), "Weather in Lisbon: sunny");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Building a table into a bookmark
//!
//! ```
//! use loquat::{Document, TableBuilder};
//! # use loquat::{Bookmark, Paragraph};
//!
//! # fn main() -> loquat::Result<()> {
//! # let mut doc = Document::new();
//! # let mut paragraph = Paragraph::new();
//! # paragraph.push_bookmark_start(Bookmark::new(1, "results"));
//! # paragraph.push_bookmark_end(1);
//! # doc.push_paragraph(paragraph);
//! let table = TableBuilder::new()
//!     .header(vec!["metric".into(), "value".into()])
//!     .row(vec!["uptime".into(), "99.9%".into()])
//!     .widths(vec![60, 40])
//!     .bordered(true)
//!     .build()?;
//!
//! doc.replace_table_at_bookmark("results", &table)?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod document;
pub mod error;
pub mod locate;
pub mod ops;

pub use builder::{CELL_SPLIT_SEPARATOR, ParagraphBuilder, RunBuilder, TableBuilder};
pub use document::{
    Block, BlockAddr, Bookmark, Cell, CellHop, ContainerKind, Document, ImageFormat, InlineImage,
    Justification, Note, Paragraph, ParagraphChild, PartRef, Row, Run, RunAddr, RunContent, Table,
    TableBorderStyle, UnderlineStyle, VerticalAlignment, cm_to_emu, px_to_emu,
};
pub use error::{Error, Result};
pub use locate::{Leaf, MatchGroup, locate, part_contains};
pub use ops::{BookmarkAddr, wrap_in_bookmark};
