//! Fluent builders for document elements.
//!
//! Builders consume `self` and return it, so construction chains:
//!
//! ```rust
//! use loquat::{Justification, ParagraphBuilder};
//!
//! let paragraph = ParagraphBuilder::new()
//!     .justification(Justification::Center)
//!     .formatted_text("Quarterly report", true, Some(14.0), None)
//!     .build();
//! assert_eq!(paragraph.text(), "Quarterly report");
//! ```

pub mod paragraph;
pub mod run;
pub mod table;

pub use paragraph::ParagraphBuilder;
pub use run::RunBuilder;
pub use table::{CELL_SPLIT_SEPARATOR, TableBuilder};
