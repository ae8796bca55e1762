//! Unified error types for the Loquat library.
//!
//! A single error enum covers every fallible operation in the crate, from
//! locator preconditions to bookmark lookups and structural edits.
use thiserror::Error;

/// Main error type for Loquat operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Two leaves in a locate call claimed the same owning container.
    ///
    /// This is a caller-side precondition violation: the leaf sequence must
    /// map each container to at most one leaf, otherwise match grouping
    /// would be ambiguous.
    #[error("Duplicate container ownership: leaf {index} re-uses an earlier leaf's container")]
    DuplicateContainer { index: usize },

    /// No bookmark start with the given name exists in the document.
    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    /// A bookmark start had no matching end marker.
    #[error("Bookmark end not found for id {0}")]
    BookmarkEndNotFound(u32),

    /// A replacement target has no ancestor that accepts block content.
    #[error("No insertable ancestor for replacement target")]
    NoInsertionAncestor,

    /// Invalid argument to a builder or operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image bytes did not match any known format signature.
    #[error("Unknown image format")]
    UnknownImageFormat,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Formatting error while serializing XML
    #[error("XML error: {0}")]
    Xml(#[from] std::fmt::Error),
}

/// Result type for Loquat operations.
pub type Result<T> = std::result::Result<T, Error>;
