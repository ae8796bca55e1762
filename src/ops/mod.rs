//! Document editing operations.
//!
//! Both families follow the same shape: resolve targets against a snapshot
//! of the tree first, then mutate by address. [`replace`] drives edits from
//! text matches located across run boundaries; [`bookmark`] drives them from
//! named marker positions.

pub mod bookmark;
pub mod replace;

pub use bookmark::{BookmarkAddr, wrap_in_bookmark};
