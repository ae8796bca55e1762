//! Cross-fragment text locator.
//!
//! Word-compatible documents split logical text into arbitrary runs for
//! formatting reasons, so a search string can be scattered across several
//! adjacent text leaves, each owned by a different run. [`locate`] finds
//! every occurrence of a needle across such a flat leaf sequence and
//! returns, per occurrence, the ordered list of owning containers that a
//! replacement has to edit or remove.
//!
//! The locator is read-only: it never touches the document tree, it only
//! records container handles. Callers must finish the locate pass before
//! applying any structural edit — groups computed against a tree are not
//! valid against a mutated version of that tree region.
//!
//! # Example
//!
//! ```
//! use loquat::locate::{Leaf, locate};
//!
//! let leaves = vec![
//!     Leaf::new("Dear ", 0usize),
//!     Leaf::new("{{na", 1),
//!     Leaf::new("me}}", 2),
//! ];
//! let groups = locate(&leaves, "{{name}}")?;
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].containers(), &[1, 2]);
//! # Ok::<(), loquat::Error>(())
//! ```

mod probe;
mod scanner;

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{Error, Result};

pub use probe::part_contains;

/// An ordered, text-bearing leaf node.
///
/// The container is an opaque handle to the leaf's structural parent — the
/// unit of removal or replacement. The locator never dereferences it; it
/// only requires that distinct leaves carry distinct containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<C> {
    /// The leaf's text value.
    pub text: String,
    /// Handle to the formatting container that owns this leaf.
    pub container: C,
}

impl<C> Leaf<C> {
    /// Create a leaf from its text and owning container.
    pub fn new(text: impl Into<String>, container: C) -> Self {
        Self {
            text: text.into(),
            container,
        }
    }
}

/// One located occurrence: the containers to edit, in document order.
///
/// Containers within a group are contiguous in the original leaf sequence
/// and no container ever appears in two groups. Groups are immutable once
/// created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup<C> {
    pub(crate) containers: Vec<C>,
}

impl<C> MatchGroup<C> {
    /// The containers whose concatenated leaf text holds the occurrence.
    pub fn containers(&self) -> &[C] {
        &self.containers
    }

    /// The first container, at the occurrence's document position.
    pub fn first(&self) -> &C {
        // MatchGroups are only ever materialized non-empty.
        &self.containers[0]
    }

    /// Number of containers in the group.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether the group is empty (never true for emitted groups).
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Consume the group, yielding its containers.
    pub fn into_containers(self) -> Vec<C> {
        self.containers
    }
}

/// Find every occurrence of `needle` across the leaf sequence.
///
/// Single pass, O(total leaf text length x needle length) worst case. An
/// empty needle is a no-op (`Ok(vec![])`); an absent needle is not an error
/// (zero groups). Two leaves claiming the same container violate the input
/// contract and fail with [`Error::DuplicateContainer`] before any scanning
/// happens.
pub fn locate<C>(leaves: &[Leaf<C>], needle: &str) -> Result<Vec<MatchGroup<C>>>
where
    C: Clone + Eq + Hash,
{
    if needle.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::with_capacity(leaves.len());
    for (index, leaf) in leaves.iter().enumerate() {
        if !seen.insert(&leaf.container) {
            return Err(Error::DuplicateContainer { index });
        }
    }

    Ok(scanner::scan(leaves, needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_needle_is_noop() {
        let leaves = vec![Leaf::new("abc", 0usize)];
        assert!(locate(&leaves, "").unwrap().is_empty());
    }

    #[test]
    fn test_empty_leaf_sequence() {
        let leaves: Vec<Leaf<usize>> = Vec::new();
        assert!(locate(&leaves, "abc").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_container_is_rejected() {
        let leaves = vec![Leaf::new("ab", 7usize), Leaf::new("cd", 7usize)];
        match locate(&leaves, "abcd") {
            Err(Error::DuplicateContainer { index }) => assert_eq!(index, 1),
            other => panic!("expected DuplicateContainer, got {other:?}"),
        }
    }
}
