//! Stateful single-pass fragment scanner.
//!
//! Rich-text formats split logical text into arbitrary fragments (bold
//! boundaries, spell-check markers, revision boundaries), so one occurrence
//! of a search string may be spread across several adjacent leaves each
//! owned by a different formatting container. The scanner walks the leaf
//! sequence once, classifying every leaf as a full match, an inner match, a
//! boundary overlap that needs more leaves, or a non-match, and assembles
//! the owning containers into [`MatchGroup`]s.
//!
//! All accumulation state lives in a [`ScanState`] constructed per call;
//! nothing is shared across calls or threads.

use std::collections::BTreeMap;
use std::hash::Hash;

use fixedbitset::FixedBitSet;

use super::probe::{char_len, part_contains, tail_chars};
use super::{Leaf, MatchGroup};

/// Transient accumulation state for one scan.
///
/// `confirmed` holds fragments that are certain to belong to the match in
/// progress; `tentative` holds fragments that may instead turn out to start
/// the *next* occurrence. Both are keyed by leaf index so a group can be
/// materialized in document order regardless of reclassification order.
struct ScanState<C> {
    /// Concatenation buffer for the partial match in progress.
    pending: String,
    confirmed: BTreeMap<usize, C>,
    tentative: BTreeMap<usize, C>,
    in_continuation: bool,
}

impl<C> ScanState<C> {
    fn new() -> Self {
        Self {
            pending: String::new(),
            confirmed: BTreeMap::new(),
            tentative: BTreeMap::new(),
            in_continuation: false,
        }
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.confirmed.clear();
        self.tentative.clear();
        self.in_continuation = false;
    }

    /// Lock every tentative fragment into the current match.
    fn promote_tentative(&mut self) {
        while let Some((idx, container)) = self.tentative.pop_first() {
            self.confirmed.insert(idx, container);
        }
    }
}

/// Accumulates finished groups and enforces the first-match-only policy for
/// leaves that would otherwise end one match and start the next.
struct GroupSink<C> {
    groups: Vec<MatchGroup<C>>,
    emitted: FixedBitSet,
}

impl<C: Clone> GroupSink<C> {
    fn new(leaf_count: usize) -> Self {
        Self {
            groups: Vec::new(),
            emitted: FixedBitSet::with_capacity(leaf_count),
        }
    }

    /// Materialize a group from index-ordered fragments.
    ///
    /// A leaf already owned by an earlier group is dropped (first match
    /// wins); if that leaves the group empty, nothing is emitted.
    fn emit(&mut self, fragments: &BTreeMap<usize, C>) {
        let mut containers = Vec::with_capacity(fragments.len());
        for (&idx, container) in fragments {
            if !self.emitted.contains(idx) {
                self.emitted.insert(idx);
                containers.push(container.clone());
            }
        }
        if !containers.is_empty() {
            self.groups.push(MatchGroup { containers });
        }
    }

    fn emit_single(&mut self, idx: usize, container: &C) {
        if !self.emitted.contains(idx) {
            self.emitted.insert(idx);
            self.groups.push(MatchGroup {
                containers: vec![container.clone()],
            });
        }
    }
}

/// Run the scan. `needle` must be non-empty and the leaf sequence free of
/// duplicate containers; both are checked by [`super::locate`] before this
/// is called.
pub(super) fn scan<C: Clone + Eq + Hash>(leaves: &[Leaf<C>], needle: &str) -> Vec<MatchGroup<C>> {
    let needle_len = char_len(needle);
    let mut state: ScanState<C> = ScanState::new();
    let mut sink = GroupSink::new(leaves.len());

    for (i, leaf) in leaves.iter().enumerate() {
        if !state.in_continuation {
            scan_fresh(i, leaf, needle, needle_len, &mut state, &mut sink);
        } else {
            scan_continuation(i, leaf, needle, needle_len, &mut state, &mut sink);
        }
    }

    // A continuation still unresolved after the last leaf is discarded
    // rather than flushed; compatibility with existing replace behavior.
    sink.groups
}

/// Classify a leaf while no partial match is in progress.
fn scan_fresh<C: Clone>(
    i: usize,
    leaf: &Leaf<C>,
    needle: &str,
    needle_len: usize,
    state: &mut ScanState<C>,
    sink: &mut GroupSink<C>,
) {
    let text = leaf.text.as_str();
    let Some(index) = part_contains(text, needle) else {
        return;
    };
    let text_len = char_len(text);

    if text == needle {
        // The leaf is exactly one occurrence; no continuation can start
        // here because the leaf is fully consumed by the match.
        sink.emit_single(i, &leaf.container);
    } else if index + needle_len > text_len {
        // The needle's start matches the leaf's tail and overflows past the
        // leaf end: begin a continuation.
        state.pending.push_str(text);
        state.tentative.insert(i, leaf.container.clone());
        state.in_continuation = true;
    } else {
        // Full occurrence somewhere inside the leaf. Its trailing slice may
        // simultaneously begin the next occurrence.
        let tail = tail_chars(text, needle_len);
        match part_contains(tail, needle) {
            Some(inner) if inner > 0 => {
                sink.emit_single(i, &leaf.container);
                // Seed a continuation from the trailing slice so an
                // occurrence starting inside this same leaf is not missed.
                state.pending.push_str(tail);
                state.tentative.insert(i, leaf.container.clone());
                state.in_continuation = true;
            },
            _ => {
                sink.emit_single(i, &leaf.container);
            },
        }
    }
}

/// Extend the buffered partial match with a new leaf and reclassify.
fn scan_continuation<C: Clone>(
    i: usize,
    leaf: &Leaf<C>,
    needle: &str,
    needle_len: usize,
    state: &mut ScanState<C>,
    sink: &mut GroupSink<C>,
) {
    state.pending.push_str(leaf.text.as_str());

    let Some(index) = part_contains(&state.pending, needle) else {
        // The buffered text no longer overlaps the needle at all: flush
        // whatever was already certain, drop the tentative tail fragments,
        // and leave continuation. The leaf that broke the match is consumed.
        if !state.confirmed.is_empty() {
            sink.emit(&state.confirmed);
        }
        state.reset();
        return;
    };

    let buffered_len = char_len(&state.pending);

    if buffered_len == needle_len {
        // The fragments add up to exactly one occurrence.
        state.tentative.insert(i, leaf.container.clone());
        state.promote_tentative();
        sink.emit(&state.confirmed);
        state.reset();
    } else if index + needle_len > buffered_len {
        // Still overflowing; more leaves are needed.
        state.tentative.insert(i, leaf.container.clone());
    } else {
        let tail = tail_chars(&state.pending, needle_len).to_owned();
        if part_contains(&tail, needle).is_some() {
            // An occurrence completed inside the buffer and the buffer's
            // tail could start the next one. Everything seen so far is
            // certain; restart the continuation from the trailing slice.
            state.tentative.insert(i, leaf.container.clone());
            state.promote_tentative();
            state.pending = tail;
        } else {
            // An occurrence completed inside the buffer with no reusable
            // tail: the whole accumulated group is done.
            state.tentative.insert(i, leaf.container.clone());
            state.promote_tentative();
            sink.emit(&state.confirmed);
            state.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::locate::{Leaf, locate};

    fn leaves(texts: &[&str]) -> Vec<Leaf<usize>> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Leaf::new(*t, i))
            .collect()
    }

    fn groups(texts: &[&str], needle: &str) -> Vec<Vec<usize>> {
        locate(&leaves(texts), needle)
            .unwrap()
            .into_iter()
            .map(|g| g.into_containers())
            .collect()
    }

    #[test]
    fn test_exact_single_leaf() {
        assert_eq!(groups(&["ab", "cd", "ef"], "cd"), vec![vec![1]]);
    }

    #[test]
    fn test_span_three_leaves() {
        assert_eq!(groups(&["a", "bc", "de"], "abcde"), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_span_two_leaves() {
        assert_eq!(groups(&["foo", "bar"], "foobar"), vec![vec![0, 1]]);
    }

    #[test]
    fn test_inner_plus_tail_overlap_span() {
        assert_eq!(groups(&["xxabc", "defxx"], "abcdef"), vec![vec![0, 1]]);
    }

    #[test]
    fn test_absent_needle_yields_no_groups() {
        assert!(groups(&["alpha", "beta", "gamma"], "delta").is_empty());
    }

    #[test]
    fn test_no_cross_talk_between_separated_occurrences() {
        // Two occurrences with a non-matching leaf in between must come out
        // as two independent groups.
        assert_eq!(
            groups(&["foo", "bar", "zzz", "foob", "ar"], "foobar"),
            vec![vec![0, 1], vec![3, 4]],
        );
    }

    #[test]
    fn test_adjacent_occurrences_on_distinct_leaves() {
        assert_eq!(
            groups(&["foo", "bar", "foobar"], "foobar"),
            vec![vec![0, 1], vec![2]],
        );
    }

    #[test]
    fn test_inner_match_with_surrounding_noise() {
        assert_eq!(groups(&["xxabcyy"], "abc"), vec![vec![0]]);
    }

    #[test]
    fn test_tail_exactly_needle_is_plain_inner_match() {
        // Trailing slice == needle re-probes at offset 0, which does not
        // seed a continuation.
        assert_eq!(groups(&["xabc", "abc"], "abc"), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_abandoned_continuation_flushes_confirmed_only() {
        // "foo" starts a continuation, "xoo" kills it; the tentative tail
        // fragment is dropped and nothing certain existed yet.
        assert!(groups(&["foo", "xoo"], "foobar").is_empty());
    }

    #[test]
    fn test_chained_occurrences_sharing_leaves_coalesce() {
        // "foo" + "barfoo" completes one occurrence while the buffer tail
        // "barfoo" could start the next; the chain keeps re-arming on every
        // leaf and a non-matching leaf finally flushes the conflated
        // fragments as one group.
        assert_eq!(
            groups(&["foo", "barfoo", "zzz"], "foobar"),
            vec![vec![0, 1]],
        );
        // Without a terminating leaf the chain never resolves and is
        // discarded at end of input.
        assert!(groups(&["foo", "barfoo", "bar"], "foobar").is_empty());
    }

    #[test]
    fn test_full_match_with_reusable_tail_emits_and_reseeds() {
        // "abcab" holds one full occurrence and its tail "ab" could begin
        // the next; the second occurrence completes on the next leaf but
        // the shared leaf stays with the first group (first match wins).
        assert_eq!(groups(&["abcab", "cx"], "abc"), vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_repeated_prefix_needle_keeps_source_approximation() {
        // Greedy probe limitation, preserved on purpose: only the leading
        // occurrence of "aa" in "aaa" is seen.
        assert_eq!(groups(&["aaa"], "aa"), vec![vec![0]]);
    }

    #[test]
    fn test_unresolved_continuation_at_end_is_discarded() {
        assert!(groups(&["foo"], "foobar").is_empty());
        assert!(groups(&["foo", "ba"], "foobar").is_empty());
    }

    #[test]
    fn test_multibyte_text_spans() {
        assert_eq!(groups(&["假", "装文本"], "假装"), vec![vec![0, 1]]);
    }

    #[test]
    fn test_locate_is_referentially_stable() {
        let input = leaves(&["foo", "barfoo", "bar", "x", "foobar"]);
        let a = locate(&input, "foobar").unwrap();
        let b = locate(&input, "foobar").unwrap();
        assert_eq!(a, b);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn leaf_texts() -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec("[a-c]{0,5}", 1..8)
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_absent_needle_finds_nothing(texts in leaf_texts()) {
                // 'z' never occurs in the [a-c] alphabet.
                let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
                prop_assert!(groups(&refs, "z").is_empty());
            }

            #[test]
            fn prop_groups_are_disjoint_and_ordered(
                texts in leaf_texts(),
                needle in "[a-c]{1,4}",
            ) {
                let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
                let found = groups(&refs, &needle);
                let mut seen = std::collections::HashSet::new();
                let mut last_first = None;
                for group in &found {
                    prop_assert!(!group.is_empty());
                    for c in group {
                        prop_assert!(seen.insert(*c), "container shared between groups");
                    }
                    // Containers inside a group are contiguous leaf indices.
                    for pair in group.windows(2) {
                        prop_assert_eq!(pair[1], pair[0] + 1);
                    }
                    if let Some(prev) = last_first {
                        prop_assert!(group[0] > prev);
                    }
                    last_first = Some(group[0]);
                }
            }

            #[test]
            fn prop_scan_is_deterministic(
                texts in leaf_texts(),
                needle in "[a-c]{1,4}",
            ) {
                let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
                prop_assert_eq!(groups(&refs, &needle), groups(&refs, &needle));
            }
        }
    }
}
