//! Greedy partial-overlap probe.
//!
//! [`part_contains`] is the single primitive the fragment scanner is built
//! on. It is deliberately *not* a general substring search: the scan is a
//! linear, non-backtracking pointer walk, so a needle whose prefix repeats
//! inside itself can be under-reported (`"aa"` against `"aaa"` matches once,
//! `"ab"` is not found in `"aab"`). Replacement semantics across existing
//! documents depend on this exact behavior; do not swap in `str::find` or a
//! KMP-style matcher.

/// Find where a maximal run of `needle`'s prefix begins inside `haystack`.
///
/// Walks `haystack` once, advancing a needle pointer on every matching
/// character and resetting it to zero on any mismatch without rewinding the
/// haystack pointer. Stops early once the whole needle has matched.
///
/// Returns the char offset at which the matched run starts, whether that run
/// is a full occurrence or a partial one that ran off the end of `haystack`;
/// callers distinguish the two by comparing `offset + needle_len` against
/// the haystack length. Returns `None` when no needle-prefix run of length
/// >= 1 survives to the end of `haystack`.
///
/// Offsets and lengths are counted in `char`s, not bytes.
pub fn part_contains(haystack: &str, needle: &str) -> Option<usize> {
    let needle: Vec<char> = needle.chars().collect();
    if needle.is_empty() {
        return None;
    }

    let mut matched = 0;
    let mut pos = 0;
    for ch in haystack.chars() {
        if ch == needle[matched] {
            matched += 1;
            pos += 1;
            if matched == needle.len() {
                break;
            }
        } else {
            // No rewind: the current char is consumed, not retried against
            // the needle's first char.
            matched = 0;
            pos += 1;
        }
    }

    if matched > 0 { Some(pos - matched) } else { None }
}

/// Number of chars in `s`.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The last `n` chars of `s`, or all of `s` when it is shorter.
pub(crate) fn tail_chars(s: &str, n: usize) -> &str {
    let len = char_len(s);
    if len <= n {
        return s;
    }
    s.char_indices()
        .nth(len - n)
        .map(|(idx, _)| &s[idx..])
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_at_start() {
        assert_eq!(part_contains("abcdefg", "abcde"), Some(0));
    }

    #[test]
    fn test_match_in_middle() {
        assert_eq!(part_contains("abcdefg", "ef"), Some(4));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(part_contains("abcdefg", "efd"), None);
    }

    #[test]
    fn test_tail_overlap() {
        // "efg" matches the needle's first three chars and runs off the end.
        assert_eq!(part_contains("abcdefg", "efghijk"), Some(4));
    }

    #[test]
    fn test_identity() {
        assert_eq!(part_contains("abc", "abc"), Some(0));
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(part_contains("", "abc"), None);
        assert_eq!(part_contains("abc", ""), None);
    }

    #[test]
    fn test_no_backtracking_is_preserved() {
        // A true substring search would find "ab" at offset 1; the greedy
        // scan consumes the second 'a' while the needle pointer is on 'b'
        // and never recovers.
        assert_eq!(part_contains("aab", "ab"), None);
        // The overlapping second occurrence of "aa" in "aaa" is invisible.
        assert_eq!(part_contains("aaa", "aa"), Some(0));
    }

    #[test]
    fn test_multibyte_offsets_are_char_based() {
        assert_eq!(part_contains("测试文本", "文本"), Some(2));
        assert_eq!(part_contains("测试文", "文本内"), Some(2));
    }

    #[test]
    fn test_tail_chars() {
        assert_eq!(tail_chars("abcdef", 3), "def");
        assert_eq!(tail_chars("ab", 3), "ab");
        assert_eq!(tail_chars("测试文本", 2), "文本");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(256))]

            #[test]
            fn prop_string_part_contains_itself_at_zero(s in ".{1,24}") {
                prop_assert_eq!(part_contains(&s, &s), Some(0));
            }

            #[test]
            fn prop_offset_is_within_haystack(
                hay in "[a-c]{0,16}",
                needle in "[a-c]{1,6}",
            ) {
                if let Some(idx) = part_contains(&hay, &needle) {
                    prop_assert!(idx < char_len(&hay));
                }
            }

            #[test]
            fn prop_full_match_agrees_with_substring_presence(
                hay in "[a-c]{0,16}",
                needle in "[a-c]{1,6}",
            ) {
                // The probe may under-report, but whenever it claims a full
                // in-bounds occurrence, the occurrence must be real.
                if let Some(idx) = part_contains(&hay, &needle) {
                    let nlen = char_len(&needle);
                    if idx + nlen <= char_len(&hay) {
                        let slice: String =
                            hay.chars().skip(idx).take(nlen).collect();
                        prop_assert_eq!(slice, needle);
                    }
                }
            }
        }
    }
}
