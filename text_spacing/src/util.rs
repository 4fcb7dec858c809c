// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word-boundary matching on ASCII keyword strings.

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// `s` starts with `word` followed by a word boundary.
pub(crate) fn starts_with_word(s: &str, word: &str) -> bool {
    s.strip_prefix(word)
        .is_some_and(|rest| !rest.bytes().next().is_some_and(is_word_byte))
}

/// `s` contains `needle` followed by a word boundary.
pub(crate) fn contains_word_end(s: &str, needle: &str) -> bool {
    s.match_indices(needle)
        .any(|(ix, _)| starts_with_word(&s[ix..], needle))
}

/// `s` contains `word` with a word boundary on both sides.
pub(crate) fn contains_word(s: &str, word: &str) -> bool {
    s.match_indices(word).any(|(ix, _)| {
        let bounded_before = ix == 0 || !is_word_byte(s.as_bytes()[ix - 1]);
        bounded_before && starts_with_word(&s[ix..], word)
    })
}
