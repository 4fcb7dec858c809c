// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splitting text into runs that later stages can treat atomically.
//!
//! A boundary is placed before a character when:
//!
//! - it is segment punctuation (see [`is_segment_punctuation`]), or
//! - it is not a combining mark and the preceding base character is segment punctuation, or
//! - it is not a combining mark and one of it and the preceding base character is an ideograph
//!   (not punctuation) while the other is a letter or digit outside the ideograph and full-width
//!   ranges.
//!
//! Combining marks always stay with their base character, so every punctuation mark ends up in a
//! run of its own together with its marks, and mixed CJK/Latin text is split at script changes.
//! The runs concatenate back to the input.

use core::iter::FusedIterator;

use crate::classify::{is_alphanumeric, is_ideograph_text, is_mark, is_segment_punctuation};

/// Splits `text` at punctuation and ideograph/alphanumeric boundaries.
///
/// ```
/// let runs: Vec<_> = text_spacing::segment("これは「Rust」です。").collect();
/// assert_eq!(runs, ["これは", "「", "Rust", "」", "です", "。"]);
/// ```
pub fn segment(text: &str) -> Segments<'_> {
    Segments { text }
}

/// Iterator over the runs of a text, created by [`segment`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    text: &'a str,
}

impl<'a> Segments<'a> {
    /// The text not yet yielded.
    pub fn remainder(&self) -> &'a str {
        self.text
    }
}

/// Whether a boundary falls between base character `prev` (with any marks after it) and `c`.
fn is_boundary(prev: char, c: char) -> bool {
    if is_segment_punctuation(c) {
        return true;
    }
    if is_mark(c) {
        return false;
    }
    is_segment_punctuation(prev)
        || (is_ideograph_text(prev) && is_alphanumeric(c))
        || (is_alphanumeric(prev) && is_ideograph_text(c))
}

/// Byte offset of the first boundary in `text`, if any.
fn next_boundary(text: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    let (_, mut base) = chars.next()?;
    for (ix, c) in chars {
        if is_boundary(base, c) {
            return Some(ix);
        }
        if !is_mark(c) {
            base = c;
        }
    }
    None
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.text.is_empty() {
            return None;
        }
        let end = next_boundary(self.text).unwrap_or(self.text.len());
        let (run, rest) = self.text.split_at(end);
        self.text = rest;
        Some(run)
    }
}

impl FusedIterator for Segments<'_> {}
