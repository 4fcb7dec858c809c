// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character-class predicates.
//!
//! General Category and Script lookups come from the ICU4X compiled data. The explicit lists
//! below cover the CJK punctuation that the spacing rules single out; ASCII parentheses,
//! brackets and braces are deliberately never split off or trimmed so that bracket pairs keep
//! their own semantics.

use icu_properties::props::{GeneralCategory, GeneralCategoryGroup, Script};
use icu_properties::CodePointMapData;

use crate::Lang;

/// Ideographic space.
pub const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// CJK stops and commas that punctuation splitting treats like opening/closing punctuation.
const SPLIT_STOPS: &[char] = &[
    '\u{3001}', // 、
    '\u{3002}', // 。
    '\u{FF0C}', // ，
    '\u{FF0E}', // ．
    '\u{FF1A}', // ：
    '\u{FF1B}', // ；
    '\u{FF64}', // ､
    '\u{FF61}', // ｡
    IDEOGRAPHIC_SPACE,
];

/// Stops and commas that may hang at line end.
const HANGING_STOPS: &[char] = &[
    '\u{3001}', '\u{3002}', '\u{FF0C}', '\u{FF0E}', '\u{FF64}', '\u{FF61}',
];

const FULLWIDTH_OPEN: &[char] = &[
    '\u{2018}', '\u{201C}', '\u{301D}', '\u{FF08}', '\u{FF3B}', '\u{FF5B}', '\u{FF5F}', '\u{2329}',
    '\u{3008}', '\u{300A}', '\u{300C}', '\u{300E}', '\u{3010}', '\u{3014}', '\u{3016}', '\u{3018}',
    '\u{301A}',
];

const FULLWIDTH_CLOSE: &[char] = &[
    '\u{2019}', '\u{201D}', '\u{301E}', '\u{301F}', '\u{FF09}', '\u{FF3D}', '\u{FF5D}', '\u{FF60}',
    '\u{232A}', '\u{3009}', '\u{300B}', '\u{300D}', '\u{300F}', '\u{3011}', '\u{3015}', '\u{3017}',
    '\u{3019}', '\u{301B}',
];

/// Full-width stops and commas, trimmed in every language but Traditional Chinese.
const FULLWIDTH_STOPS: &[char] = &['\u{3001}', '\u{3002}', '\u{FF0C}', '\u{FF0E}'];

/// Full-width colon and semicolon, trimmed only in Simplified Chinese.
const FULLWIDTH_COLONS: &[char] = &['\u{FF1A}', '\u{FF1B}'];

/// Separators that count as punctuation for adjacency trimming, besides the paired classes.
const ADJACENT_SEPARATORS: &[char] = &[
    '\u{00B7}', // ·
    '\u{2027}', // ‧
    '\u{30FB}', // ・
    IDEOGRAPHIC_SPACE,
    '\u{FF1A}',
    '\u{FF1B}',
    '\u{3001}',
    '\u{3002}',
    '\u{FF0C}',
    '\u{FF0E}',
];

#[inline]
fn general_category(c: char) -> GeneralCategory {
    CodePointMapData::<GeneralCategory>::new().get(c)
}

#[inline]
fn is_in(c: char, group: GeneralCategoryGroup) -> bool {
    group.contains(general_category(c))
}

/// `\p{M}`
#[inline]
pub fn is_mark(c: char) -> bool {
    is_in(c, GeneralCategoryGroup::Mark)
}

/// `\p{P}`
#[inline]
pub fn is_punctuation(c: char) -> bool {
    is_in(c, GeneralCategoryGroup::Punctuation)
}

/// `\p{L}`
#[inline]
pub fn is_letter(c: char) -> bool {
    is_in(c, GeneralCategoryGroup::Letter)
}

/// `\p{Nd}`
#[inline]
pub fn is_decimal_digit(c: char) -> bool {
    general_category(c) == GeneralCategory::DecimalNumber
}

/// Opening, closing, initial or final punctuation (`Ps`, `Pe`, `Pi`, `Pf`).
#[inline]
fn is_paired_punctuation(c: char) -> bool {
    matches!(
        general_category(c),
        GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
    )
}

/// `Pe` or `Pf`.
#[inline]
pub fn is_closing_punctuation(c: char) -> bool {
    matches!(
        general_category(c),
        GeneralCategory::ClosePunctuation | GeneralCategory::FinalPunctuation
    )
}

/// ASCII `()[]{}`.
#[inline]
pub fn is_ascii_bracket(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}')
}

/// The Halfwidth and Fullwidth Forms block up to the full-width white parenthesis (U+FF01–U+FF60).
#[inline]
pub fn is_fullwidth_form(c: char) -> bool {
    ('\u{FF01}'..='\u{FF60}').contains(&c)
}

/// Han script, Hiragana/Katakana (U+3041–U+30FF) and Katakana phonetic extensions
/// (U+31C0–U+31FF, which also covers CJK strokes).
pub fn is_ideograph(c: char) -> bool {
    ('\u{3041}'..='\u{30FF}').contains(&c)
        || ('\u{31C0}'..='\u{31FF}').contains(&c)
        || CodePointMapData::<Script>::new().get(c) == Script::Han
}

/// An ideograph that is not punctuation.
#[inline]
pub fn is_ideograph_text(c: char) -> bool {
    is_ideograph(c) && !is_punctuation(c)
}

/// A letter that is neither an ideograph nor a full-width form.
#[inline]
pub fn is_alphabetic(c: char) -> bool {
    is_letter(c) && !is_ideograph(c) && !is_fullwidth_form(c)
}

/// A decimal digit that is not a full-width form.
#[inline]
pub fn is_numeric(c: char) -> bool {
    is_decimal_digit(c) && !is_fullwidth_form(c)
}

/// A letter or decimal digit that is neither an ideograph nor a full-width form.
#[inline]
pub fn is_alphanumeric(c: char) -> bool {
    (is_letter(c) || is_decimal_digit(c)) && !is_ideograph(c) && !is_fullwidth_form(c)
}

/// Punctuation that the segmenter isolates into its own run.
pub fn is_segment_punctuation(c: char) -> bool {
    !is_ascii_bracket(c) && (is_paired_punctuation(c) || SPLIT_STOPS.contains(&c))
}

/// Punctuation that may hang at the start of the first line.
pub fn is_hanging_first(c: char) -> bool {
    matches!(c, '\'' | '"' | IDEOGRAPHIC_SPACE)
        || matches!(
            general_category(c),
            GeneralCategory::OpenPunctuation
                | GeneralCategory::InitialPunctuation
                | GeneralCategory::FinalPunctuation
        )
}

/// Punctuation that may hang at the end of the last line.
pub fn is_hanging_last(c: char) -> bool {
    matches!(c, '\'' | '"')
        || matches!(
            general_category(c),
            GeneralCategory::ClosePunctuation
                | GeneralCategory::InitialPunctuation
                | GeneralCategory::FinalPunctuation
        )
}

/// Stops and commas that may hang at the end of any line.
pub fn is_hanging_end(c: char) -> bool {
    HANGING_STOPS.contains(&c)
}

/// Full-width opening punctuation subject to start trimming.
pub fn is_fullwidth_open(c: char) -> bool {
    FULLWIDTH_OPEN.contains(&c)
}

/// Full-width closing punctuation subject to end trimming.
pub fn is_fullwidth_close(c: char) -> bool {
    FULLWIDTH_CLOSE.contains(&c)
}

/// Stops, commas, colons and semicolons whose trimming depends on the language.
///
/// Stops and commas are trimmed except in Traditional Chinese, where they are centered in the
/// character cell. Colons and semicolons are trimmed only in Simplified Chinese.
pub fn is_trimmable_stop(c: char, lang: Option<&Lang>) -> bool {
    (lang == Some(&Lang::ZhHans) && FULLWIDTH_COLONS.contains(&c))
        || (lang != Some(&Lang::ZhHant) && FULLWIDTH_STOPS.contains(&c))
}

/// Punctuation that lets a following opening bracket be trimmed.
pub fn is_adjacent_before_open(c: char) -> bool {
    is_paired_punctuation(c) || ADJACENT_SEPARATORS.contains(&c)
}

/// Punctuation that lets a preceding closing bracket be trimmed.
pub fn is_adjacent_after_close(c: char) -> bool {
    is_closing_punctuation(c) || ADJACENT_SEPARATORS.contains(&c)
}

/// The base character of a run that is exactly one character followed by combining marks.
///
/// ```
/// use text_spacing::classify::sole_cluster;
///
/// assert_eq!(sole_cluster("「"), Some('「'));
/// assert_eq!(sole_cluster("\u{3002}\u{20DD}"), Some('\u{3002}'));
/// assert_eq!(sole_cluster("「」"), None);
/// assert_eq!(sole_cluster(""), None);
/// ```
pub fn sole_cluster(text: &str) -> Option<char> {
    let mut chars = text.chars();
    let first = chars.next()?;
    chars.all(is_mark).then_some(first)
}

/// The last character of `text` that is not a combining mark.
pub fn last_base(text: &str) -> Option<char> {
    text.chars().rev().find(|&c| !is_mark(c))
}

/// Whether the last base character of `text` satisfies `pred`, skipping trailing marks.
///
/// Text made only of marks never matches.
pub fn ends_with_cluster(text: &str, pred: impl Fn(char) -> bool) -> bool {
    last_base(text).is_some_and(pred)
}

/// Whether the first character of `text` satisfies `pred`.
pub fn starts_with(text: &str, pred: impl Fn(char) -> bool) -> bool {
    text.chars().next().is_some_and(pred)
}
