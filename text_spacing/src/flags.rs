// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flag records for `text-spacing` and `hanging-punctuation`.
//!
//! Both properties are parsed leniently: unknown keywords are skipped so that newer syntax
//! degrades to the defaults instead of failing. Strict parsing of a single keyword is available
//! through the [`FromStr`] implementations of [`TextSpacingKeyword`] and
//! [`HangingPunctuationKeyword`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// A tokenized property value as handed over by the host style system.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// A single identifier, e.g. `normal` or `trim-start`.
    Ident(String),
    /// A space-separated list of component values.
    SpaceList(Vec<PropertyValue>),
    /// A numeric value. Never meaningful for these properties, and ignored.
    Number(f64),
}

impl PropertyValue {
    fn ident(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// The component values: the list items for a list, or the value itself.
    fn components(&self) -> &[Self] {
        match self {
            Self::SpaceList(values) => values,
            _ => core::slice::from_ref(self),
        }
    }
}

impl From<&str> for PropertyValue {
    /// Tokenizes on ASCII whitespace: one token becomes an [`Ident`](Self::Ident), several become
    /// a [`SpaceList`](Self::SpaceList).
    fn from(value: &str) -> Self {
        let idents: Vec<Self> = value
            .split_ascii_whitespace()
            .map(|token| Self::Ident(token.into()))
            .collect();
        match <[Self; 1]>::try_from(idents) {
            Ok([ident]) => ident,
            Err(idents) => Self::SpaceList(idents),
        }
    }
}

/// An error returned from parsing a single property keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseKeywordError {
    /// The input was empty.
    Empty,
    /// The input is not a keyword of the property.
    Unknown,
}

impl fmt::Display for ParseKeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty keyword"),
            Self::Unknown => f.write_str("unknown keyword"),
        }
    }
}

impl core::error::Error for ParseKeywordError {}

fn keyword_of<K: Copy>(s: &str, table: &[(&str, K)]) -> Result<K, ParseKeywordError> {
    if s.is_empty() {
        return Err(ParseKeywordError::Empty);
    }
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .map(|(_, keyword)| *keyword)
        .ok_or(ParseKeywordError::Unknown)
}

/// A keyword of the `text-spacing` property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSpacingKeyword {
    /// `normal`
    Normal,
    /// `none`
    None,
    /// `auto`
    Auto,
    /// `trim-start`
    TrimStart,
    /// `space-start`
    SpaceStart,
    /// `space-first`
    SpaceFirst,
    /// `trim-end`
    TrimEnd,
    /// `space-end`
    SpaceEnd,
    /// `allow-end`
    AllowEnd,
    /// `trim-adjacent`
    TrimAdjacent,
    /// `space-adjacent`
    SpaceAdjacent,
    /// `ideograph-alpha`
    IdeographAlpha,
    /// `ideograph-numeric`
    IdeographNumeric,
}

impl TextSpacingKeyword {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("normal", Self::Normal),
        ("none", Self::None),
        ("auto", Self::Auto),
        ("trim-start", Self::TrimStart),
        ("space-start", Self::SpaceStart),
        ("space-first", Self::SpaceFirst),
        ("trim-end", Self::TrimEnd),
        ("space-end", Self::SpaceEnd),
        ("allow-end", Self::AllowEnd),
        ("trim-adjacent", Self::TrimAdjacent),
        ("space-adjacent", Self::SpaceAdjacent),
        ("ideograph-alpha", Self::IdeographAlpha),
        ("ideograph-numeric", Self::IdeographNumeric),
    ];
}

impl FromStr for TextSpacingKeyword {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        keyword_of(s, Self::TABLE)
    }
}

/// A keyword of the `hanging-punctuation` property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HangingPunctuationKeyword {
    /// `none`
    None,
    /// `first`
    First,
    /// `force-end`
    ForceEnd,
    /// `allow-end`
    AllowEnd,
    /// `last`
    Last,
}

impl HangingPunctuationKeyword {
    const TABLE: &'static [(&'static str, Self)] = &[
        ("none", Self::None),
        ("first", Self::First),
        ("force-end", Self::ForceEnd),
        ("allow-end", Self::AllowEnd),
        ("last", Self::Last),
    ];
}

impl FromStr for HangingPunctuationKeyword {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        keyword_of(s, Self::TABLE)
    }
}

/// Resolved `text-spacing` flags.
///
/// Invariant: `trim_end == false` implies `allow_end == false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextSpacing {
    /// Trim opening punctuation at line start (`trim-start` or `space-first`).
    pub trim_start: bool,
    /// Like `trim_start`, except on the first line of a block (`space-first`).
    pub space_first: bool,
    /// Trim closing punctuation at line end (`trim-end` or `allow-end`).
    pub trim_end: bool,
    /// Trim at line end only when the punctuation would otherwise overflow (`allow-end`).
    pub allow_end: bool,
    /// Trim full-width punctuation adjacent to other punctuation.
    pub trim_adjacent: bool,
    /// Insert a thin space between ideographs and letters.
    pub ideograph_alpha: bool,
    /// Insert a thin space between ideographs and digits.
    pub ideograph_numeric: bool,
}

impl TextSpacing {
    /// `none` = `space-start space-end space-adjacent`
    pub const NONE: Self = Self {
        trim_start: false,
        space_first: false,
        trim_end: false,
        allow_end: false,
        trim_adjacent: false,
        ideograph_alpha: false,
        ideograph_numeric: false,
    };

    /// `normal` = `space-first trim-end trim-adjacent ideograph-alpha ideograph-numeric`
    pub const NORMAL: Self = Self {
        trim_start: true,
        space_first: true,
        trim_end: true,
        allow_end: false,
        trim_adjacent: true,
        ideograph_alpha: true,
        ideograph_numeric: true,
    };

    /// `auto` = `trim-start trim-end trim-adjacent ideograph-alpha ideograph-numeric`
    pub const AUTO: Self = Self {
        trim_start: true,
        space_first: false,
        trim_end: true,
        allow_end: false,
        trim_adjacent: true,
        ideograph_alpha: true,
        ideograph_numeric: true,
    };

    /// The starting point for explicit keyword lists: `space-first trim-end trim-adjacent`.
    ///
    /// This is [`NORMAL`](Self::NORMAL) without the ideograph spacing.
    pub const BASE: Self = Self {
        trim_start: true,
        space_first: true,
        trim_end: true,
        allow_end: false,
        trim_adjacent: true,
        ideograph_alpha: false,
        ideograph_numeric: false,
    };

    /// Parses a property value, or returns [`NORMAL`](Self::NORMAL) for an absent one.
    ///
    /// The keywords `normal`, `none` and `auto` select a preset when they are the whole value.
    /// Any other value starts from [`BASE`](Self::BASE) and applies its keywords in order, the
    /// last keyword touching a field winning. Unknown keywords are ignored.
    pub fn parse(value: Option<&PropertyValue>) -> Self {
        let Some(value) = value else {
            return Self::NORMAL;
        };
        match value.ident().map(str::parse::<TextSpacingKeyword>) {
            Some(Ok(TextSpacingKeyword::Normal)) => return Self::NORMAL,
            Some(Ok(TextSpacingKeyword::None)) => return Self::NONE,
            Some(Ok(TextSpacingKeyword::Auto)) => return Self::AUTO,
            _ => {}
        }
        Self::from_keywords(
            value
                .components()
                .iter()
                .filter_map(PropertyValue::ident)
                .filter_map(|name| name.parse().ok()),
        )
    }

    /// Applies `keywords` in order on top of [`BASE`](Self::BASE).
    pub fn from_keywords(keywords: impl IntoIterator<Item = TextSpacingKeyword>) -> Self {
        keywords
            .into_iter()
            .fold(Self::BASE, |spacing, keyword| spacing.with_keyword(keyword))
    }

    /// Returns a copy with one list keyword applied.
    ///
    /// The whole-value keywords (`normal`, `none`, `auto`) have no effect inside a list.
    #[must_use]
    pub fn with_keyword(mut self, keyword: TextSpacingKeyword) -> Self {
        match keyword {
            TextSpacingKeyword::TrimStart => {
                self.trim_start = true;
                self.space_first = false;
            }
            TextSpacingKeyword::SpaceStart => {
                self.trim_start = false;
                self.space_first = false;
            }
            TextSpacingKeyword::SpaceFirst => {
                self.trim_start = true;
                self.space_first = true;
            }
            TextSpacingKeyword::TrimEnd => {
                self.trim_end = true;
                self.allow_end = false;
            }
            TextSpacingKeyword::SpaceEnd => {
                self.trim_end = false;
                self.allow_end = false;
            }
            TextSpacingKeyword::AllowEnd => {
                self.trim_end = true;
                self.allow_end = true;
            }
            TextSpacingKeyword::TrimAdjacent => self.trim_adjacent = true,
            TextSpacingKeyword::SpaceAdjacent => self.trim_adjacent = false,
            TextSpacingKeyword::IdeographAlpha => self.ideograph_alpha = true,
            TextSpacingKeyword::IdeographNumeric => self.ideograph_numeric = true,
            TextSpacingKeyword::Normal | TextSpacingKeyword::None | TextSpacingKeyword::Auto => {}
        }
        self
    }

    /// Whether no spacing adjustment at all is requested.
    pub fn is_none(self) -> bool {
        !self.trim_start
            && !self.trim_end
            && !self.trim_adjacent
            && !self.ideograph_alpha
            && !self.ideograph_numeric
    }

    /// Whether thin spaces between ideographs and alphanumerics are requested.
    pub fn spaces_ideographs(self) -> bool {
        self.ideograph_alpha || self.ideograph_numeric
    }
}

impl Default for TextSpacing {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Resolved `hanging-punctuation` flags.
///
/// Invariant: `allow_end == true` implies `end == true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HangingPunctuation {
    /// Opening punctuation may hang at the start of the first line.
    pub first: bool,
    /// Stops and commas may hang at line end (`force-end` or `allow-end`).
    pub end: bool,
    /// Stops and commas hang only when they would not otherwise fit (`allow-end`).
    pub allow_end: bool,
    /// Closing punctuation may hang at the end of the last line.
    pub last: bool,
}

impl HangingPunctuation {
    /// `none`
    pub const NONE: Self = Self {
        first: false,
        end: false,
        allow_end: false,
        last: false,
    };

    /// Parses a property value; an absent value or `none` yields [`NONE`](Self::NONE).
    pub fn parse(value: Option<&PropertyValue>) -> Self {
        let Some(value) = value else {
            return Self::NONE;
        };
        let keyword = value.ident().map(str::parse::<HangingPunctuationKeyword>);
        if let Some(Ok(HangingPunctuationKeyword::None)) = keyword {
            return Self::NONE;
        }
        Self::from_keywords(
            value
                .components()
                .iter()
                .filter_map(PropertyValue::ident)
                .filter_map(|name| name.parse().ok()),
        )
    }

    /// Applies `keywords` in order on top of [`NONE`](Self::NONE).
    pub fn from_keywords(keywords: impl IntoIterator<Item = HangingPunctuationKeyword>) -> Self {
        keywords
            .into_iter()
            .fold(Self::NONE, |hanging, keyword| hanging.with_keyword(keyword))
    }

    /// Returns a copy with one keyword applied. `none` has no effect inside a list.
    #[must_use]
    pub fn with_keyword(mut self, keyword: HangingPunctuationKeyword) -> Self {
        match keyword {
            HangingPunctuationKeyword::First => self.first = true,
            HangingPunctuationKeyword::ForceEnd => self.end = true,
            HangingPunctuationKeyword::AllowEnd => {
                self.end = true;
                self.allow_end = true;
            }
            HangingPunctuationKeyword::Last => self.last = true,
            HangingPunctuationKeyword::None => {}
        }
        self
    }

    /// Whether no punctuation may hang.
    pub fn is_none(self) -> bool {
        !self.first && !self.last && !self.end
    }
}
