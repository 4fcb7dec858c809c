// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The inline fragments ("checkpoints") a layout controller hands over per laid-out block.

use alloc::rc::Rc;
use alloc::string::String;

use crate::util::{contains_word, starts_with_word};
use crate::PropertyValue;

fn is_collapsible_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{000C}')
}

/// How white space is processed in a fragment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Whitespace {
    /// All white space is preserved (`pre`, `pre-wrap`, `break-spaces`).
    Preserve,
    /// Newlines are preserved, other white space collapses (`pre-line`).
    Newline,
    /// All white space collapses (`normal`, `nowrap`).
    #[default]
    Collapse,
}

impl Whitespace {
    /// Whether a text node with this content renders nothing.
    pub fn can_ignore(self, text: &str) -> bool {
        match self {
            Self::Preserve => text.is_empty(),
            Self::Newline => text.chars().all(|c| matches!(c, ' ' | '\t' | '\u{000C}')),
            Self::Collapse => text.chars().all(is_collapsible_space),
        }
    }

    /// Whether text with this content ends with a preserved newline.
    pub fn ends_with_forced_break(self, text: &str) -> bool {
        match self {
            Self::Preserve => text.ends_with('\n'),
            Self::Newline => text
                .chars()
                .rev()
                .take_while(|&c| is_collapsible_space(c))
                .any(|c| c == '\n'),
            Self::Collapse => false,
        }
    }

    /// Whether text with this content starts with a preserved newline.
    pub fn starts_with_forced_break(self, text: &str) -> bool {
        match self {
            Self::Preserve => text.starts_with('\n'),
            Self::Newline => text
                .chars()
                .take_while(|&c| is_collapsible_space(c))
                .any(|c| c == '\n'),
            Self::Collapse => false,
        }
    }
}

/// A computed `display` value, kept as written (e.g. `inline-block`, `block flow-root`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayValue(String);

impl DisplayValue {
    /// Wraps a `display` value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The value as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the outer display type is `inline` or `ruby` (including `inline-block`,
    /// `ruby-text` and friends).
    pub fn is_inline_level(&self) -> bool {
        starts_with_word(&self.0, "inline") || starts_with_word(&self.0, "ruby")
    }

    /// Whether the value establishes a flex or grid container (including the inline variants).
    pub fn is_flex_or_grid(&self) -> bool {
        contains_word(&self.0, "flex") || contains_word(&self.0, "grid")
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One unit of the rendered inline content of a block.
///
/// A block's fragments are handed over in document order. A text node usually contributes two
/// fragments: one positioned before it and one after it (`after == true`).
#[derive(Clone, Debug)]
pub struct Fragment<N> {
    /// The rendered node this fragment is positioned at.
    pub view_node: Option<N>,
    /// The source document node the rendered node was generated from.
    pub source_node: Option<N>,
    /// The enclosing fragment context.
    pub parent: Option<Rc<Self>>,
    /// Whether the position is after the node rather than before it.
    pub after: bool,
    /// Whether the node is laid out inline.
    pub inline: bool,
    /// The explicit `display` of an element; `None` for text.
    pub display: Option<DisplayValue>,
    /// White space processing mode.
    pub whitespace: Whitespace,
    /// The `lang` in effect, if specified on this node.
    pub lang: Option<String>,
    /// Whether the writing mode is vertical.
    pub vertical: bool,
    /// One-based index of the fragment of the node across pages or columns.
    pub fragment_index: usize,
    /// The inherited `text-spacing` value.
    pub text_spacing: Option<PropertyValue>,
    /// The inherited `hanging-punctuation` value.
    pub hanging_punctuation: Option<PropertyValue>,
}

impl<N> Fragment<N> {
    /// Creates an inline fragment positioned before `view_node`, with no style information.
    pub fn new(view_node: N) -> Self {
        Self {
            view_node: Some(view_node),
            source_node: None,
            parent: None,
            after: false,
            inline: true,
            display: None,
            whitespace: Whitespace::Collapse,
            lang: None,
            vertical: false,
            fragment_index: 1,
            text_spacing: None,
            hanging_punctuation: None,
        }
    }

    /// The `display` value, if any.
    pub fn display(&self) -> Option<&DisplayValue> {
        self.display.as_ref()
    }

    /// The parent context, if any.
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// Whether this fragment has an explicit display that is not inline-level.
    pub(crate) fn is_block_level(&self) -> bool {
        self.display().is_some_and(|d| !d.is_inline_level())
    }
}
