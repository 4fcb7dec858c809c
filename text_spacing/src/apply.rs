// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The marker taxonomy and the tree mutations that realize a decision.
//!
//! A wrapped run has the shape `<ts-open|ts-close><ts-inner>run</ts-inner></ts-open|ts-close>`.
//! The styling layer keys its adjustments off the outer element's class. A run whose parent is a
//! `ts-inner` element has already been processed and is never wrapped again.

use core::fmt;

use crate::{InlineTree, NodeKind, Side};

/// The elements the applier creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    /// Outer container of an opening punctuation run.
    Open,
    /// Outer container of a closing punctuation run.
    Close,
    /// Inner content holder, measured to tell full-width from half-width glyphs.
    Inner,
    /// Standalone, empty thin-space marker.
    ThinSpace,
}

impl WrapperKind {
    /// The element name.
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Open => "ts-open",
            Self::Close => "ts-close",
            Self::Inner => "ts-inner",
            Self::ThinSpace => "ts-thin-sp",
        }
    }
}

/// The kind of marker a run receives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Wrapped as opening punctuation.
    Open,
    /// Wrapped as closing punctuation.
    Close,
    /// A thin-space marker next to the run.
    ThinSpace,
    /// Nothing.
    #[default]
    None,
}

/// The presentation class assigned to a wrapped run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisualClass {
    /// Wrapped, with no presentation effect.
    #[default]
    None,
    /// Trim the blank half of the glyph.
    Trim,
    /// Keep the full glyph.
    Space,
    /// Trim only if that lets the line fit.
    Auto,
    /// Hang outside the start edge of the first line.
    HangFirst,
    /// Hang outside the end edge of the last line.
    HangLast {
        /// The glyph is rendered half-width.
        half_width: bool,
    },
    /// Hang outside the end edge of a line.
    HangEnd {
        /// The glyph is rendered half-width.
        half_width: bool,
    },
}

impl VisualClass {
    /// The class attribute value. [`VisualClass::None`] is the empty string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Trim => "ts-trim",
            Self::Space => "ts-space",
            Self::Auto => "ts-auto",
            Self::HangFirst => "hang-first",
            Self::HangLast { half_width: false } => "hang-last",
            Self::HangLast { half_width: true } => "hang-last hang-hw",
            Self::HangEnd { half_width: false } => "hang-end",
            Self::HangEnd { half_width: true } => "hang-end hang-hw",
        }
    }
}

impl fmt::Display for VisualClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The classification of one processed run.
///
/// `kind == MarkerKind::None` means the run was left alone. A wrapping kind with
/// `class == VisualClass::None` means the run was wrapped but the adjustment was suppressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MarkerOutput {
    /// What the run was marked with.
    pub kind: MarkerKind,
    /// The presentation class of the wrapper.
    pub class: VisualClass,
}

impl MarkerOutput {
    /// No mutation.
    pub const NONE: Self = Self {
        kind: MarkerKind::None,
        class: VisualClass::None,
    };

    /// A thin-space marker.
    pub const THIN_SPACE: Self = Self {
        kind: MarkerKind::ThinSpace,
        class: VisualClass::None,
    };
}

/// The elements created by [`wrap_run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wrapped<N> {
    /// The `ts-open` or `ts-close` container, which carries the class.
    pub outer: N,
    /// The `ts-inner` holder directly around the run.
    pub inner: N,
}

/// Whether `node` is an element created by the applier with the given kind.
pub fn is_marker<T: InlineTree>(tree: &T, node: T::Node, kind: WrapperKind) -> bool {
    tree.kind(node) == NodeKind::Element && tree.is_element_named(node, kind.tag_name())
}

/// Whether `node` already sits in an inner content holder.
pub fn is_wrapped<T: InlineTree>(tree: &T, node: T::Node) -> bool {
    tree.parent(node)
        .is_some_and(|parent| is_marker(tree, parent, WrapperKind::Inner))
}

/// Wraps `node` in an inner holder inside an outer container of kind `outer`.
///
/// Returns `None` when `node` is already wrapped, leaving the tree untouched.
pub fn wrap_run<T: InlineTree>(
    tree: &mut T,
    node: T::Node,
    outer: WrapperKind,
) -> Option<Wrapped<T::Node>> {
    if is_wrapped(tree, node) {
        return None;
    }
    let inner = tree.wrap(node, WrapperKind::Inner);
    let outer = tree.wrap(inner, outer);
    Some(Wrapped { outer, inner })
}

/// Assigns `class` to a wrapper. [`VisualClass::None`] clears the class.
pub fn set_visual_class<T: InlineTree>(tree: &mut T, wrapper: T::Node, class: VisualClass) {
    tree.set_class(wrapper, class.as_str());
}

/// Inserts a thin-space marker on `side` of `node`.
///
/// Nothing is inserted, and `false` returned, when that side already carries one.
pub fn insert_thin_space<T: InlineTree>(tree: &mut T, node: T::Node, side: Side) -> bool {
    let neighbor = match side {
        Side::Before => tree.previous_sibling(node),
        Side::After => tree.next_sibling(node),
    };
    if neighbor.is_some_and(|n| is_marker(tree, n, WrapperKind::ThinSpace)) {
        return false;
    }
    tree.insert_marker(node, side, WrapperKind::ThinSpace);
    true
}
