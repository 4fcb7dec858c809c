// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seams: the rendered tree and its geometry.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::WrapperKind;

/// The kind of a tree node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// An element.
    Element,
    /// A text node.
    Text,
    /// Anything else (comments, processing instructions, ...).
    Other,
}

/// A side of a node in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Immediately before the node.
    Before,
    /// Immediately after the node.
    After,
}

/// CSS `position`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Positioning {
    /// `static`
    #[default]
    Static,
    /// `relative`
    Relative,
    /// `absolute`
    Absolute,
    /// `fixed`
    Fixed,
    /// `sticky`
    Sticky,
}

/// The placement an element specifies for itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Placement {
    /// The `position` value.
    pub positioning: Positioning,
    /// Whether `float` is anything other than `none`.
    pub floated: bool,
}

impl Placement {
    /// Absolutely positioned, fixed or floated.
    pub fn is_out_of_flow(self) -> bool {
        matches!(self.positioning, Positioning::Absolute | Positioning::Fixed) || self.floated
    }
}

/// A box in the coordinate space of the rendered page.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a rect from its left/top corner and size.
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// The extent along the inline axis.
    pub fn inline_size(&self, vertical: bool) -> f32 {
        if vertical {
            self.height
        } else {
            self.width
        }
    }

    /// The coordinate along the block axis, i.e. which line the box sits on.
    pub fn line_position(&self, vertical: bool) -> f32 {
        if vertical {
            self.left
        } else {
            self.top
        }
    }
}

/// CSS `text-orientation`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextOrientation {
    /// `mixed`
    #[default]
    Mixed,
    /// `upright`
    Upright,
    /// `sideways`
    Sideways,
}

/// CSS `text-combine-upright`.
///
/// Hosts should report the legacy `-webkit-text-combine: horizontal` as [`All`](Self::All).
/// Only `all` sets a run upright, so other values are reported as [`None`](Self::None).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextCombineUpright {
    /// `none`
    #[default]
    None,
    /// `all`
    All,
}

/// The computed style values the engine reads.
///
/// Lengths are in the same unit as [`Rect`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ComputedStyle {
    /// `font-size`
    pub font_size: f32,
    /// `margin-inline-start`
    pub margin_inline_start: f32,
    /// `margin-inline-end`
    pub margin_inline_end: f32,
    /// `border-inline-start-width`
    pub border_inline_start_width: f32,
    /// `border-inline-end-width`
    pub border_inline_end_width: f32,
    /// `padding-inline-start`
    pub padding_inline_start: f32,
    /// `padding-inline-end`
    pub padding_inline_end: f32,
    /// `text-orientation`
    pub text_orientation: TextOrientation,
    /// `text-combine-upright`
    pub text_combine_upright: TextCombineUpright,
}

fn is_nonzero(length: f32) -> bool {
    length != 0.0 && !length.is_nan()
}

impl ComputedStyle {
    /// Any non-zero margin, border or padding on the inline-start edge.
    pub fn has_inline_start_spacing(&self) -> bool {
        is_nonzero(self.margin_inline_start)
            || is_nonzero(self.border_inline_start_width)
            || is_nonzero(self.padding_inline_start)
    }

    /// Any non-zero margin, border or padding on the inline-end edge.
    pub fn has_inline_end_spacing(&self) -> bool {
        is_nonzero(self.margin_inline_end)
            || is_nonzero(self.border_inline_end_width)
            || is_nonzero(self.padding_inline_end)
    }

    /// Whether glyphs are set upright in vertical writing.
    pub fn is_upright(&self) -> bool {
        self.text_orientation == TextOrientation::Upright
            || self.text_combine_upright == TextCombineUpright::All
    }
}

/// The rendered tree holding the inline content.
///
/// Nodes are small copyable handles. Reads must reflect earlier mutations made through this
/// trait.
pub trait InlineTree {
    /// Node handle type.
    type Node: Copy + Eq + core::fmt::Debug;

    /// The kind of `node`.
    fn kind(&self, node: Self::Node) -> NodeKind;

    /// The local name of an element, `None` for other nodes.
    fn local_name(&self, node: Self::Node) -> Option<&str>;

    /// The namespace URI of an element.
    fn namespace(&self, node: Self::Node) -> Option<&str>;

    /// An attribute value of an element.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// The content of a text node, `None` for other nodes.
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// The parent element.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// The last child node.
    fn last_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// The previous sibling node.
    fn previous_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// The next sibling node.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// The `position`/`float` an element specifies in its own style attribute.
    fn placement(&self, node: Self::Node) -> Placement;

    /// The `white-space` an element specifies in its own style attribute.
    fn white_space_override(&self, node: Self::Node) -> Option<&str>;

    /// Sets or clears the `white-space` in an element's own style attribute.
    fn set_white_space_override(&mut self, node: Self::Node, value: Option<&str>);

    /// Moves the first `offset` bytes of a text node into a new text node inserted immediately
    /// before it, returning the new node. `node` keeps the remainder.
    fn split_text_before(&mut self, node: Self::Node, offset: usize) -> Self::Node;

    /// Replaces `node` with a new element of the given kind that contains `node`.
    fn wrap(&mut self, node: Self::Node, kind: WrapperKind) -> Self::Node;

    /// Inserts a new, empty element of the given kind next to `node`.
    fn insert_marker(&mut self, node: Self::Node, side: Side, kind: WrapperKind) -> Self::Node;

    /// Sets the presentation class of an element. The empty string clears it.
    fn set_class(&mut self, node: Self::Node, class: &str);

    /// Whether `node` is an element with the given local name.
    fn is_element_named(&self, node: Self::Node, name: &str) -> bool {
        self.local_name(node) == Some(name)
    }

    /// The nearest preceding sibling that is an element.
    fn previous_element_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let mut sibling = self.previous_sibling(node);
        while let Some(s) = sibling {
            if self.kind(s) == NodeKind::Element {
                return Some(s);
            }
            sibling = self.previous_sibling(s);
        }
        None
    }

    /// The nearest following sibling that is an element.
    fn next_element_sibling(&self, node: Self::Node) -> Option<Self::Node> {
        let mut sibling = self.next_sibling(node);
        while let Some(s) = sibling {
            if self.kind(s) == NodeKind::Element {
                return Some(s);
            }
            sibling = self.next_sibling(s);
        }
        None
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// The text nodes under `root` (inclusive) in document order.
    fn text_descendants(&self, root: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: SmallVec<[Self::Node; 16]> = SmallVec::new();
        stack.push(root);
        while let Some(node) = stack.pop() {
            if self.kind(node) == NodeKind::Text {
                out.push(node);
                continue;
            }
            let mut child = self.last_child(node);
            while let Some(c) = child {
                stack.push(c);
                child = self.previous_sibling(c);
            }
        }
        out
    }
}

/// Geometry of the rendered tree, as produced by the external layout engine.
///
/// Queries may trigger a relayout and must reflect every mutation made so far; implementations
/// must not cache results across mutations.
pub trait Geometry: InlineTree {
    /// The line boxes of `node`, in order. A text node broken across lines has several.
    fn client_rects(&self, node: Self::Node) -> SmallVec<[Rect; 2]>;

    /// The border box of an element relative to its offset parent.
    fn offset_rect(&self, node: Self::Node) -> Rect;

    /// The computed style of an element.
    fn computed_style(&self, node: Self::Node) -> ComputedStyle;
}
