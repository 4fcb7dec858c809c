// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge classification of the text fragments of one laid-out block.
//!
//! For each participating text fragment, two directional scans over the block's fragments find
//! the nearest non-empty text neighbor on each side and whether a block edge or a forced line
//! break comes first. Block-level fragments, `br` and embedded content end a scan without being
//! treated as neighbors. Inline elements and empty text are skipped.

use crate::{Config, Fragment, InlineTree, NodeKind, Whitespace};

/// Elements that end an edge scan like a block boundary.
const EMBEDDED_CONTENT: &[&str] = &[
    "audio", "canvas", "embed", "iframe", "img", "math", "object", "picture", "svg", "video",
];

/// Where a block starts relative to the content before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockEntry {
    /// The block's content starts here, not in an earlier page or column, and nothing in flow
    /// precedes its first fragment.
    pub is_first_fragment: bool,
    /// The block's first line follows a forced line break (or is the first line).
    pub is_after_forced_line_break: bool,
}

impl BlockEntry {
    /// Computes the entry context of a block from its own fragment and its checkpoints.
    ///
    /// Without a block fragment the content counts as a fresh start.
    pub fn compute<T: InlineTree>(
        tree: &T,
        config: &Config,
        block: Option<&Fragment<T::Node>>,
        checkpoints: &[Fragment<T::Node>],
    ) -> Self {
        let is_first_fragment = block.is_none_or(|block| {
            block.fragment_index == 1 && is_first_in_block(tree, config, checkpoints)
        });
        let is_after_forced_line_break =
            is_first_fragment || follows_forced_line_break(tree, checkpoints);
        Self {
            is_first_fragment,
            is_after_forced_line_break,
        }
    }
}

/// The edge flags and neighbors of one text fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeInfo<N> {
    /// No in-flow text precedes this one since the last break.
    pub is_first_after_break: bool,
    /// First text of a block that starts here.
    pub is_first_in_block: bool,
    /// Directly follows a forced line break.
    pub is_first_after_forced_line_break: bool,
    /// Directly precedes a forced line break or the end of the block's fragments.
    pub is_last_before_forced_line_break: bool,
    /// Last in-flow content of the block.
    pub is_last_in_block: bool,
    /// Nearest preceding non-empty text.
    pub prev: Option<N>,
    /// Nearest following non-empty text.
    pub next: Option<N>,
}

impl<N> EdgeInfo<N> {
    /// No edges and no neighbors.
    pub const fn interior() -> Self {
        Self {
            is_first_after_break: false,
            is_first_in_block: false,
            is_first_after_forced_line_break: false,
            is_last_before_forced_line_break: false,
            is_last_in_block: false,
            prev: None,
            next: None,
        }
    }
}

/// Whether `node` is an element taken out of the line: layout-generated, absolutely
/// positioned, fixed or floated.
pub fn is_out_of_line<T: InlineTree>(tree: &T, config: &Config, node: T::Node) -> bool {
    tree.kind(node) == NodeKind::Element
        && (tree.attribute(node, config.special_attribute).is_some()
            || tree.placement(node).is_out_of_flow())
}

/// Whether a fragment is a text run the engine processes: positioned before an inline,
/// non-ignorable text node that is attached to the tree.
pub fn is_text_participant<T: InlineTree>(tree: &T, fragment: &Fragment<T::Node>) -> bool {
    if fragment.after || !fragment.inline || fragment.display.is_some() {
        return false;
    }
    if fragment.parent.is_none() {
        return false;
    }
    let Some(node) = fragment.view_node else {
        return false;
    };
    tree.parent(node).is_some()
        && tree
            .text(node)
            .is_some_and(|text| !fragment.whitespace.can_ignore(text))
}

/// Classifies the fragment at `index` of a block's checkpoints.
///
/// Call this for fragments that pass [`is_text_participant`].
pub fn classify_edges<T: InlineTree>(
    tree: &T,
    config: &Config,
    entry: BlockEntry,
    checkpoints: &[Fragment<T::Node>],
    index: usize,
) -> EdgeInfo<T::Node> {
    let backward = scan_backward(tree, entry, checkpoints, index);
    let forward = scan_forward(tree, config, checkpoints, index);
    EdgeInfo {
        is_first_after_break: backward.after_break,
        is_first_in_block: backward.in_block,
        is_first_after_forced_line_break: backward.after_forced_break,
        is_last_before_forced_line_break: forward.before_forced_break,
        is_last_in_block: forward.in_block,
        prev: backward.neighbor,
        next: forward.neighbor,
    }
}

struct BackwardScan<N> {
    after_break: bool,
    in_block: bool,
    after_forced_break: bool,
    neighbor: Option<N>,
}

struct ForwardScan<N> {
    before_forced_break: bool,
    in_block: bool,
    neighbor: Option<N>,
}

fn scan_backward<T: InlineTree>(
    tree: &T,
    entry: BlockEntry,
    checkpoints: &[Fragment<T::Node>],
    index: usize,
) -> BackwardScan<T::Node> {
    let at_start = index == 0;
    let mut scan = BackwardScan {
        after_break: at_start,
        in_block: at_start && entry.is_first_fragment,
        after_forced_break: at_start && entry.is_after_forced_line_break,
        neighbor: None,
    };
    for (ix, prev) in checkpoints[..index].iter().enumerate().rev() {
        if ends_forced_line_break(tree, prev) {
            scan.after_forced_break = true;
            break;
        }
        if prev.display.is_none() {
            if let Some(node) = prev.view_node.filter(|&n| has_text(tree, n)) {
                scan.neighbor = Some(node);
                break;
            }
        }
        if is_scan_boundary(tree, prev) {
            break;
        }
        if ix == 0 {
            scan.after_break = true;
            if entry.is_first_fragment {
                scan.in_block = true;
                scan.after_forced_break = true;
            }
        }
    }
    scan
}

fn scan_forward<T: InlineTree>(
    tree: &T,
    config: &Config,
    checkpoints: &[Fragment<T::Node>],
    index: usize,
) -> ForwardScan<T::Node> {
    let mut scan = ForwardScan {
        before_forced_break: false,
        in_block: false,
        neighbor: None,
    };
    let this = checkpoints[index].view_node;
    let last = checkpoints.len() - 1;
    for (ix, next) in checkpoints.iter().enumerate().skip(index + 1) {
        if starts_forced_line_break(tree, next) {
            scan.before_forced_break = true;
            break;
        }
        if next.view_node != this && next.display.is_none() {
            if let Some(node) = next.view_node.filter(|&n| has_text(tree, n)) {
                scan.neighbor = Some(node);
                break;
            }
        }
        if is_scan_boundary(tree, next) {
            if ix == last {
                scan.in_block = next
                    .view_node
                    .is_some_and(|n| is_out_of_line(tree, config, n));
            }
            break;
        }
        if ix == last {
            scan.before_forced_break = true;
            scan.in_block = true;
            let mut sibling = next.view_node.and_then(|n| tree.next_sibling(n));
            while let Some(s) = sibling {
                if !is_out_of_line(tree, config, s) {
                    scan.in_block = false;
                    break;
                }
                sibling = tree.next_sibling(s);
            }
        }
    }
    scan
}

fn has_text<T: InlineTree>(tree: &T, node: T::Node) -> bool {
    tree.text(node).is_some_and(|text| !text.is_empty())
}

fn is_break<T: InlineTree>(tree: &T, node: T::Node) -> bool {
    tree.kind(node) == NodeKind::Element && tree.is_element_named(node, "br")
}

fn is_scan_boundary<T: InlineTree>(tree: &T, fragment: &Fragment<T::Node>) -> bool {
    if fragment.is_block_level() {
        return true;
    }
    fragment.view_node.is_some_and(|node| {
        tree.kind(node) == NodeKind::Element
            && tree
                .local_name(node)
                .is_some_and(|name| name == "br" || EMBEDDED_CONTENT.contains(&name))
    })
}

/// Whether a fragment preceding a run ends with a forced line break.
fn ends_forced_line_break<T: InlineTree>(tree: &T, fragment: &Fragment<T::Node>) -> bool {
    let Some(node) = fragment.view_node else {
        return false;
    };
    match tree.kind(node) {
        NodeKind::Element => is_break(tree, node),
        NodeKind::Text => {
            let text = tree.text(node).unwrap_or_default();
            fragment.whitespace.ends_with_forced_break(text)
                || (tree
                    .previous_element_sibling(node)
                    .is_some_and(|s| is_break(tree, s))
                    && fragment.whitespace.can_ignore(text))
        }
        NodeKind::Other => false,
    }
}

/// Whether a fragment following a run starts with a forced line break.
fn starts_forced_line_break<T: InlineTree>(tree: &T, fragment: &Fragment<T::Node>) -> bool {
    let Some(node) = fragment.view_node else {
        return false;
    };
    match tree.kind(node) {
        NodeKind::Element => is_break(tree, node),
        NodeKind::Text => {
            let text = tree.text(node).unwrap_or_default();
            fragment.whitespace.starts_with_forced_break(text)
                || (tree
                    .next_element_sibling(node)
                    .is_some_and(|s| is_break(tree, s))
                    && fragment.whitespace.can_ignore(text))
        }
        NodeKind::Other => false,
    }
}

/// Whether the first checkpoint opens its block: its nearest block-level context is a first
/// fragment and every earlier sibling of its node is out of line.
fn is_first_in_block<T: InlineTree>(
    tree: &T,
    config: &Config,
    checkpoints: &[Fragment<T::Node>],
) -> bool {
    let Some(first) = checkpoints.first() else {
        return false;
    };
    let mut context = Some(first);
    while let Some(fragment) = context.filter(|f| f.inline) {
        context = fragment.parent();
    }
    if context.map(|f| f.fragment_index) != Some(1) {
        return false;
    }
    let mut sibling = first.view_node.and_then(|n| tree.previous_sibling(n));
    while let Some(s) = sibling {
        if !is_out_of_line(tree, config, s) {
            return false;
        }
        sibling = tree.previous_sibling(s);
    }
    true
}

/// Whether the source content before the first checkpoint ends with a forced line break.
fn follows_forced_line_break<T: InlineTree>(tree: &T, checkpoints: &[Fragment<T::Node>]) -> bool {
    let mut context = checkpoints.first();
    let mut found = None;
    while let Some(fragment) = context.filter(|f| f.inline) {
        let mut prev = fragment.source_node.and_then(|n| tree.previous_sibling(n));
        if let Some(node) = prev {
            let collapsible = fragment.whitespace != Whitespace::Preserve
                && tree
                    .text(node)
                    .is_some_and(|text| Whitespace::Collapse.can_ignore(text));
            if collapsible {
                prev = tree.previous_sibling(node);
            }
            if let Some(node) = prev {
                found = Some((node, fragment.whitespace));
                break;
            }
        }
        context = fragment.parent();
    }
    let Some((mut node, whitespace)) = found else {
        return false;
    };
    loop {
        match tree.kind(node) {
            NodeKind::Element if is_break(tree, node) => return true,
            NodeKind::Text => {
                if tree
                    .text(node)
                    .is_some_and(|text| whitespace.ends_with_forced_break(text))
                {
                    return true;
                }
            }
            _ => {}
        }
        match tree.last_child(node) {
            Some(child) => node = child,
            None => return false,
        }
    }
}
