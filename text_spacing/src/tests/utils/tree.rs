// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

use crate::{
    ComputedStyle, Config, Geometry, InlineTree, NodeKind, Placement, Rect, Side, WrapperKind,
};

const DEFAULT_FONT_SIZE: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    kind: Option<NodeKind>,
    name: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    class: String,
    placement: Placement,
    white_space: Option<String>,
    style: Option<ComputedStyle>,
    rect: Option<Rect>,
    /// Rects used instead of `rect` while the nearest classed ancestor has the given class.
    shifted: Vec<(&'static str, Rect)>,
}

/// An in-memory rendered tree with scripted geometry.
///
/// Text nodes carry one line box each. Elements without an explicit rect measure as the union
/// of their text. A text node can be given a different rect for when its nearest classed
/// ancestor has a certain class, which models a class assignment moving the run.
#[derive(Debug)]
pub(crate) struct MockTree {
    nodes: Vec<Node>,
    /// Every `white-space` override set, in order.
    pub(crate) white_space_log: Vec<Option<String>>,
}

impl MockTree {
    /// A tree with a `body` root.
    pub(crate) fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            white_space_log: Vec::new(),
        };
        tree.push(Node {
            kind: Some(NodeKind::Element),
            name: "body".into(),
            namespace: Some(Config::XHTML_NAMESPACE.into()),
            ..Node::default()
        });
        tree
    }

    pub(crate) fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn new_element(&mut self, name: &str) -> NodeId {
        self.push(Node {
            kind: Some(NodeKind::Element),
            name: name.into(),
            namespace: Some(Config::XHTML_NAMESPACE.into()),
            ..Node::default()
        })
    }

    fn new_text(&mut self, text: &str) -> NodeId {
        self.push(Node {
            kind: Some(NodeKind::Text),
            text: text.into(),
            ..Node::default()
        })
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn index_in_parent(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.node(node).parent?;
        let ix = self.node(parent).children.iter().position(|&c| c == node)?;
        Some((parent, ix))
    }

    fn insert_at(&mut self, parent: NodeId, ix: usize, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.insert(ix, child);
    }

    /// Appends an XHTML element.
    pub(crate) fn add_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.new_element(name);
        self.append(parent, id);
        id
    }

    /// Appends a text node.
    pub(crate) fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.new_text(text);
        self.append(parent, id);
        id
    }

    pub(crate) fn set_namespace(&mut self, node: NodeId, namespace: &str) {
        self.node_mut(node).namespace = Some(namespace.into());
    }

    pub(crate) fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.node_mut(node)
            .attributes
            .push((name.into(), value.into()));
    }

    pub(crate) fn set_placement(&mut self, node: NodeId, placement: Placement) {
        self.node_mut(node).placement = placement;
    }

    pub(crate) fn set_style(&mut self, node: NodeId, style: ComputedStyle) {
        self.node_mut(node).style = Some(style);
    }

    pub(crate) fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.node_mut(node).rect = Some(rect);
    }

    /// Gives `node` the rect `rect` while its nearest classed ancestor has class `class`.
    pub(crate) fn shift_when(&mut self, node: NodeId, class: &'static str, rect: Rect) {
        self.node_mut(node).shifted.push((class, rect));
    }

    pub(crate) fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).children.clone()
    }

    pub(crate) fn class_of(&self, node: NodeId) -> &str {
        &self.node(node).class
    }

    /// The first text node under `root` whose content is `text`.
    pub(crate) fn find_text(&self, root: NodeId, text: &str) -> Option<NodeId> {
        self.text_descendants(root)
            .into_iter()
            .find(|&n| self.node(n).text == text)
    }

    /// The content of every text node under `root`, in document order.
    pub(crate) fn texts(&self, root: NodeId) -> Vec<String> {
        self.text_descendants(root)
            .into_iter()
            .map(|n| self.node(n).text.clone())
            .collect()
    }

    /// Serializes the content of `node`, with elements as tags and their class if any.
    pub(crate) fn markup(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in &self.node(node).children {
            self.write_markup(child, &mut out);
        }
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match node.kind {
            Some(NodeKind::Text) => out.push_str(&node.text),
            Some(NodeKind::Element) => {
                out.push('<');
                out.push_str(&node.name);
                if !node.class.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&node.class);
                    out.push('"');
                }
                out.push('>');
                for &child in &node.children {
                    self.write_markup(child, out);
                }
                out.push_str("</");
                out.push_str(&node.name);
                out.push('>');
            }
            _ => {}
        }
    }

    /// Lays the text under `root` out on one horizontal line, `advance` units per character.
    pub(crate) fn lay_out_line(&mut self, root: NodeId, top: f32, advance: f32) {
        let mut left = 0.0;
        for node in self.text_descendants(root) {
            let width = self.node(node).text.chars().count() as f32 * advance;
            self.set_rect(node, Rect::new(left, top, width, DEFAULT_FONT_SIZE));
            left += width;
        }
    }

    fn nearest_class(&self, node: NodeId) -> Option<&str> {
        let mut current = self.node(node).parent;
        while let Some(id) = current {
            let class = &self.node(id).class;
            if !class.is_empty() {
                return Some(class);
            }
            current = self.node(id).parent;
        }
        None
    }

    fn text_rect(&self, node: NodeId) -> Option<Rect> {
        let data = self.node(node);
        if let Some(class) = self.nearest_class(node) {
            if let Some((_, rect)) = data.shifted.iter().find(|(c, _)| *c == class) {
                return Some(*rect);
            }
        }
        data.rect
    }
}

fn union(a: Rect, b: Rect) -> Rect {
    let left = a.left.min(b.left);
    let top = a.top.min(b.top);
    Rect::new(
        left,
        top,
        a.right().max(b.right()) - left,
        a.bottom().max(b.bottom()) - top,
    )
}

impl InlineTree for MockTree {
    type Node = NodeId;

    fn kind(&self, node: NodeId) -> NodeKind {
        self.node(node).kind.unwrap_or(NodeKind::Other)
    }

    fn local_name(&self, node: NodeId) -> Option<&str> {
        (self.kind(node) == NodeKind::Element).then(|| self.node(node).name.as_str())
    }

    fn namespace(&self, node: NodeId) -> Option<&str> {
        self.node(node).namespace.as_deref()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        (self.kind(node) == NodeKind::Text).then(|| self.node(node).text.as_str())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).children.last().copied()
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (parent, ix) = self.index_in_parent(node)?;
        let prev = ix.checked_sub(1)?;
        Some(self.node(parent).children[prev])
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (parent, ix) = self.index_in_parent(node)?;
        self.node(parent).children.get(ix + 1).copied()
    }

    fn placement(&self, node: NodeId) -> Placement {
        self.node(node).placement
    }

    fn white_space_override(&self, node: NodeId) -> Option<&str> {
        self.node(node).white_space.as_deref()
    }

    fn set_white_space_override(&mut self, node: NodeId, value: Option<&str>) {
        self.white_space_log.push(value.map(String::from));
        self.node_mut(node).white_space = value.map(String::from);
    }

    fn split_text_before(&mut self, node: NodeId, offset: usize) -> NodeId {
        let text = std::mem::take(&mut self.node_mut(node).text);
        let (head, tail) = text.split_at(offset);
        self.node_mut(node).text = tail.into();
        let new = self.new_text(head);
        let (parent, ix) = self.index_in_parent(node).expect("text node has a parent");
        self.insert_at(parent, ix, new);
        new
    }

    fn wrap(&mut self, node: NodeId, kind: WrapperKind) -> NodeId {
        let wrapper = self.new_element(kind.tag_name());
        let (parent, ix) = self.index_in_parent(node).expect("wrapped node has a parent");
        self.node_mut(parent).children[ix] = wrapper;
        self.node_mut(wrapper).parent = Some(parent);
        self.append(wrapper, node);
        wrapper
    }

    fn insert_marker(&mut self, node: NodeId, side: Side, kind: WrapperKind) -> NodeId {
        let marker = self.new_element(kind.tag_name());
        let (parent, ix) = self.index_in_parent(node).expect("marked node has a parent");
        let ix = match side {
            Side::Before => ix,
            Side::After => ix + 1,
        };
        self.insert_at(parent, ix, marker);
        marker
    }

    fn set_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).class = class.into();
    }
}

impl Geometry for MockTree {
    fn client_rects(&self, node: NodeId) -> SmallVec<[Rect; 2]> {
        if self.kind(node) == NodeKind::Text {
            return self.text_rect(node).into_iter().collect();
        }
        self.text_descendants(node)
            .into_iter()
            .filter_map(|n| self.text_rect(n))
            .collect()
    }

    fn offset_rect(&self, node: NodeId) -> Rect {
        if let Some(rect) = self.node(node).rect {
            return rect;
        }
        self.client_rects(node)
            .into_iter()
            .reduce(union)
            .unwrap_or_default()
    }

    fn computed_style(&self, node: NodeId) -> ComputedStyle {
        if let Some(style) = self.node(node).style {
            return style;
        }
        match self.parent(node) {
            Some(parent) => {
                let inherited = self.computed_style(parent);
                ComputedStyle {
                    font_size: inherited.font_size,
                    text_orientation: inherited.text_orientation,
                    ..ComputedStyle::default()
                }
            }
            None => ComputedStyle {
                font_size: DEFAULT_FONT_SIZE,
                ..ComputedStyle::default()
            },
        }
    }
}
