// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use super::{MockTree, NodeId};
use crate::{
    Fragment, InlineTree, NodeKind, PassSummary, PropertyValue, TextSpacingPolyfill, Whitespace,
};

/// One block element in a [`MockTree`], with the style its fragments carry.
pub(crate) struct BlockFixture {
    pub(crate) tree: MockTree,
    pub(crate) block: NodeId,
    pub(crate) display: &'static str,
    pub(crate) fragment_index: usize,
    pub(crate) text_spacing: Option<&'static str>,
    pub(crate) hanging_punctuation: Option<&'static str>,
    pub(crate) lang: Option<&'static str>,
    pub(crate) vertical: bool,
    pub(crate) whitespace: Whitespace,
    pub(crate) polyfill: TextSpacingPolyfill,
}

impl BlockFixture {
    /// A `p` block under the body with default style.
    pub(crate) fn new() -> Self {
        let mut tree = MockTree::new();
        let block = tree.add_element(tree.root(), "p");
        Self {
            tree,
            block,
            display: "block",
            fragment_index: 1,
            text_spacing: None,
            hanging_punctuation: None,
            lang: None,
            vertical: false,
            whitespace: Whitespace::Collapse,
            polyfill: TextSpacingPolyfill::default(),
        }
    }

    /// A block containing `text`, segmented and laid out on one line with full-width glyphs.
    pub(crate) fn with_text(text: &str) -> Self {
        let mut fixture = Self::new();
        fixture.tree.add_text(fixture.block, text);
        fixture.segment();
        fixture.tree.lay_out_line(fixture.block, 0.0, 16.0);
        fixture
    }

    pub(crate) fn text_spacing(mut self, value: &'static str) -> Self {
        self.text_spacing = Some(value);
        self
    }

    pub(crate) fn hanging_punctuation(mut self, value: &'static str) -> Self {
        self.hanging_punctuation = Some(value);
        self
    }

    pub(crate) fn lang(mut self, value: &'static str) -> Self {
        self.lang = Some(value);
        self
    }

    pub(crate) fn display(mut self, value: &'static str) -> Self {
        self.display = value;
        self
    }

    pub(crate) fn segment(&mut self) -> usize {
        self.polyfill.preprocess_subtree(&mut self.tree, self.block)
    }

    /// The text node with content `text`.
    pub(crate) fn text_node(&self, text: &str) -> NodeId {
        self.tree
            .find_text(self.block, text)
            .unwrap_or_else(|| panic!("no text node {text:?}"))
    }

    pub(crate) fn block_fragment(&self) -> Rc<Fragment<NodeId>> {
        let mut fragment = Fragment::new(self.block);
        fragment.source_node = Some(self.block);
        fragment.inline = false;
        fragment.display = Some(self.display.into());
        fragment.lang = self.lang.map(String::from);
        fragment.fragment_index = self.fragment_index;
        fragment.vertical = self.vertical;
        Rc::new(fragment)
    }

    fn fragment(&self, node: NodeId, parent: &Rc<Fragment<NodeId>>) -> Fragment<NodeId> {
        let mut fragment = Fragment::new(node);
        fragment.source_node = Some(node);
        fragment.parent = Some(Rc::clone(parent));
        fragment.whitespace = self.whitespace;
        fragment.vertical = self.vertical;
        fragment.text_spacing = self.text_spacing.map(PropertyValue::from);
        fragment.hanging_punctuation = self.hanging_punctuation.map(PropertyValue::from);
        if self.tree.kind(node) == NodeKind::Element {
            fragment.display = Some("inline".into());
        }
        fragment
    }

    /// The checkpoints of the block: a fragment before and after every node, in document order.
    pub(crate) fn checkpoints(&self, block: &Rc<Fragment<NodeId>>) -> Vec<Fragment<NodeId>> {
        let mut out = Vec::new();
        self.collect(self.block, block, &mut out);
        out
    }

    fn collect(
        &self,
        node: NodeId,
        context: &Rc<Fragment<NodeId>>,
        out: &mut Vec<Fragment<NodeId>>,
    ) {
        for child in self.tree.children(node) {
            let before = self.fragment(child, context);
            let mut after = before.clone();
            after.after = true;
            let inner = Rc::new(before.clone());
            out.push(before);
            self.collect(child, &inner, out);
            out.push(after);
        }
    }

    /// Runs one layout pass over the block.
    pub(crate) fn run(&mut self) -> PassSummary {
        let block = self.block_fragment();
        let checkpoints = self.checkpoints(&block);
        self.polyfill
            .post_layout_block(&mut self.tree, Some(&block), &checkpoints)
    }

    pub(crate) fn markup(&self) -> String {
        self.tree.markup(self.block)
    }
}
