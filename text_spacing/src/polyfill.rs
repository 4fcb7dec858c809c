// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use smallvec::SmallVec;

use crate::decide::{self, RunContext, RunOutcome};
use crate::edges::{self, BlockEntry, EdgeInfo};
use crate::{
    segment, Config, Fragment, Geometry, HangingPunctuation, InlineTree, Lang, MarkerKind,
    PropertyValue, TextSpacing,
};

/// The inherited properties the engine reads, which the host style system must propagate.
const POLYFILLED_INHERITED_PROPS: &[&str] = &["hanging-punctuation", "text-spacing"];

/// Counts of the mutations made by one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Punctuation runs wrapped.
    pub wrapped: usize,
    /// Thin-space markers inserted.
    pub thin_spaces: usize,
    /// Punctuation runs left alone because an earlier pass had wrapped them.
    pub skipped_already_wrapped: usize,
}

impl PassSummary {
    /// Total number of elements inserted.
    pub fn mutations(&self) -> usize {
        self.wrapped + self.thin_spaces
    }

    fn record(&mut self, outcome: RunOutcome) {
        if outcome.punctuation.kind != MarkerKind::None {
            self.wrapped += 1;
        }
        self.thin_spaces += outcome.thin_spaces();
        if outcome.already_wrapped {
            self.skipped_already_wrapped += 1;
        }
    }
}

/// The entry points a layout controller calls.
///
/// The controller segments each document once before layout, then hands over every laid-out
/// block with [`post_layout_block`](Self::post_layout_block). Generated content that has no
/// fragments of its own goes through
/// [`process_generated_content`](Self::process_generated_content).
#[derive(Clone, Debug, Default)]
pub struct TextSpacingPolyfill {
    config: Config,
}

impl TextSpacingPolyfill {
    /// Creates an engine with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The names of the inherited properties this engine implements.
    pub fn polyfilled_inherited_props(&self) -> &'static [&'static str] {
        POLYFILLED_INHERITED_PROPS
    }

    /// Segments the text of a document body. Does nothing without a body.
    pub fn preprocess_document<T: InlineTree>(
        &self,
        tree: &mut T,
        body: Option<T::Node>,
    ) -> usize {
        body.map_or(0, |body| self.preprocess_subtree(tree, body))
    }

    /// Splits every text node under `root` into its [`segment()`] runs, one text node per run.
    ///
    /// Text whose parent is outside the content namespace or marked as typeset math is skipped.
    /// Returns the number of text nodes created.
    pub fn preprocess_subtree<T: InlineTree>(&self, tree: &mut T, root: T::Node) -> usize {
        let mut created = 0;
        for node in tree.text_descendants(root) {
            if !self.is_segmentable(tree, node) {
                continue;
            }
            let lengths: SmallVec<[usize; 8]> = match tree.text(node) {
                Some(text) => segment(text).map(str::len).collect(),
                None => continue,
            };
            let Some((_, leading)) = lengths.split_last() else {
                continue;
            };
            for &len in leading {
                tree.split_text_before(node, len);
            }
            created += leading.len();
        }
        created
    }

    fn is_segmentable<T: InlineTree>(&self, tree: &T, node: T::Node) -> bool {
        let Some(parent) = tree.parent(node) else {
            return false;
        };
        tree.namespace(parent) == Some(self.config.content_namespace)
            && tree.attribute(parent, self.config.math_typeset_attribute) != Some("true")
    }

    /// Processes generated content, such as the content of a pseudo-element, that has no
    /// fragments of its own.
    ///
    /// The text nodes of `element` are treated as one block: the first has no preceding
    /// neighbor, the last none following, and a preserved newline at the edge of a neighbor
    /// counts as a forced line break.
    pub fn process_generated_content<T: Geometry>(
        &self,
        tree: &mut T,
        element: T::Node,
        text_spacing: Option<&PropertyValue>,
        hanging_punctuation: Option<&PropertyValue>,
        lang: Option<&str>,
        vertical: bool,
    ) -> PassSummary {
        let mut summary = PassSummary::default();
        let lang = lang.and_then(Lang::normalize);
        let spacing = TextSpacing::parse(text_spacing);
        let hanging = HangingPunctuation::parse(hanging_punctuation);
        if spacing.is_none() && hanging.is_none() {
            log::debug!("skipping generated content {element:?}: nothing to adjust");
            return summary;
        }

        self.preprocess_subtree(tree, element);

        let saved_white_space = tree.white_space_override(element).map(String::from);
        let zero_extent = tree.offset_rect(element).inline_size(vertical) == 0.0;
        if zero_extent {
            // Keep the layout engine from wrapping the content at every opportunity.
            tree.set_white_space_override(element, Some("pre"));
        }

        let cx = RunContext {
            config: &self.config,
            spacing,
            hanging,
            lang: lang.as_ref(),
            vertical,
        };
        let texts = tree.text_descendants(element);
        for (ix, &node) in texts.iter().enumerate() {
            let prev = ix.checked_sub(1).map(|prev| texts[prev]);
            let next = texts.get(ix + 1).copied();
            let view: &T = tree;
            let is_first_after_forced_line_break =
                prev.is_none_or(|p| view.text(p).is_some_and(|t| t.ends_with('\n')));
            let is_last_before_forced_line_break =
                next.is_none_or(|n| view.text(n).is_some_and(|t| t.starts_with('\n')));
            let edges = EdgeInfo {
                is_first_after_break: prev.is_none() || is_first_after_forced_line_break,
                is_first_in_block: prev.is_none(),
                is_first_after_forced_line_break,
                is_last_before_forced_line_break,
                is_last_in_block: next.is_none(),
                prev,
                next,
            };
            summary.record(decide::process_run(tree, &cx, node, &edges));
        }

        if zero_extent {
            tree.set_white_space_override(element, saved_white_space.as_deref());
        }
        summary
    }

    /// Processes one laid-out block.
    ///
    /// `block` is the block's own fragment, if the controller has one, and `checkpoints` its
    /// inline fragments in document order.
    pub fn post_layout_block<T: Geometry>(
        &self,
        tree: &mut T,
        block: Option<&Fragment<T::Node>>,
        checkpoints: &[Fragment<T::Node>],
    ) -> PassSummary {
        let mut summary = PassSummary::default();
        let entry = BlockEntry::compute(tree, &self.config, block, checkpoints);
        for (ix, fragment) in checkpoints.iter().enumerate() {
            if !edges::is_text_participant(tree, fragment) {
                continue;
            }
            let (Some(node), Some(parent)) = (fragment.view_node, fragment.parent()) else {
                continue;
            };
            let spacing = TextSpacing::parse(fragment.text_spacing.as_ref());
            let hanging = HangingPunctuation::parse(fragment.hanging_punctuation.as_ref());
            if spacing.is_none() && hanging.is_none() {
                continue;
            }
            if parent.display().is_some_and(|d| d.is_flex_or_grid()) {
                log::debug!("skipping {node:?}: flex and grid containers are not supported");
                continue;
            }
            let lang = resolve_lang(fragment, block);
            let cx = RunContext {
                config: &self.config,
                spacing,
                hanging,
                lang: lang.as_ref(),
                vertical: fragment.vertical,
            };
            let edges = edges::classify_edges(tree, &self.config, entry, checkpoints, ix);
            summary.record(decide::process_run(tree, &cx, node, &edges));
        }
        summary
    }
}

/// The language of a fragment: its own, its parent context's, the block's or the block's
/// parent's, whichever is specified first.
fn resolve_lang<N>(fragment: &Fragment<N>, block: Option<&Fragment<N>>) -> Option<Lang> {
    fragment
        .lang
        .as_deref()
        .or_else(|| fragment.parent().and_then(|p| p.lang.as_deref()))
        .or_else(|| block.and_then(|b| b.lang.as_deref()))
        .or_else(|| block.and_then(Fragment::parent).and_then(|p| p.lang.as_deref()))
        .and_then(Lang::normalize)
}
