// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-run decision engine.
//!
//! A run that is a single punctuation cluster is matched against the marker rules in priority
//! order: hanging first, hanging last, hanging end, opening trim, closing trim. A matched run is
//! wrapped first and classified afterwards, because the class depends on how the wrapped glyph
//! renders: its measured width tells full-width from half-width glyphs, and several branches
//! assign a class tentatively and read the geometry back to see whether the assignment moved
//! the run. Those two-read checks are part of the decision table and must stay in this order.
//!
//! Independently, a thin-space marker is inserted between an ideograph run and an adjacent
//! letter or digit run.

use crate::apply::{self, Wrapped};
use crate::classify::{
    ends_with_cluster, is_adjacent_after_close, is_adjacent_before_open, is_alphabetic,
    is_closing_punctuation, is_fullwidth_close, is_fullwidth_open, is_hanging_end,
    is_hanging_first, is_hanging_last, is_ideograph_text, is_numeric, is_trimmable_stop,
    sole_cluster, starts_with,
};
use crate::edges::EdgeInfo;
use crate::{
    Config, Geometry, HangingPunctuation, Lang, MarkerKind, MarkerOutput, NodeKind, Rect, Side,
    TextSpacing, VisualClass, WrapperKind,
};

/// The style inputs of a run.
#[derive(Clone, Copy, Debug)]
pub struct RunContext<'a> {
    /// Engine configuration.
    pub config: &'a Config,
    /// Resolved `text-spacing`.
    pub spacing: TextSpacing,
    /// Resolved `hanging-punctuation`.
    pub hanging: HangingPunctuation,
    /// Normalized content language.
    pub lang: Option<&'a Lang>,
    /// Vertical writing mode.
    pub vertical: bool,
}

/// The marker rule a punctuation run matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PunctuationMarker {
    /// Opening punctuation hanging at the start of the block.
    HangFirst,
    /// Closing punctuation hanging at the end of the block.
    HangLast,
    /// A stop or comma that may hang at line end.
    HangEnd,
    /// Full-width opening punctuation.
    Open,
    /// Full-width closing punctuation, or a language-dependent stop.
    Close,
}

impl PunctuationMarker {
    /// Matches a run against the marker rules, first match wins.
    ///
    /// Only runs made of a single character and its combining marks can match.
    pub fn select<N>(text: &str, edges: &EdgeInfo<N>, cx: &RunContext<'_>) -> Option<Self> {
        let c = sole_cluster(text)?;
        let spacing = &cx.spacing;
        let hanging = &cx.hanging;
        if edges.is_first_in_block && hanging.first && is_hanging_first(c) {
            Some(Self::HangFirst)
        } else if edges.is_last_in_block && hanging.last && is_hanging_last(c) {
            Some(Self::HangLast)
        } else if hanging.end && is_hanging_end(c) {
            Some(Self::HangEnd)
        } else if (spacing.trim_start || spacing.trim_adjacent) && is_fullwidth_open(c) {
            Some(Self::Open)
        } else if (spacing.trim_end || spacing.trim_adjacent)
            && (is_fullwidth_close(c) || is_trimmable_stop(c, cx.lang))
        {
            Some(Self::Close)
        } else {
            None
        }
    }

    /// Open or close.
    pub fn kind(self) -> MarkerKind {
        match self {
            Self::HangFirst | Self::Open => MarkerKind::Open,
            Self::HangLast | Self::HangEnd | Self::Close => MarkerKind::Close,
        }
    }

    fn wrapper(self) -> WrapperKind {
        match self {
            Self::HangFirst | Self::Open => WrapperKind::Open,
            Self::HangLast | Self::HangEnd | Self::Close => WrapperKind::Close,
        }
    }
}

/// What processing one run did to the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// The punctuation marker, or [`MarkerOutput::NONE`] when the run was not wrapped.
    pub punctuation: MarkerOutput,
    /// [`MarkerOutput::THIN_SPACE`] when a marker was inserted before the run.
    pub thin_space_before: MarkerOutput,
    /// [`MarkerOutput::THIN_SPACE`] when a marker was inserted after the run.
    pub thin_space_after: MarkerOutput,
    /// The run had been wrapped by an earlier pass, so nothing was done.
    pub already_wrapped: bool,
}

impl RunOutcome {
    /// Number of thin-space markers inserted.
    pub fn thin_spaces(self) -> usize {
        [self.thin_space_before, self.thin_space_after]
            .into_iter()
            .filter(|marker| marker.kind == MarkerKind::ThinSpace)
            .count()
    }
}

/// Whether a run whose first line box is `rect` starts a new line after a neighbor whose last
/// line box is `prev`.
///
/// The tolerances are proportional to the run's own size to absorb sub-pixel jitter.
pub fn starts_line(rect: Rect, prev: Rect, vertical: bool) -> bool {
    if vertical {
        rect.top < prev.top + prev.height - rect.width
            || rect.right() < prev.left + rect.width / 10.0
            || rect.left > prev.left + prev.width - rect.width / 10.0
    } else {
        rect.left < prev.left + prev.width - rect.height
            || rect.top > prev.top + prev.height - rect.height / 10.0
            || rect.bottom() < prev.top + rect.height / 10.0
    }
}

/// Whether a run whose first line box is `rect` ends its line before a neighbor whose first
/// line box is `next`.
pub fn ends_line(rect: Rect, next: Rect, vertical: bool) -> bool {
    if vertical {
        rect.bottom() > next.top + rect.width
            || rect.left > next.left + next.width - rect.width / 10.0
            || rect.right() < next.left + rect.width / 10.0
    } else {
        rect.right() > next.left + rect.height
            || rect.bottom() < next.top + rect.height / 10.0
            || rect.top > next.top + next.height - rect.height / 10.0
    }
}

/// Decides and applies the markers of one run.
///
/// `node` is the run's text node. Runs already wrapped by an earlier pass are left alone.
pub fn process_run<T: Geometry>(
    tree: &mut T,
    cx: &RunContext<'_>,
    node: T::Node,
    edges: &EdgeInfo<T::Node>,
) -> RunOutcome {
    let mut outcome = RunOutcome::default();
    let Some(text) = tree.text(node) else {
        return outcome;
    };
    let marker = PunctuationMarker::select(text, edges, cx);
    let starts_ideograph = starts_with(text, is_ideograph_text);
    let ends_ideograph = ends_with_cluster(text, is_ideograph_text);

    if let Some(marker) = marker {
        let Some(wrapped) = apply::wrap_run(tree, node, marker.wrapper()) else {
            log::debug!("skipping already wrapped run {node:?}");
            outcome.already_wrapped = true;
            return outcome;
        };
        let mut resolver = ClassResolver::new(tree, cx, node, edges, wrapped);
        resolver.resolve(marker);
        outcome.punctuation = MarkerOutput {
            kind: marker.kind(),
            class: resolver.class,
        };
        log::trace!(
            "run {node:?}: {marker:?} wrapped with class {:?}",
            resolver.class.as_str()
        );
    }

    if cx.spacing.spaces_ideographs() {
        let view: &T = tree;
        let space_before = starts_ideograph
            && edges.prev.is_some_and(|prev| {
                view.text(prev)
                    .is_some_and(|t| ends_alphanumeric(t, cx.spacing))
                    && !(cx.vertical && has_upright_parent(view, prev))
                    && !has_inline_spacing_between(view, prev, node)
            });
        let space_after = ends_ideograph
            && edges.next.is_some_and(|next| {
                view.text(next)
                    .is_some_and(|t| starts_alphanumeric(t, cx.spacing))
                    && !(cx.vertical && has_upright_parent(view, next))
                    && !has_inline_spacing_between(view, node, next)
            });
        if space_before && apply::insert_thin_space(tree, node, Side::Before) {
            outcome.thin_space_before = MarkerOutput::THIN_SPACE;
        }
        if space_after && apply::insert_thin_space(tree, node, Side::After) {
            outcome.thin_space_after = MarkerOutput::THIN_SPACE;
        }
        if outcome.thin_spaces() > 0 {
            log::trace!("run {node:?}: {} thin space(s)", outcome.thin_spaces());
        }
    }
    outcome
}

fn ends_alphanumeric(text: &str, spacing: TextSpacing) -> bool {
    (spacing.ideograph_alpha && ends_with_cluster(text, is_alphabetic))
        || (spacing.ideograph_numeric && ends_with_cluster(text, is_numeric))
}

fn starts_alphanumeric(text: &str, spacing: TextSpacing) -> bool {
    (spacing.ideograph_alpha && starts_with(text, is_alphabetic))
        || (spacing.ideograph_numeric && starts_with(text, is_numeric))
}

fn has_upright_parent<T: Geometry>(tree: &T, node: T::Node) -> bool {
    tree.parent(node)
        .is_some_and(|parent| tree.computed_style(parent).is_upright())
}

/// Whether margin, border or padding separates `first` from the following `second` along the
/// inline axis, on any ancestor up to their common container.
fn has_inline_spacing_between<T: Geometry>(tree: &T, first: T::Node, second: T::Node) -> bool {
    if tree.kind(first) == NodeKind::Element
        && tree.computed_style(first).has_inline_end_spacing()
    {
        return true;
    }
    if let Some(parent) = tree.parent(first) {
        if !tree.contains(parent, second) {
            return has_inline_spacing_between(tree, parent, second);
        }
    }
    if tree.kind(second) == NodeKind::Element
        && tree.computed_style(second).has_inline_start_spacing()
    {
        return true;
    }
    if let Some(parent) = tree.parent(second) {
        if !tree.contains(parent, first) {
            return has_inline_spacing_between(tree, first, parent);
        }
    }
    false
}

/// Classifies a freshly wrapped punctuation run, reading geometry back as it goes.
struct ClassResolver<'t, 'a, T: Geometry> {
    tree: &'t mut T,
    cx: &'a RunContext<'a>,
    node: T::Node,
    edges: &'a EdgeInfo<T::Node>,
    wrapped: Wrapped<T::Node>,
    threshold: f32,
    full_width: bool,
    class: VisualClass,
}

impl<'t, 'a, T: Geometry> ClassResolver<'t, 'a, T> {
    fn new(
        tree: &'t mut T,
        cx: &'a RunContext<'a>,
        node: T::Node,
        edges: &'a EdgeInfo<T::Node>,
        wrapped: Wrapped<T::Node>,
    ) -> Self {
        let font_size = tree.computed_style(wrapped.outer).font_size;
        let threshold = cx.config.full_width_threshold(font_size);
        let full_width = tree.offset_rect(wrapped.inner).inline_size(cx.vertical) > threshold;
        Self {
            tree,
            cx,
            node,
            edges,
            wrapped,
            threshold,
            full_width,
            class: VisualClass::None,
        }
    }

    fn set(&mut self, class: VisualClass) {
        self.class = class;
        apply::set_visual_class(self.tree, self.wrapped.outer, class);
    }

    fn line_position(&self) -> f32 {
        self.tree
            .offset_rect(self.wrapped.outer)
            .line_position(self.cx.vertical)
    }

    fn first_rect(&self, node: T::Node) -> Option<Rect> {
        self.tree.client_rects(node).first().copied()
    }

    fn at_start_of_line(&self) -> bool {
        if self.edges.is_first_after_break {
            return true;
        }
        let Some(prev) = self.edges.prev else {
            return false;
        };
        let Some(rect) = self.first_rect(self.node) else {
            return false;
        };
        let Some(prev_rect) = self.tree.client_rects(prev).last().copied() else {
            return false;
        };
        starts_line(rect, prev_rect, self.cx.vertical)
    }

    fn at_end_of_line(&self) -> bool {
        let Some(next) = self.edges.next else {
            return false;
        };
        let (Some(rect), Some(next_rect)) = (self.first_rect(self.node), self.first_rect(next))
        else {
            return false;
        };
        ends_line(rect, next_rect, self.cx.vertical)
    }

    fn resolve(&mut self, marker: PunctuationMarker) {
        let hanging = matches!(
            marker,
            PunctuationMarker::HangFirst | PunctuationMarker::HangLast | PunctuationMarker::HangEnd
        );
        if !self.full_width && !hanging {
            return;
        }
        match marker.kind() {
            MarkerKind::Open => self.resolve_open(marker),
            _ => self.resolve_close(marker),
        }
    }

    fn resolve_open(&mut self, marker: PunctuationMarker) {
        let spacing = self.cx.spacing;
        if marker == PunctuationMarker::HangFirst {
            self.set(VisualClass::HangFirst);
        } else if self.edges.is_first_in_block || self.edges.is_first_after_forced_line_break {
            if spacing.trim_start && !spacing.space_first {
                self.set(VisualClass::Trim);
            } else {
                self.set(VisualClass::Space);
            }
        } else if !spacing.trim_start && self.at_start_of_line() {
            self.set(VisualClass::Space);
        } else if spacing.trim_adjacent && self.follows_adjacent_punctuation() {
            self.set(VisualClass::Trim);
        } else if spacing.trim_start && self.at_start_of_line() {
            let before = self.line_position();
            self.set(VisualClass::Auto);
            if before == self.line_position() && !self.at_start_of_line() {
                self.set(VisualClass::Trim);
            }
        }
    }

    /// Whether the previous run ends with punctuation that lets this opening punctuation be
    /// trimmed. A closing mark only counts when it was itself wrapped and measured full-width.
    fn follows_adjacent_punctuation(&self) -> bool {
        let Some(prev) = self.edges.prev else {
            return false;
        };
        let Some(text) = self.tree.text(prev) else {
            return false;
        };
        if !ends_with_cluster(text, is_adjacent_before_open) {
            return false;
        }
        !ends_with_cluster(text, is_closing_punctuation)
            || self.tree.parent(prev).is_some_and(|parent| {
                apply::is_marker(&*self.tree, parent, WrapperKind::Inner)
                    && self.tree.offset_rect(parent).inline_size(self.cx.vertical)
                        > self.threshold
            })
    }

    fn resolve_close(&mut self, marker: PunctuationMarker) {
        let spacing = self.cx.spacing;
        let hanging = self.cx.hanging;
        let half_width = !self.full_width;
        let hang_end = marker == PunctuationMarker::HangEnd;
        if marker == PunctuationMarker::HangLast {
            self.set(VisualClass::HangLast { half_width });
        } else if self.edges.is_last_in_block || self.edges.is_last_before_forced_line_break {
            if hang_end {
                let before = self.tree.offset_rect(self.wrapped.outer);
                self.set(VisualClass::HangEnd { half_width });
                let after = self.tree.offset_rect(self.wrapped.outer);
                if after.left == before.left && after.top == before.top {
                    self.set(VisualClass::None);
                }
            } else if spacing.trim_end {
                self.set(VisualClass::Trim);
            } else {
                self.set(VisualClass::Space);
            }
        } else if self.precedes_adjacent_punctuation() {
            if self.full_width && spacing.trim_adjacent {
                self.set(VisualClass::Trim);
            }
        } else if hang_end {
            let at_end = self.at_end_of_line();
            let fits_without_hanging = at_end && hanging.allow_end;
            if !fits_without_hanging {
                self.set(VisualClass::HangEnd { half_width });
            }
            if !self.full_width {
                if !at_end && !self.at_end_of_line() {
                    self.set(VisualClass::None);
                }
            } else if fits_without_hanging && spacing.trim_end && !spacing.allow_end {
                self.set(VisualClass::Auto);
            } else if !fits_without_hanging && !self.at_end_of_line() {
                self.set(VisualClass::None);
            } else if !at_end && hanging.allow_end {
                let hang = VisualClass::HangEnd { half_width: false };
                if !spacing.trim_end || spacing.allow_end {
                    self.set(VisualClass::Space);
                    if !self.at_end_of_line() {
                        if spacing.trim_end {
                            self.set(VisualClass::Auto);
                            if !self.at_end_of_line() {
                                self.set(hang);
                            }
                        } else {
                            self.set(hang);
                        }
                    }
                } else {
                    self.set(VisualClass::Auto);
                    if !self.at_end_of_line() {
                        self.set(hang);
                    }
                }
            }
        } else if spacing.trim_end {
            if self.at_end_of_line() {
                if spacing.allow_end {
                    self.set(VisualClass::Space);
                } else {
                    self.set(VisualClass::Auto);
                }
            } else {
                let before = self.line_position();
                self.set(VisualClass::Auto);
                if before == self.line_position() {
                    self.set(VisualClass::None);
                }
            }
        }
    }

    /// Whether the next run starts with punctuation adjacent to this closing punctuation.
    fn precedes_adjacent_punctuation(&self) -> bool {
        self.edges
            .next
            .and_then(|next| self.tree.text(next))
            .is_some_and(|text| starts_with(text, is_adjacent_after_close))
    }
}
