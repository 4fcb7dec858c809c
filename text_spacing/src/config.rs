// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Engine configuration.
///
/// The defaults match the conventions of an XHTML document rendered by a paginating layout
/// controller; hosts with different attribute conventions can override them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Fraction of the font size above which a wrapped punctuation glyph is full-width.
    pub full_width_ratio: f32,
    /// Only text whose parent element is in this namespace is segmented.
    pub content_namespace: &'static str,
    /// Text whose parent has this attribute set to `true` is already typeset (e.g. math) and is
    /// left alone by the segmenter.
    pub math_typeset_attribute: &'static str,
    /// Elements carrying this attribute are layout-generated and count as out-of-flow.
    pub special_attribute: &'static str,
}

impl Config {
    /// The XHTML namespace.
    pub const XHTML_NAMESPACE: &'static str = "http://www.w3.org/1999/xhtml";

    /// The full-width threshold, in the same unit as `font_size`.
    pub fn full_width_threshold(&self, font_size: f32) -> f32 {
        font_size * self.full_width_ratio
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            full_width_ratio: 0.7,
            content_namespace: Self::XHTML_NAMESPACE,
            math_typeset_attribute: "data-math-typeset",
            special_attribute: "data-adapt-spec",
        }
    }
}
