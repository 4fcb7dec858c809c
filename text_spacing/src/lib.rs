// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS `text-spacing` and `hanging-punctuation` as a post-layout correction pass.
//!
//! Layout engines rarely implement fine-grained trimming of full-width CJK punctuation or
//! hanging punctuation at line edges. This crate runs after an external engine has laid out a
//! block, decides where those rules apply, and injects wrapper elements and markers that a
//! styling layer turns into visible spacing adjustments.
//!
//! The pieces, leaves first:
//!
//! - [`flags`]: [`TextSpacing`] and [`HangingPunctuation`] flag records parsed from property
//!   values.
//! - [`classify`]: Unicode character-class predicates (punctuation classes, ideographs,
//!   alphanumerics, combining marks).
//! - [`segment`](mod@segment): lossless splitting of text at punctuation and ideograph/alphanumeric
//!   boundaries.
//! - [`edges`]: first/last and forced-break classification of the text fragments of a block.
//! - [`decide`]: the per-run decision engine, including the geometry feedback checks.
//! - [`apply`]: the marker taxonomy and the mutations that realize a decision.
//! - [`TextSpacingPolyfill`]: the entry points a layout controller calls.
//!
//! The rendered tree and its geometry are supplied by the host through the [`InlineTree`] and
//! [`Geometry`] traits.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_spacing::{HangingPunctuation, PropertyValue, TextSpacing};
//!
//! let spacing = TextSpacing::parse(Some(&PropertyValue::from("trim-start allow-end")));
//! assert!(spacing.trim_start && !spacing.space_first);
//! assert!(spacing.trim_end && spacing.allow_end);
//!
//! let hanging = HangingPunctuation::parse(Some(&PropertyValue::from("first allow-end")));
//! assert!(hanging.first && hanging.end && hanging.allow_end);
//!
//! let pieces: Vec<_> = text_spacing::segment("「日本語ABC」").collect();
//! assert_eq!(pieces, ["「", "日本語", "ABC", "」"]);
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

pub mod apply;
pub mod classify;
pub mod decide;
pub mod edges;
pub mod flags;
pub mod segment;

mod config;
mod fragment;
mod lang;
mod polyfill;
mod tree;
mod util;

#[cfg(test)]
mod tests;

pub use apply::{MarkerKind, MarkerOutput, VisualClass, WrapperKind};
pub use config::Config;
pub use flags::{
    HangingPunctuation, HangingPunctuationKeyword, ParseKeywordError, PropertyValue, TextSpacing,
    TextSpacingKeyword,
};
pub use fragment::{DisplayValue, Fragment, Whitespace};
pub use lang::Lang;
pub use polyfill::{PassSummary, TextSpacingPolyfill};
pub use segment::{segment, Segments};
pub use tree::{
    ComputedStyle, Geometry, InlineTree, NodeKind, Placement, Positioning, Rect, Side,
    TextCombineUpright, TextOrientation,
};
