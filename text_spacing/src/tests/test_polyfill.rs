// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{BlockFixture, MockTree};
use crate::{Config, InlineTree, PassSummary, PropertyValue, TextSpacingPolyfill};

#[test]
fn preprocess_splits_runs() {
    let mut tree = MockTree::new();
    let body = tree.root();
    let p = tree.add_element(body, "p");
    tree.add_text(p, "「日本語ABC」");
    let em = tree.add_element(p, "em");
    tree.add_text(em, "hello");

    let polyfill = TextSpacingPolyfill::default();
    assert_eq!(polyfill.preprocess_document(&mut tree, Some(body)), 3);
    assert_eq!(tree.texts(body), ["「", "日本語", "ABC", "」", "hello"]);
    assert_eq!(polyfill.preprocess_document(&mut tree, Some(body)), 0);
    assert_eq!(polyfill.preprocess_document(&mut tree, None), 0);
}

#[test]
fn preprocess_skips_foreign_and_typeset_content() {
    let mut tree = MockTree::new();
    let body = tree.root();
    let svg = tree.add_element(body, "text");
    tree.set_namespace(svg, "http://www.w3.org/2000/svg");
    tree.add_text(svg, "「図」");
    let math = tree.add_element(body, "span");
    tree.set_attribute(math, Config::default().math_typeset_attribute, "true");
    tree.add_text(math, "「式」");
    let plain = tree.add_element(body, "span");
    tree.set_attribute(plain, Config::default().math_typeset_attribute, "false");
    tree.add_text(plain, "「文」");

    let polyfill = TextSpacingPolyfill::default();
    assert_eq!(polyfill.preprocess_subtree(&mut tree, body), 2);
    assert_eq!(tree.texts(body), ["「図」", "「式」", "「", "文", "」"]);
}

#[test]
fn generated_content() {
    let mut tree = MockTree::new();
    let p = tree.add_element(tree.root(), "p");
    let before = tree.add_element(p, "span");
    tree.add_text(before, "「引用」");

    let polyfill = TextSpacingPolyfill::default();
    let hanging = PropertyValue::from("first last");
    let summary =
        polyfill.process_generated_content(&mut tree, before, None, Some(&hanging), None, false);
    assert_eq!(
        summary,
        PassSummary {
            wrapped: 2,
            thin_spaces: 0,
            skipped_already_wrapped: 0,
        }
    );
    // Nothing is laid out, so the closing glyph measures as half-width.
    assert_eq!(
        tree.markup(before),
        "<ts-open class=\"hang-first\"><ts-inner>「</ts-inner></ts-open>引用\
         <ts-close class=\"hang-last hang-hw\"><ts-inner>」</ts-inner></ts-close>"
    );
    assert_eq!(tree.white_space_log, [Some("pre".to_owned()), None]);
}

#[test]
fn generated_content_keeps_white_space_when_sized() {
    let mut tree = MockTree::new();
    let p = tree.add_element(tree.root(), "p");
    let after = tree.add_element(p, "span");
    tree.add_text(after, "日本語ABC");
    tree.lay_out_line(after, 0.0, 16.0);

    let polyfill = TextSpacingPolyfill::default();
    let spacing = PropertyValue::from("ideograph-alpha");
    let summary =
        polyfill.process_generated_content(&mut tree, after, Some(&spacing), None, None, false);
    assert_eq!(summary.thin_spaces, 1);
    assert_eq!(tree.markup(after), "日本語<ts-thin-sp></ts-thin-sp>ABC");
    assert!(tree.white_space_log.is_empty());
}

#[test]
fn generated_content_restores_white_space() {
    let mut tree = MockTree::new();
    let p = tree.add_element(tree.root(), "p");
    let before = tree.add_element(p, "span");
    tree.add_text(before, "。");
    tree.set_white_space_override(before, Some("nowrap"));
    tree.white_space_log.clear();

    let polyfill = TextSpacingPolyfill::default();
    let summary = polyfill.process_generated_content(
        &mut tree,
        before,
        Some(&PropertyValue::from("none")),
        Some(&PropertyValue::from("none")),
        Some("ja"),
        false,
    );
    assert_eq!(summary, PassSummary::default());
    assert!(tree.white_space_log.is_empty());

    polyfill.process_generated_content(&mut tree, before, None, None, Some("ja"), false);
    assert_eq!(
        tree.white_space_log,
        [Some("pre".to_owned()), Some("nowrap".to_owned())]
    );
}

#[test]
fn language_comes_from_the_nearest_context() {
    // The block's own language applies when the run has none.
    let mut f = BlockFixture::with_text("日本語。").lang("zh-TW");
    assert_eq!(f.run().wrapped, 0);

    let mut f = BlockFixture::with_text("日本語。").lang("ja");
    assert_eq!(f.run().wrapped, 1);

    // A run's own language wins over the block's.
    let mut f = BlockFixture::with_text("日本語。").lang("ja");
    let block = f.block_fragment();
    let mut checkpoints = f.checkpoints(&block);
    for fragment in &mut checkpoints {
        fragment.lang = Some("zh-Hant".into());
    }
    let summary = f
        .polyfill
        .post_layout_block(&mut f.tree, Some(&block), &checkpoints);
    assert_eq!(summary.wrapped, 0);
}

#[test]
fn block_without_fragment() {
    let mut f = BlockFixture::with_text("「語」").hanging_punctuation("first");
    let block = f.block_fragment();
    let checkpoints = f.checkpoints(&block);
    let summary = f.polyfill.post_layout_block(&mut f.tree, None, &checkpoints);
    assert_eq!(summary.wrapped, 2);
    assert_eq!(f.tree.class_of(f.tree.children(f.block)[0]), "hang-first");
}

#[test]
fn unstyled_runs_are_left_alone() {
    let mut f = BlockFixture::with_text("「日本語ABC」")
        .text_spacing("none")
        .hanging_punctuation("none");
    assert_eq!(f.run(), PassSummary::default());
    assert_eq!(f.markup(), "「日本語ABC」");
}

#[test]
fn entry_points() {
    let polyfill = TextSpacingPolyfill::new(Config {
        full_width_ratio: 0.5,
        ..Config::default()
    });
    assert_eq!(polyfill.config().full_width_threshold(16.0), 8.0);
    assert_eq!(
        polyfill.polyfilled_inherited_props(),
        ["hanging-punctuation", "text-spacing"]
    );
    let summary = PassSummary {
        wrapped: 2,
        thin_spaces: 3,
        skipped_already_wrapped: 4,
    };
    assert_eq!(summary.mutations(), 5);
}
