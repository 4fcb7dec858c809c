// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use crate::util::{contains_word_end, starts_with_word};

/// A language tag normalized for punctuation decisions.
///
/// Only the distinctions that change which punctuation is trimmed are kept: Traditional and
/// Simplified Chinese, Japanese and Korean. Other tags are kept lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lang {
    /// `zh` with a `Hant`, `TW` or `HK` subtag.
    ZhHant,
    /// Any other `zh` tag.
    ZhHans,
    /// `ja`
    Ja,
    /// `ko`
    Ko,
    /// Any other non-empty tag, lowercased.
    Other(String),
}

impl Lang {
    /// Normalizes a BCP 47 language tag. Returns `None` for an empty tag.
    ///
    /// ```
    /// use text_spacing::Lang;
    ///
    /// assert_eq!(Lang::normalize("zh-Hant-TW"), Some(Lang::ZhHant));
    /// assert_eq!(Lang::normalize("zh-HK"), Some(Lang::ZhHant));
    /// assert_eq!(Lang::normalize("zh-CN"), Some(Lang::ZhHans));
    /// assert_eq!(Lang::normalize("ja-JP"), Some(Lang::Ja));
    /// assert_eq!(Lang::normalize("EN-us"), Some(Lang::Other("en-us".into())));
    /// assert_eq!(Lang::normalize(""), None);
    /// ```
    pub fn normalize(tag: &str) -> Option<Self> {
        if tag.is_empty() {
            return None;
        }
        let tag = tag.to_ascii_lowercase();
        let lang = if starts_with_word(&tag, "zh") {
            if ["-hant", "-tw", "-hk"]
                .iter()
                .any(|subtag| contains_word_end(&tag[2..], subtag))
            {
                Self::ZhHant
            } else {
                Self::ZhHans
            }
        } else if starts_with_word(&tag, "ja") {
            Self::Ja
        } else if starts_with_word(&tag, "ko") {
            Self::Ko
        } else {
            Self::Other(tag)
        };
        Some(lang)
    }

    /// The normalized tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ZhHant => "zh-hant",
            Self::ZhHans => "zh-hans",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
