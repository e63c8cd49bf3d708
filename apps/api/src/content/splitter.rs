//! Response Splitter — separates hashtags from body text in raw model output.
//!
//! A hashtag token is `#` followed by one or more ASCII word characters.
//! Total over any input: never fails.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HASHTAG_PATTERN: Regex =
        Regex::new(r"#[A-Za-z0-9_]+").expect("valid hashtag pattern");
}

/// Raw output split into body and hashtags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitContent {
    /// Input with every hashtag token removed, then trimmed.
    /// Interior whitespace is left untouched.
    pub body: String,
    /// Every token in order of appearance, duplicates included.
    pub hashtags: Vec<String>,
}

impl SplitContent {
    /// Hashtags joined by single spaces; empty when there are none.
    pub fn hashtag_line(&self) -> String {
        self.hashtags.join(" ")
    }
}

pub fn split(raw: &str) -> SplitContent {
    let hashtags = HASHTAG_PATTERN
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect();

    let body = HASHTAG_PATTERN.replace_all(raw, "").trim().to_string();

    SplitContent { body, hashtags }
}
