//! Final text cleanup: drop hashtag and mention tokens, squeeze spaces, narrow to ASCII.

use crate::normalize::cut_spans;
use regex::Regex;
use std::sync::LazyLock;

// "Whitespace" here is the ASCII set: space, \t, \n, \x0B, \x0C, \r.
static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[^ \t\n\x0B\x0C\r]+").unwrap());
static MENTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@[^ \t\n\x0B\x0C\r]+").unwrap());
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

pub fn sanitize(text: &str) -> String {
    let no_tags = cut_spans(text, &HASHTAG_RE);
    let no_mentions = cut_spans(&no_tags, &MENTION_RE);
    let squeezed = SPACES_RE.replace_all(&no_mentions, " ");
    preserve_ascii(&squeezed)
}

/// Keep a character only if its code point is in 32..=63 or 96..=127.
/// Uppercase letters, controls and everything non-ASCII are dropped.
pub fn preserve_ascii(text: &str) -> String {
    text.chars().filter(|&c| is_kept_char(c)).collect()
}

#[inline]
pub fn is_kept_char(c: char) -> bool {
    matches!(c as u32, 32..=63 | 96..=127)
}
