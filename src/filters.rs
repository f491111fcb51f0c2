//! Admission checks applied to a raw post before any text work happens.

use crate::config::PipelineConfig;
use crate::record::RawPost;
use std::fmt;

/// Why a post failed admission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    Language,
    Retweet,
    NoHashtags,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::Language => "language mismatch",
            Rejection::Retweet => "retweet",
            Rejection::NoHashtags => "no hashtags",
        };
        f.write_str(s)
    }
}

/// Checks in order: language (exact match, missing tag never matches), retweet, hashtags present.
pub fn admission(post: &RawPost, cfg: &PipelineConfig) -> Result<(), Rejection> {
    match post.language_tag.as_deref() {
        Some(lang) if lang == cfg.target_language => {}
        _ => return Err(Rejection::Language),
    }
    if post.is_retweet {
        return Err(Rejection::Retweet);
    }
    if post.hashtags.is_empty() {
        return Err(Rejection::NoHashtags);
    }
    Ok(())
}

#[inline]
pub fn admit(post: &RawPost, cfg: &PipelineConfig) -> bool {
    admission(post, cfg).is_ok()
}
