//! Hashtag summary line and topic-selection decision.

use crate::config::PipelineConfig;
use crate::record::HASHTAGS_PREFIX;

/// Result of walking a post's hashtags: the summary line and whether the post survives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashtagSummary {
    pub summary: String,
    pub keep: bool,
}

/// Build `"\nhashtags: ..."` from the post's hashtags.
///
/// - Topic selection off: every tag, in order, each followed by a space. Always kept.
/// - Topic selection on: every (tag, topic) pair with `tag == topic` appends the tag
///   with no separator. A tag listed under several identical topics is appended once
///   per match. Kept only if at least one pair matched.
pub fn extract_hashtags<S: AsRef<str>>(hashtags: &[S], cfg: &PipelineConfig) -> HashtagSummary {
    let mut summary = String::from(HASHTAGS_PREFIX);

    if !cfg.use_topic_selector {
        for tag in hashtags {
            summary.push_str(tag.as_ref());
            summary.push(' ');
        }
        return HashtagSummary { summary, keep: true };
    }

    let mut keep = false;
    for tag in hashtags {
        let tag = tag.as_ref();
        for topic in &cfg.topics {
            if topic == tag {
                summary.push_str(tag);
                keep = true;
            }
        }
    }
    HashtagSummary { summary, keep }
}
