//! Post records: the raw input shape (one JSON object per line) and the cleaned output.

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};

/// Marker that opens every archived record.
pub const ARCHIVE_TEXT_MARKER: &str = "\n\ntext: ";
/// Prefix of every hashtag summary line.
pub const HASHTAGS_PREFIX: &str = "\nhashtags: ";

/// One social-media post as delivered by the upstream producer.
/// Extra fields are ignored by serde.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub text: String,

    // a missing tag never matches the target language
    #[serde(default, rename = "lang", alias = "language_tag", alias = "languageTag")]
    pub language_tag: Option<String>,

    #[serde(default, alias = "isRetweet", alias = "retweet")]
    pub is_retweet: bool,

    #[serde(default, deserialize_with = "de_hashtags")]
    pub hashtags: Vec<String>,
}

impl RawPost {
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self { text: text.into(), language_tag: Some(lang.into()), ..Default::default() }
    }
    pub fn retweet(mut self, yes: bool) -> Self {
        self.is_retweet = yes;
        self
    }
    pub fn hashtags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hashtags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Hashtags arrive either as bare strings or as entity objects (`{"text": "Tech", ...}`).
#[derive(Deserialize)]
#[serde(untagged)]
enum HashtagRepr {
    Plain(String),
    Entity { text: String },
}

fn de_hashtags<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Vec<String>, D::Error> {
    let raw: Option<Vec<HashtagRepr>> = Option::deserialize(d)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|h| match h {
            HashtagRepr::Plain(s) => s,
            HashtagRepr::Entity { text } => text,
        })
        .collect())
}

/// Parse a JSON line into `RawPost` using serde_json.
#[inline]
pub fn parse_post(line: &str) -> Result<RawPost> {
    Ok(serde_json::from_str(line)?)
}

/// Output of one pipeline pass. Lives only for the duration of that pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanedRecord {
    pub normalized_text: String,
    pub hashtag_summary: String,
}

impl CleanedRecord {
    /// The downstream message: cleaned text immediately followed by the hashtag summary.
    pub fn message(&self) -> String {
        let mut s = String::with_capacity(self.normalized_text.len() + self.hashtag_summary.len());
        s.push_str(&self.normalized_text);
        s.push_str(&self.hashtag_summary);
        s
    }

    /// `"\n\ntext: " + normalized_text`, the archived form of the body.
    pub fn archived_text(&self) -> String {
        format!("{}{}", ARCHIVE_TEXT_MARKER, self.normalized_text)
    }
}
