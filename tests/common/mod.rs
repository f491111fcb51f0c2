#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tweetnet::PipelineConfig;

/// One post as a JSON line, in the shape the batch reader expects.
pub fn post_json(text: &str, lang: &str, is_retweet: bool, hashtags: &[&str]) -> String {
    json!({
        "id": 1,
        "text": text,
        "lang": lang,
        "is_retweet": is_retweet,
        "hashtags": hashtags,
    })
    .to_string()
}

/// Write plain JSONL lines (each followed by `\n`).
pub fn write_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut f = File::create(path).unwrap();
    for l in lines {
        writeln!(&mut f, "{}", l).unwrap();
    }
}

/// Write a compressed `.zst` file containing the provided JSONL lines.
pub fn write_zst_lines(path: &Path, lines: &[String]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let f = File::create(path).unwrap();
    let mut enc = zstd::stream::write::Encoder::new(f, 3).unwrap();
    for l in lines {
        writeln!(&mut enc, "{}", l).unwrap();
    }
    enc.finish().unwrap();
}

/// Read a text file line-by-line into strings (skips empty lines).
pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    let r = BufReader::new(f);
    r.lines().map(|l| l.unwrap()).filter(|s| !s.is_empty()).collect()
}

/// Read a JSONL file into a vector of `serde_json::Value`.
pub fn read_jsonl_values(path: &Path) -> Vec<Value> {
    read_lines(path).iter().map(|s| serde_json::from_str(s).unwrap()).collect()
}

/// Default config with the archive redirected into `dir`.
pub fn config_in(dir: &Path) -> PipelineConfig {
    PipelineConfig::default().with_archive_path(dir.join("data").join("dump.txt"))
}

/// Build a tiny post corpus:
/// - `posts.ndjson`: one kept post (short, not archived), one French post, one retweet,
///   one post without hashtags, one malformed line, one blank line.
/// - `more.zst`: one long post with entity-form hashtags (archived).
/// - `notes.txt`: ignored by input discovery.
pub fn make_corpus_basic() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.into_path().join("posts");

    let plain = vec![
        post_json("Rust 1.80 ships LazyLock! https://blog.rust-lang.org/x #rust", "en", false, &["rust"]),
        post_json("Bonjour", "fr", false, &["paris"]),
        post_json("RT something", "en", true, &["x"]),
        post_json("no tags here", "en", false, &[]),
        "{not json".to_string(),
        String::new(),
    ];
    write_lines(&base.join("posts.ndjson"), &plain);

    let compressed = vec![json!({
        "text": "This is a considerably longer post about the science of sourdough bread baking at home #food",
        "lang": "en",
        "is_retweet": false,
        "hashtags": [{"text": "food", "indices": [88, 93]}],
    })
    .to_string()];
    write_zst_lines(&base.join("more.zst"), &compressed);

    write_lines(&base.join("notes.txt"), &["not a post file".to_string()]);
    base
}

pub const SHORT_MESSAGE: &str = "rust 1.80 ships lazylock! \nhashtags: rust ";
pub const LONG_TEXT: &str =
    "this is a considerably longer post about the science of sourdough bread baking at home ";
