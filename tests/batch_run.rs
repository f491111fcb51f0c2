#[path = "common/mod.rs"]
mod common;

use common::*;
use tweetnet::{discover_inputs, read_archive, Cleaner, MemorySink, NdjsonSink, PipelineConfig, RunStats};

/// Input discovery takes known extensions only, sorted; a bare file is taken as-is.
#[test]
fn discovery_picks_post_files_only() {
    let base = make_corpus_basic();
    let files = discover_inputs(&base).unwrap();
    let names: Vec<String> = files.iter().map(|p| p.file_name().unwrap().to_string_lossy().into_owned()).collect();
    assert_eq!(names, vec!["more.zst".to_string(), "posts.ndjson".to_string()]);

    let single = discover_inputs(&base.join("notes.txt")).unwrap();
    assert_eq!(single.len(), 1);

    assert!(discover_inputs(&base.join("missing")).is_err());
}

/// Whole-directory run over plain and zstd input:
/// - one short post emitted, one long post emitted and archived
/// - one rejection per admission reason, one malformed line, blank line ignored
#[test]
fn run_counts_every_outcome() {
    let base = make_corpus_basic();
    let cfg = config_in(&base);
    let archive_path = cfg.archive_path.clone().unwrap();
    let cleaner = Cleaner::new(cfg);
    let sink = MemorySink::new();

    let stats = cleaner.run(&base, &sink).unwrap();
    assert_eq!(
        stats,
        RunStats {
            files: 2,
            lines: 6,
            malformed: 1,
            rejected_language: 1,
            rejected_retweet: 1,
            rejected_no_hashtags: 1,
            no_topic_match: 0,
            emitted: 2,
            archived: 1,
        }
    );

    // files run in sorted order: more.zst, then posts.ndjson
    assert_eq!(
        sink.messages(),
        vec![format!("{}\nhashtags: food ", LONG_TEXT), SHORT_MESSAGE.to_string()]
    );

    let archived = read_archive(&archive_path).unwrap();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].text, LONG_TEXT);
    assert_eq!(archived[0].hashtags, "food ");
}

/// Topic mode over the same corpus: "rust" is not a topic, "food" is.
#[test]
fn run_in_topic_mode_keeps_topic_posts_only() {
    let base = make_corpus_basic();
    let cleaner = Cleaner::new(config_in(&base).with_topic_selector(true).with_file_concurrency(2));
    let sink = MemorySink::new();

    let stats = cleaner.run(&base, &sink).unwrap();
    assert_eq!(stats.emitted, 1);
    assert_eq!(stats.no_topic_match, 1);
    assert_eq!(stats.archived, 1);
    assert_eq!(sink.messages(), vec![format!("{}\nhashtags: food", LONG_TEXT)]);
}

/// NDJSON sink output: one `{"message": ...}` object per emitted post.
#[test]
fn ndjson_sink_writes_message_lines() {
    let base = make_corpus_basic();
    let out = base.join("out").join("messages.ndjson");
    let cleaner = Cleaner::new(config_in(&base).without_archive());

    let sink = NdjsonSink::create(&out, 64 * 1024).unwrap();
    let stats = cleaner.run(&base.join("posts.ndjson"), &sink).unwrap();
    sink.finish().unwrap();

    assert_eq!(stats.files, 1);
    assert_eq!(stats.emitted, 1);
    assert_eq!(stats.archived, 0);

    let values = read_jsonl_values(&out);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["message"].as_str(), Some(SHORT_MESSAGE));
}

/// An empty directory is not an error; it just produces nothing.
#[test]
fn run_on_empty_directory_is_a_no_op() {
    let tmp = tempfile::tempdir().unwrap();
    let cleaner = Cleaner::new(config_in(tmp.path()));
    let sink = MemorySink::new();
    let stats = cleaner.run(tmp.path(), &sink).unwrap();
    assert_eq!(stats, RunStats::default());
    assert!(sink.is_empty());
}

/// A line that is not valid UTF-8 counts as malformed; the lines after it are still read.
#[test]
fn invalid_utf8_line_does_not_end_the_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("mixed.ndjson");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(post_json("one", "en", false, &["a"]).as_bytes());
    bytes.extend_from_slice(b"\n{\"text\": \"bad \xFF byte\", \"lang\": \"en\"}\n");
    bytes.extend_from_slice(post_json("three", "en", false, &["b"]).as_bytes());
    bytes.push(b'\n');
    std::fs::write(&path, bytes).unwrap();

    let cleaner = Cleaner::new(config_in(tmp.path()).without_archive());
    let sink = MemorySink::new();
    let stats = cleaner.run(&path, &sink).unwrap();

    assert_eq!(stats.lines, 3);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.emitted, 2);
    assert_eq!(sink.messages(), vec!["one\nhashtags: a ".to_string(), "three\nhashtags: b ".to_string()]);
}

/// The sink built for a config uses the config's write buffer size.
#[test]
fn sink_for_config_uses_configured_buffer() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out.ndjson");
    let cfg = PipelineConfig::default().with_io_buffers(8 * 1024, 1 << 20);

    let sink = NdjsonSink::for_config(Some(&out), &cfg).unwrap();
    assert_eq!(sink.buffer_capacity(), 1 << 20);
    sink.finish().unwrap();
    assert!(out.exists());

    let small = PipelineConfig::default().with_io_buffers(8 * 1024, 16 * 1024);
    let sink = NdjsonSink::for_config(Some(&out), &small).unwrap();
    assert_eq!(sink.buffer_capacity(), 16 * 1024);
}

/// With several files in flight, each file's messages still arrive in line order.
#[test]
fn concurrent_files_keep_their_own_line_order() {
    let tmp = tempfile::tempdir().unwrap();
    for name in ["a", "b", "c"] {
        let lines: Vec<String> =
            (0..50).map(|i| post_json(&format!("{name}{i}"), "en", false, &[name])).collect();
        write_lines(&tmp.path().join(format!("{name}.ndjson")), &lines);
    }
    let cleaner = Cleaner::new(config_in(tmp.path()).without_archive().with_file_concurrency(3));
    let sink = MemorySink::new();
    let stats = cleaner.run(tmp.path(), &sink).unwrap();
    assert_eq!(stats.emitted, 150);

    let messages = sink.messages();
    for name in ["a", "b", "c"] {
        let own: Vec<String> = messages.iter().filter(|m| m.starts_with(name)).cloned().collect();
        let expected: Vec<String> = (0..50).map(|i| format!("{name}{i}\nhashtags: {name} ")).collect();
        assert_eq!(own, expected);
    }
}
