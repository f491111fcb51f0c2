use crate::archive::Archive;
use crate::concurrency::for_each_file_limited;
use crate::config::PipelineConfig;
use crate::filters::{admission, Rejection};
use crate::hashtags::extract_hashtags;
use crate::normalize::normalize;
use crate::paths::discover_inputs;
use crate::progress::make_count_progress;
use crate::record::{parse_post, CleanedRecord, RawPost};
use crate::sanitize::sanitize;
use crate::sink::Sink;
use crate::util::init_tracing_once;
use crate::zstd_jsonl::for_each_line_cfg;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// A post that produced no output, and why.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dropped {
    Rejected(Rejection),
    NoTopicMatch,
}

/// Result of one pipeline pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Dropped(Dropped),
    Emitted { archived: bool },
}

impl Outcome {
    pub fn is_emitted(&self) -> bool {
        matches!(self, Outcome::Emitted { .. })
    }
}

/// Pure part of the pipeline: admission, normalization, hashtag summary, sanitization.
/// No I/O; the same post and config always give the same answer.
pub fn clean_post(post: &RawPost, cfg: &PipelineConfig) -> std::result::Result<CleanedRecord, Dropped> {
    admission(post, cfg).map_err(Dropped::Rejected)?;

    let normalized = normalize(&post.text);

    let tags = extract_hashtags(post.hashtags.as_slice(), cfg);
    if !tags.keep {
        return Err(Dropped::NoTopicMatch);
    }

    Ok(CleanedRecord { normalized_text: sanitize(&normalized), hashtag_summary: tags.summary })
}

/// Totals for a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub files: u64,
    pub lines: u64,
    pub malformed: u64,
    pub rejected_language: u64,
    pub rejected_retweet: u64,
    pub rejected_no_hashtags: u64,
    pub no_topic_match: u64,
    pub emitted: u64,
    pub archived: u64,
}

#[derive(Default)]
struct Counters {
    lines: AtomicU64,
    malformed: AtomicU64,
    rejected_language: AtomicU64,
    rejected_retweet: AtomicU64,
    rejected_no_hashtags: AtomicU64,
    no_topic_match: AtomicU64,
    emitted: AtomicU64,
    archived: AtomicU64,
}

impl Counters {
    fn record(&self, outcome: Outcome) {
        let c = match outcome {
            Outcome::Dropped(Dropped::Rejected(Rejection::Language)) => &self.rejected_language,
            Outcome::Dropped(Dropped::Rejected(Rejection::Retweet)) => &self.rejected_retweet,
            Outcome::Dropped(Dropped::Rejected(Rejection::NoHashtags)) => &self.rejected_no_hashtags,
            Outcome::Dropped(Dropped::NoTopicMatch) => &self.no_topic_match,
            Outcome::Emitted { archived } => {
                if archived {
                    self.archived.fetch_add(1, Ordering::Relaxed);
                }
                &self.emitted
            }
        };
        c.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self, files: u64) -> RunStats {
        let ld = |a: &AtomicU64| a.load(Ordering::Relaxed);
        RunStats {
            files,
            lines: ld(&self.lines),
            malformed: ld(&self.malformed),
            rejected_language: ld(&self.rejected_language),
            rejected_retweet: ld(&self.rejected_retweet),
            rejected_no_hashtags: ld(&self.rejected_no_hashtags),
            no_topic_match: ld(&self.no_topic_match),
            emitted: ld(&self.emitted),
            archived: ld(&self.archived),
        }
    }
}

/// The post cleaning pipeline. Holds the immutable configuration and the archive;
/// safe to share across threads.
pub struct Cleaner {
    cfg: PipelineConfig,
    archive: Option<Archive>,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Cleaner {
    pub fn new(cfg: PipelineConfig) -> Self {
        let archive = cfg.archive_path.as_ref().map(|p| Archive::new(p, cfg.archive_min_len));
        Self { cfg, archive }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.cfg
    }

    pub fn archive(&self) -> Option<&Archive> {
        self.archive.as_ref()
    }

    /// See [`clean_post`].
    pub fn clean(&self, post: &RawPost) -> std::result::Result<CleanedRecord, Dropped> {
        clean_post(post, &self.cfg)
    }

    /// Run one post through the pipeline: clean, emit to `sink`, then archive.
    ///
    /// Sink errors propagate. Archive errors are logged and reported as `archived: false`;
    /// the emission has already happened by then.
    pub fn process(&self, post: &RawPost, sink: &dyn Sink) -> Result<Outcome> {
        let record = match self.clean(post) {
            Ok(r) => r,
            Err(d) => {
                tracing::debug!(reason=?d, "post dropped");
                return Ok(Outcome::Dropped(d));
            }
        };

        sink.emit(&record.message()).context("emit cleaned message")?;

        let archived = match &self.archive {
            Some(archive) => match archive.append(&record) {
                Ok(written) => written,
                Err(e) => {
                    tracing::error!(path=%archive.path().display(), error=%format!("{:#}", e), "archive append failed; post was still emitted");
                    false
                }
            },
            None => false,
        };
        Ok(Outcome::Emitted { archived })
    }

    /// Parse one JSON line and process it. Malformed lines yield `Ok(None)`.
    pub fn process_line(&self, line: &str, sink: &dyn Sink) -> Result<Option<Outcome>> {
        match parse_post(line) {
            Ok(post) => self.process(&post, sink).map(Some),
            Err(e) => {
                tracing::warn!(error=%e, "skipping malformed post line");
                Ok(None)
            }
        }
    }

    /// Batch mode: read every post file under `input` (a file or a directory),
    /// process each line, and return totals. Files run in parallel up to
    /// `file_concurrency`; lines within a file keep their order.
    pub fn run(&self, input: &Path, sink: &dyn Sink) -> Result<RunStats> {
        init_tracing_once();
        if let Some(n) = self.cfg.parallelism { if n > 0 { rayon::ThreadPoolBuilder::new().num_threads(n).build_global().ok(); } }

        let files = discover_inputs(input)?;
        if files.is_empty() {
            tracing::warn!(input=%input.display(), "No post files found.");
        } else {
            tracing::info!("Planned {} files for processing.", files.len());
        }

        let pb = if self.cfg.progress {
            Some(make_count_progress(files.len() as u64, self.cfg.progress_label.as_deref().unwrap_or("Cleaning")))
        } else {
            None
        };

        let counters = Counters::default();
        let read_buf = self.cfg.read_buffer_bytes;

        for_each_file_limited(&files, self.cfg.file_concurrency, |path| -> Result<()> {
            for_each_line_cfg(path, read_buf, |raw| {
                let line = match std::str::from_utf8(raw) {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::warn!(path=%path.display(), error=%e, "skipping post line with invalid UTF-8");
                        counters.lines.fetch_add(1, Ordering::Relaxed);
                        counters.malformed.fetch_add(1, Ordering::Relaxed);
                        return Ok(());
                    }
                };
                if line.trim().is_empty() {
                    return Ok(());
                }
                counters.lines.fetch_add(1, Ordering::Relaxed);
                match self.process_line(line, sink)? {
                    Some(outcome) => counters.record(outcome),
                    None => { counters.malformed.fetch_add(1, Ordering::Relaxed); }
                }
                Ok(())
            })
            .with_context(|| format!("processing {}", path.display()))?;
            if let Some(pb) = &pb { pb.inc(1); }
            Ok(())
        })?;

        sink.flush()?;
        if let Some(pb) = pb { pb.finish_with_message("done"); }

        let stats = counters.snapshot(files.len() as u64);
        tracing::info!(
            lines = stats.lines,
            emitted = stats.emitted,
            archived = stats.archived,
            malformed = stats.malformed,
            "cleaning run finished"
        );
        Ok(stats)
    }
}
