use crate::util::env_flag;
use std::path::{Path, PathBuf};

/// Topic vocabulary used in topic-selection mode, in matching order.
pub const DEFAULT_TOPICS: [&str; 14] = [
    "politics",
    "entertainment",
    "world",
    "us",
    "business",
    "opinion",
    "tech",
    "science",
    "health",
    "sports",
    "art",
    "style",
    "food",
    "travel",
];

/// Minimum length of `"\n\ntext: " + final_text` for a record to be archived.
pub const ARCHIVE_MIN_LEN: usize = 60;

/// Default archive location: `<home>/tweetnet/data/dump.txt`.
/// Falls back to the working directory when no home directory is known.
pub fn default_archive_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tweetnet")
        .join("data")
        .join("dump.txt")
}

/// Immutable pipeline configuration with defaults and builder chaining.
/// Built once at startup and handed to `Cleaner`; never mutated while posts flow.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub target_language: String,
    pub use_topic_selector: bool,
    pub topics: Vec<String>,              // matched in order, exact and case-sensitive
    pub archive_path: Option<PathBuf>,    // None disables archival
    pub archive_min_len: usize,

    // batch runs
    pub parallelism: Option<usize>,       // Some(N) to set rayon threads, None to use default
    pub file_concurrency: usize,          // input files processed at once
    pub progress: bool,
    pub progress_label: Option<String>,
    pub read_buffer_bytes: usize,
    pub write_buffer_bytes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_language: "en".to_string(),
            use_topic_selector: false,
            topics: DEFAULT_TOPICS.iter().map(|s| s.to_string()).collect(),
            archive_path: Some(default_archive_path()),
            archive_min_len: ARCHIVE_MIN_LEN,

            parallelism: None,
            file_concurrency: 1,
            progress: false,
            progress_label: None,
            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,
        }
    }
}

impl PipelineConfig {
    /// Defaults overlaid with `TWEETNET_*` environment variables:
    /// - TWEETNET_LANG: target language code
    /// - TWEETNET_TOPIC_SELECTOR: 1/true/yes/on enables topic selection
    /// - TWEETNET_ARCHIVE: archive file path
    /// - TWEETNET_NO_ARCHIVE: 1/true/yes/on disables archival
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(lang) = std::env::var("TWEETNET_LANG") {
            if !lang.trim().is_empty() {
                cfg = cfg.with_target_language(lang);
            }
        }
        if let Some(on) = env_flag("TWEETNET_TOPIC_SELECTOR") {
            cfg = cfg.with_topic_selector(on);
        }
        if let Ok(path) = std::env::var("TWEETNET_ARCHIVE") {
            if !path.trim().is_empty() {
                cfg = cfg.with_archive_path(path.trim());
            }
        }
        if env_flag("TWEETNET_NO_ARCHIVE") == Some(true) {
            cfg = cfg.without_archive();
        }
        cfg
    }

    pub fn with_target_language(mut self, lang: impl AsRef<str>) -> Self {
        self.target_language = lang.as_ref().trim().to_string();
        self
    }
    pub fn with_topic_selector(mut self, yes: bool) -> Self {
        self.use_topic_selector = yes;
        self
    }
    /// Replace the topic vocabulary. Order and duplicates are kept as given.
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_archive_path(mut self, path: impl AsRef<Path>) -> Self {
        self.archive_path = Some(path.as_ref().to_path_buf());
        self
    }
    pub fn without_archive(mut self) -> Self {
        self.archive_path = None;
        self
    }
    pub fn with_archive_min_len(mut self, len: usize) -> Self {
        self.archive_min_len = len;
        self
    }
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.parallelism = Some(threads);
        self
    }
    pub fn with_file_concurrency(mut self, n: usize) -> Self {
        self.file_concurrency = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }
}
