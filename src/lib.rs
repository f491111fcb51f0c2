mod config;
mod record;
mod filters;
mod normalize;
mod hashtags;
mod sanitize;

mod archive;
mod sink;
mod ndjson;
mod pipeline;

mod paths;
mod zstd_jsonl;
mod concurrency;
mod progress;
mod util;

pub use crate::config::{default_archive_path, PipelineConfig, ARCHIVE_MIN_LEN, DEFAULT_TOPICS};
pub use crate::record::{parse_post, CleanedRecord, RawPost, ARCHIVE_TEXT_MARKER, HASHTAGS_PREFIX};
pub use crate::pipeline::{clean_post, Cleaner, Dropped, Outcome, RunStats};

// Individual stages, usable on their own.
pub use crate::filters::{admission, admit, Rejection};
pub use crate::normalize::{normalize, remove_urls};
pub use crate::hashtags::{extract_hashtags, HashtagSummary};
pub use crate::sanitize::{preserve_ascii, sanitize};

// Archive writer and reader.
pub use crate::archive::{parse_archive, read_archive, Archive, ArchivedRecord};

// Downstream sinks.
pub use crate::sink::{FnSink, MemorySink, NdjsonSink, Sink};
pub use crate::ndjson::NdjsonWriter;

// Input discovery for batch runs.
pub use crate::paths::discover_inputs;

// Logging and env helpers for binaries.
pub use crate::util::{init_tracing_once, init_tracing_with_default, parse_flag};
