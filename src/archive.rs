//! Append-only archive of longer cleaned posts.
//!
//! Format per record: `"\n\ntext: " + text` immediately followed by the hashtag summary
//! (`"\nhashtags: ..."`). There is no other delimiter; readers scan for the text marker.

use crate::record::{CleanedRecord, ARCHIVE_TEXT_MARKER, HASHTAGS_PREFIX};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File-backed archive. Each append opens the file, writes, and closes it while
/// holding the archive lock, so concurrent callers never interleave records.
pub struct Archive {
    path: PathBuf,
    min_len: usize,
    lock: Mutex<()>,
}

impl Archive {
    pub fn new(path: impl AsRef<Path>, min_len: usize) -> Self {
        Self { path: path.as_ref().to_path_buf(), min_len, lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when `"\n\ntext: " + text` is long enough to archive.
    #[inline]
    pub fn qualifies(&self, record: &CleanedRecord) -> bool {
        ARCHIVE_TEXT_MARKER.chars().count() + record.normalized_text.chars().count() >= self.min_len
    }

    /// Append the record if it qualifies. Returns whether anything was written.
    pub fn append(&self, record: &CleanedRecord) -> Result<bool> {
        if !self.qualifies(record) {
            return Ok(false);
        }
        let archived = record.archived_text();

        let _guard = self.lock.lock();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create archive dir {}", parent.display()))?;
            }
        }
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open archive {}", self.path.display()))?;
        let write = |f: &mut File| -> io::Result<()> {
            f.write_all(archived.as_bytes())?;
            f.write_all(record.hashtag_summary.as_bytes())?;
            f.flush()?;
            // surfaces late write-back errors that a plain drop would swallow
            f.sync_all()
        };
        write(&mut f).with_context(|| format!("append to archive {}", self.path.display()))?;
        Ok(true)
    }
}

/// One record read back from an archive file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchivedRecord {
    pub text: String,
    /// Everything after `"\nhashtags: "`, verbatim.
    pub hashtags: String,
}

/// Split an archive file back into records by scanning for the text marker.
pub fn read_archive(path: &Path) -> Result<Vec<ArchivedRecord>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read archive {}", path.display()))?;
    Ok(parse_archive(&raw))
}

pub fn parse_archive(raw: &str) -> Vec<ArchivedRecord> {
    raw.split(ARCHIVE_TEXT_MARKER)
        .skip(1)
        .map(|chunk| match chunk.find(HASHTAGS_PREFIX) {
            Some(i) => ArchivedRecord {
                text: chunk[..i].to_string(),
                hashtags: chunk[i + HASHTAGS_PREFIX.len()..].to_string(),
            },
            None => ArchivedRecord { text: chunk.to_string(), hashtags: String::new() },
        })
        .collect()
}
