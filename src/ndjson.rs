use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Minimal NDJSON writer with buffering, over a file or stdout.
/// `write_line` appends the `\n` terminator.
pub struct NdjsonWriter {
    label: String,
    w: Option<BufWriter<Box<dyn Write + Send>>>,
}

impl NdjsonWriter {
    pub fn create(path: &Path, buf_bytes: usize) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
        Ok(Self::from_writer(Box::new(f), path.display().to_string(), buf_bytes))
    }

    pub fn stdout(buf_bytes: usize) -> Self {
        Self::from_writer(Box::new(io::stdout()), "<stdout>".to_string(), buf_bytes)
    }

    fn from_writer(inner: Box<dyn Write + Send>, label: String, buf_bytes: usize) -> Self {
        Self { label, w: Some(BufWriter::with_capacity(buf_bytes.max(8 * 1024), inner)) }
    }

    #[inline]
    pub fn write_line(&mut self, s: &str) -> io::Result<()> {
        if let Some(w) = &mut self.w {
            w.write_all(s.as_bytes())?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(w) = &mut self.w {
            w.flush().with_context(|| format!("flush {}", self.label))?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        if let Some(mut w) = self.w.take() {
            w.flush().with_context(|| format!("flush {}", self.label))?;
        }
        Ok(())
    }

    pub fn buffer_capacity(&self) -> usize {
        self.w.as_ref().map(|w| w.capacity()).unwrap_or(0)
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
