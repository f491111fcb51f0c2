//! Downstream sinks. A sink receives one `message` string per cleaned post.

use crate::config::PipelineConfig;
use crate::ndjson::NdjsonWriter;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::Path;

/// Anything that accepts cleaned messages. Must tolerate calls from several threads.
pub trait Sink: Send + Sync {
    fn emit(&self, message: &str) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Wire shape of one downstream message.
#[derive(Serialize)]
struct MessageLine<'a> {
    message: &'a str,
}

/// Writes `{"message": "..."}` lines to a file or stdout.
pub struct NdjsonSink {
    w: Mutex<NdjsonWriter>,
}

impl NdjsonSink {
    pub fn create(path: &Path, buf_bytes: usize) -> Result<Self> {
        Ok(Self { w: Mutex::new(NdjsonWriter::create(path, buf_bytes)?) })
    }
    pub fn stdout(buf_bytes: usize) -> Self {
        Self { w: Mutex::new(NdjsonWriter::stdout(buf_bytes)) }
    }
    /// File sink when `output` is given, stdout otherwise; buffered per the config.
    pub fn for_config(output: Option<&Path>, cfg: &PipelineConfig) -> Result<Self> {
        match output {
            Some(path) => Self::create(path, cfg.write_buffer_bytes),
            None => Ok(Self::stdout(cfg.write_buffer_bytes)),
        }
    }
    pub fn buffer_capacity(&self) -> usize {
        self.w.lock().buffer_capacity()
    }
    pub fn finish(self) -> Result<()> {
        self.w.into_inner().finish()
    }
}

impl Sink for NdjsonSink {
    fn emit(&self, message: &str) -> Result<()> {
        let line = serde_json::to_string(&MessageLine { message })?;
        let mut w = self.w.lock();
        w.write_line(&line).with_context(|| format!("write message to {}", w.label()))
    }

    fn flush(&self) -> Result<()> {
        self.w.lock().flush()
    }
}

/// Collects messages in memory, in arrival order.
#[derive(Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn into_messages(self) -> Vec<String> {
        self.messages.into_inner()
    }
}

impl Sink for MemorySink {
    fn emit(&self, message: &str) -> Result<()> {
        self.messages.lock().push(message.to_string());
        Ok(())
    }
}

/// Lambda sink: hand each message to a closure.
/// Example:
///   let sink = FnSink::new(|m| { println!("{m}"); Ok(()) });
pub struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F>
where
    F: Fn(&str) -> Result<()> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Sink for FnSink<F>
where
    F: Fn(&str) -> Result<()> + Send + Sync,
{
    fn emit(&self, message: &str) -> Result<()> {
        (self.f)(message)
    }
}
