use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use zstd::stream::read::Decoder;

// ----------------------------- Helpers for full-error logging ------------------------------------

#[inline]
fn warn_read_skip(path: &Path, e: &anyhow::Error) {
    let abs = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    tracing::warn!(
        path = %abs.display(),
        error = %format!("{:#}", e),
        "Skipping rest of input file after read/decode error; lines already read were processed"
    );
}

#[inline]
pub fn is_zst(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).map(|e| e.eq_ignore_ascii_case("zst")).unwrap_or(false)
}

// ----------------------------- Streaming ----------------------------------

/// Stream a JSONL file (plain, or zstd-compressed when the name ends in `.zst`)
/// line-by-line and call `on_line` with the raw bytes of each line minus its `\r?\n`.
/// UTF-8 validation is left to the caller, so one bad line never ends the file.
///
/// A read or decode failure (truncated frame, bad checksum) logs a single warning and
/// skips the remainder of the file. Errors returned by `on_line` propagate.
pub fn for_each_line_cfg(
    path: &Path,
    read_buf_bytes: usize,
    mut on_line: impl FnMut(&[u8]) -> Result<()>,
) -> Result<()> {
    let file = File::open(path).with_context(|| format!("open input {}", path.display()))?;
    let inner: Box<dyn Read> = if is_zst(path) {
        let mut decoder = Decoder::new(file).with_context(|| format!("zstd init {}", path.display()))?;
        decoder.window_log_max(31)?;
        Box::new(decoder)
    } else {
        Box::new(file)
    };
    let mut reader = BufReader::with_capacity(read_buf_bytes.max(8 * 1024), inner);

    let mut buf: Vec<u8> = Vec::with_capacity(16 * 1024);
    loop {
        buf.clear();
        let n = match reader.read_until(b'\n', &mut buf) {
            Ok(n) => n,
            Err(e) => {
                warn_read_skip(path, &anyhow::Error::new(e));
                return Ok(());
            }
        };
        if n == 0 {
            break;
        }
        if buf.ends_with(b"\n") {
            let _ = buf.pop();
            if buf.ends_with(b"\r") { let _ = buf.pop(); }
        }
        on_line(&buf)?;
    }
    Ok(())
}
