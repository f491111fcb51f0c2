//! Concurrency helper: limit the number of input files processed in parallel.

use anyhow::Result;
use rayon::prelude::*;
use std::path::PathBuf;

/// Limit parallelism across input files: at most `limit` readers in flight.
/// Each file is handled start to finish by one call to `f`, so its lines keep their
/// order; only different files may interleave.
pub fn for_each_file_limited<F>(files: &[PathBuf], limit: usize, f: F) -> Result<()>
where
    F: Sync + Fn(&PathBuf) -> Result<()>,
{
    if limit <= 1 {
        for path in files {
            f(path)?;
        }
        return Ok(());
    }
    for chunk in files.chunks(limit) {
        chunk.par_iter().try_for_each(|path| f(path))?;
    }
    Ok(())
}
