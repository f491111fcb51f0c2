use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const INPUT_EXTENSIONS: [&str; 4] = ["ndjson", "jsonl", "json", "zst"];

fn is_input_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INPUT_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

/// Resolve the input location into a sorted list of post files.
/// A file is taken as-is; a directory contributes its direct children with a
/// known extension (`.ndjson`, `.jsonl`, `.json`, `.zst`).
pub fn discover_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("input not found: {}", input.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input).min_depth(1).max_depth(1) {
        match entry {
            Ok(ent) if ent.file_type().is_file() && is_input_file(ent.path()) => {
                files.push(ent.path().to_path_buf());
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error=%e, "skipping unreadable directory entry"),
        }
    }
    files.sort();
    Ok(files)
}
