//! Fixed-Count Splitter
//!
//! Divides raw `.txt`/`.csv` logs into a fixed number of contiguous line
//! chunks. Earlier chunks absorb the remainder, one extra line each, so
//! chunk sizes differ by at most one line. Each source gets its own
//! subdirectory under the results root; name collisions get a numeric
//! suffix.

use crate::error::PipelineError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Counters reported after a split run.
#[derive(Debug, Clone, Default)]
pub struct SplitOutcome {
    /// Sources split successfully
    pub files_split: usize,
    /// Sources skipped (unreadable, or fewer lines than segments)
    pub files_failed: usize,
    /// Total segment files written
    pub segments_written: usize,
}

/// Split every `.txt`/`.csv` log under `input` into `segments` contiguous
/// chunks under `results_root`. Per-file failures are counted, never fatal.
pub fn run_split(
    input: &Path,
    results_root: &Path,
    segments: usize,
) -> Result<SplitOutcome, PipelineError> {
    if segments == 0 {
        return Err(PipelineError::InvalidSegmentCount);
    }
    if !input.exists() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }
    fs::create_dir_all(results_root)?;

    let files = discover_logs(input);
    info!(files = files.len(), segments, "starting split run");

    let mut outcome = SplitOutcome::default();
    for path in files {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable log, skipping");
                outcome.files_failed += 1;
                continue;
            }
        };
        let lines: Vec<&str> = text.lines().collect();
        if segments > lines.len() {
            warn!(
                path = %path.display(),
                lines = lines.len(),
                segments,
                "more segments than lines, skipping"
            );
            outcome.files_failed += 1;
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("segments");
        let dir = unique_dir(results_root, stem);
        fs::create_dir_all(&dir)?;

        let base = lines.len() / segments;
        let remainder = lines.len() % segments;
        let mut start = 0;
        for index in 0..segments {
            let len = base + usize::from(index < remainder);
            let chunk = &lines[start..start + len];
            start += len;
            let mut body = chunk.join("\n");
            body.push('\n');
            fs::write(dir.join(format!("segment_{}.txt", index + 1)), body)?;
            outcome.segments_written += 1;
        }
        outcome.files_split += 1;
    }

    info!(?outcome, "split run finished");
    Ok(outcome)
}

fn discover_logs(input: &Path) -> Vec<PathBuf> {
    if input.is_file() {
        return vec![input.to_path_buf()];
    }
    WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| {
                    let e = e.to_lowercase();
                    e == "txt" || e == "csv"
                })
                .unwrap_or(false)
        })
        .collect()
}

/// First non-existing `{stem}`, `{stem}_1`, `{stem}_2`, … under `root`.
fn unique_dir(root: &Path, stem: &str) -> PathBuf {
    let candidate = root.join(stem);
    if !candidate.exists() {
        return candidate;
    }
    let mut index = 1;
    loop {
        let candidate = root.join(format!("{stem}_{index}"));
        if !candidate.exists() {
            return candidate;
        }
        index += 1;
    }
}
