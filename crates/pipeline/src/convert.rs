//! Text-to-CSV Passthrough
//!
//! Mirrors a directory tree of `.txt` logs into a parallel tree of `.csv`
//! files with identical content, so downstream ingestion sees a uniform
//! extension.

use crate::error::PipelineError;
use std::fs;
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// Counters reported after a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertOutcome {
    /// Files mirrored
    pub files_converted: usize,
}

/// Mirror every `.txt` file under `input` to `dest`, preserving relative
/// paths and swapping the extension to `.csv`.
pub fn run_convert(input: &Path, dest: &Path) -> Result<ConvertOutcome, PipelineError> {
    if !input.exists() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }
    fs::create_dir_all(dest)?;

    let mut outcome = ConvertOutcome::default();
    for entry in WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let is_txt = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("txt"))
            .unwrap_or(false);
        if !is_txt {
            continue;
        }
        let Ok(relative) = path.strip_prefix(input) else {
            continue;
        };

        let target = dest.join(relative).with_extension("csv");
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &target)?;
        outcome.files_converted += 1;
    }

    info!(?outcome, "conversion run finished");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_is_mirrored() {
        let workspace = tempfile::tempdir().unwrap();
        let input = workspace.path().join("in");
        fs::create_dir_all(input.join("Normal")).unwrap();
        fs::write(input.join("Normal/seg_1.txt"), "1.0\n2.0\n").unwrap();
        fs::write(input.join("readme.md"), "not a log").unwrap();

        let dest = workspace.path().join("out");
        let outcome = run_convert(&input, &dest).unwrap();

        assert_eq!(outcome.files_converted, 1);
        let mirrored = dest.join("Normal/seg_1.csv");
        assert_eq!(fs::read_to_string(mirrored).unwrap(), "1.0\n2.0\n");
        assert!(!dest.join("readme.csv").exists());
    }

    #[test]
    fn test_missing_input() {
        let workspace = tempfile::tempdir().unwrap();
        let result = run_convert(&workspace.path().join("nope"), workspace.path());
        assert!(matches!(result, Err(PipelineError::InputNotFound(_))));
    }
}
