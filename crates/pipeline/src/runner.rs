//! Batch Runners
//!
//! The two pipeline entry points: `run_extract` computes the full
//! descriptor battery per file; `run_select` computes the selection
//! battery with automatic chunking, ranks descriptors and writes the
//! reduced and curated outputs.

use crate::error::PipelineError;
use crate::request::{PipelineRequest, RunSummary};
use condition_label::label_with_policy;
use dataset_store::{chunk_samples, segment_id, Dataset, DatasetWriter, SegmentRecord};
use feature_bank::{FeatureBank, MIN_SAMPLES};
use feature_select::{Selector, CURATED_WEIGHTS};
use ndarray::Array2;
use signal_ingest::read_samples;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extensions the batch walk picks up.
const SOURCE_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// One discovered recording file.
struct Source {
    path: PathBuf,
    condition: String,
    stem: String,
    file_name: String,
}

/// Run the full-battery extraction over the request's input and persist
/// the consolidated, summary, index and partitioned tables.
pub fn run_extract(request: &PipelineRequest) -> Result<RunSummary, PipelineError> {
    let sources = discover_sources(&request.input)?;
    info!(files = sources.len(), input = %request.input.display(), "starting extraction run");

    let mut bank = FeatureBank::new();
    let mut dataset = Dataset::new(FeatureBank::full_names());
    let mut skipped = 0;
    let mut processed = 0;

    for source in &sources {
        let samples = read_samples(&source.path);
        if samples.len() < MIN_SAMPLES {
            debug!(path = %source.path.display(), n = samples.len(), "skipping file");
            skipped += 1;
            continue;
        }

        let vector = bank.compute_full(&samples);
        let label = label_with_policy(&source.condition, request.label_policy);
        dataset.push(SegmentRecord {
            segment: source.stem.clone(),
            source_file: source.file_name.clone(),
            condition: source.condition.clone(),
            label,
            features: vector,
        })?;
        processed += 1;
    }

    if dataset.is_empty() {
        return Err(PipelineError::NoValidSegments(request.input.clone()));
    }

    let writer = DatasetWriter::new(&request.results_root);
    writer.write_full(&dataset)?;
    writer.write_summary(&dataset)?;
    writer.write_index(&dataset)?;
    writer.write_by_condition(&dataset)?;
    writer.write_per_segment(&dataset)?;

    let summary = RunSummary {
        files_processed: processed,
        files_skipped: skipped,
        records: dataset.len(),
        conditions: dataset.conditions().len(),
        used_fallback: None,
    };
    info!(?summary, "extraction run finished");
    Ok(summary)
}

/// Run the selection pipeline: core battery with chunking of long sources,
/// relevance ranking with fallback, reduced top-K table and the curated
/// weighted export.
pub fn run_select(request: &PipelineRequest) -> Result<RunSummary, PipelineError> {
    let sources = discover_sources(&request.input)?;
    info!(files = sources.len(), input = %request.input.display(), "starting selection run");

    let bank = FeatureBank::new();
    let mut dataset = Dataset::new(FeatureBank::core_names());
    let mut per_file = Dataset::new(FeatureBank::core_names());
    let mut skipped = 0;
    let mut processed = 0;

    for source in &sources {
        let samples = read_samples(&source.path);
        if samples.len() < MIN_SAMPLES {
            debug!(path = %source.path.display(), n = samples.len(), "skipping file");
            skipped += 1;
            continue;
        }

        let label = label_with_policy(&source.condition, request.label_policy);

        let chunks = chunk_samples(&samples);
        if chunks.len() > 1 {
            info!(
                path = %source.path.display(),
                n = samples.len(),
                chunks = chunks.len(),
                "long source split into chunks"
            );
        }
        for (index, chunk) in chunks.iter().enumerate() {
            let segment = if chunks.len() == 1 {
                source.stem.clone()
            } else {
                segment_id(&source.stem, index)
            };
            dataset.push(SegmentRecord {
                segment,
                source_file: source.file_name.clone(),
                condition: source.condition.clone(),
                label,
                features: bank.compute_core(chunk),
            })?;
        }

        // The curated export works per source file, never per chunk
        per_file.push(SegmentRecord {
            segment: source.stem.clone(),
            source_file: source.file_name.clone(),
            condition: source.condition.clone(),
            label,
            features: bank.compute_core(&samples),
        })?;

        processed += 1;
    }

    if dataset.is_empty() {
        return Err(PipelineError::NoValidSegments(request.input.clone()));
    }

    let names: Vec<String> = dataset.columns().to_vec();
    let matrix = feature_matrix(&dataset);
    let labels = dataset.labels();

    let selector = if request.fallback_only {
        Selector::fallback_only()
    } else {
        Selector::new()
    };
    let outcome = selector.select(&names, &matrix, &labels, request.top_k)?;
    info!(
        top = ?outcome.selected,
        used_fallback = outcome.used_fallback,
        "descriptor ranking complete"
    );

    let writer = DatasetWriter::new(&request.results_root);
    writer.write_core(&dataset)?;
    writer.write_ranking(&outcome.ranking)?;
    writer.write_top_k(&dataset, &outcome.selected)?;
    writer.write_curated(&per_file, &CURATED_WEIGHTS)?;

    let summary = RunSummary {
        files_processed: processed,
        files_skipped: skipped,
        records: dataset.len(),
        conditions: dataset.conditions().len(),
        used_fallback: Some(outcome.used_fallback),
    };
    info!(?summary, "selection run finished");
    Ok(summary)
}

/// Discover recording files under the input. A file input becomes a single
/// source whose condition is its stem; a directory input is walked
/// recursively, each file's condition being its parent directory name.
fn discover_sources(input: &Path) -> Result<Vec<Source>, PipelineError> {
    if !input.exists() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }

    if input.is_file() {
        let stem = file_stem(input);
        return Ok(vec![Source {
            path: input.to_path_buf(),
            condition: stem.clone(),
            stem,
            file_name: file_name(input),
        }]);
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(input)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !SOURCE_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }

        let condition = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        sources.push(Source {
            path: path.to_path_buf(),
            condition,
            stem: file_stem(path),
            file_name: file_name(path),
        });
    }

    if sources.is_empty() {
        warn!(input = %input.display(), "no recording files discovered");
    }
    Ok(sources)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Row-major feature matrix of a dataset.
fn feature_matrix(dataset: &Dataset) -> Array2<f64> {
    let mut matrix = Array2::zeros((dataset.len(), dataset.columns().len()));
    for (i, record) in dataset.records().iter().enumerate() {
        for (j, &value) in record.features.values.iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }
    matrix
}
